//! The View Expenses page: a table of one month's expenses with a total.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Clock, Error,
    aggregation::grand_total,
    endpoints,
    expense::{
        core::Expense,
        period::{MonthInputQuery, Period},
        query::list_expenses,
    },
    html::{
        CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, format_date,
    },
    navigation::NavBar,
};

const CONTENT_ID: &str = "expenses-content";

/// The state needed for the View Expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The source of today's date for the default month.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
        }
    }
}

/// Renders the expenses of the month selected with `?period=YYYY-MM`.
///
/// htmx requests, e.g. from changing the month filter, only get the content
/// below the navigation bar. Errors in htmx requests are returned as an
/// alert so the current table stays on screen.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<MonthInputQuery>,
) -> Response {
    match load_expenses(&state, &query) {
        Ok((period, expenses)) if is_htmx_request => {
            expenses_content(period, &expenses).into_response()
        }
        Ok((period, expenses)) => expenses_view(period, &expenses).into_response(),
        Err(error) if is_htmx_request => error.into_alert_response(),
        Err(error) => error.into_response(),
    }
}

fn load_expenses(
    state: &ExpensesPageState,
    query: &MonthInputQuery,
) -> Result<(Period, Vec<Expense>), Error> {
    let today = state
        .clock
        .today()
        .inspect_err(|error| tracing::error!("could not get today's date: {error}"))?;
    let period = query.resolve(today)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(period, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {period}: {error}"))?;

    Ok((period, expenses))
}

fn expenses_view(period: Period, expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (expenses_content(period, expenses))
        }
    };

    base("Expenses", &[], &content)
}

fn expenses_content(period: Period, expenses: &[Expense]) -> Markup {
    html! {
        section id=(CONTENT_ID) class="w-full max-w-screen-lg"
        {
            div class="flex flex-wrap justify-between items-end gap-4 mb-4"
            {
                h2 class="text-xl font-bold" { "Expenses for " (period) }

                (month_filter(endpoints::EXPENSES_VIEW, CONTENT_ID, period))
            }

            @if expenses.is_empty() {
                p class="text-gray-600 dark:text-gray-400"
                {
                    "No expenses found for this period."
                }
            } @else {
                (expenses_table(expenses))
            }
        }
    }
}

/// A month picker that reloads the content element `target_id` from
/// `endpoint` whenever the month changes.
pub(crate) fn month_filter(endpoint: &str, target_id: &str, period: Period) -> Markup {
    html! {
        form
            hx-get=(endpoint)
            hx-target={ "#" (target_id) }
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            hx-trigger="change"
            hx-push-url="true"
        {
            label for="period" class=(FORM_LABEL_STYLE) { "Month" }

            input
                name="period"
                id="period"
                type="month"
                value=(period.month_input_value())
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn expenses_table(expenses: &[Expense]) -> Markup {
    let total = grand_total(expenses);

    html! {
        div class="relative overflow-x-auto rounded shadow-md"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (format_date(expense.expense_date)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format_currency(expense.amount))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if expense.description.is_empty() {
                                    "-"
                                } @else {
                                    (expense.description)
                                }
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" colspan="2" class=(TABLE_CELL_STYLE) { "Total" }
                        td id="grand-total" class={ (TABLE_CELL_STYLE) " text-right" }
                        {
                            (format_currency(total))
                        }
                        td class=(TABLE_CELL_STYLE) {}
                    }
                }
            }
        }
    }
}
