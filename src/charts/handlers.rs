//! Charts HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Clock, Error, Expense,
    aggregation::{grand_total, sorted_category_totals},
    charts::pie::{category_pie_chart, chart_view, dispose_chart_script},
    endpoints,
    expense::{MonthInputQuery, Period, list_expenses, month_filter},
    html::{
        CATEGORY_BADGE_STYLE, HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

const CONTENT_ID: &str = "charts-content";

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The state needed for displaying the charts page.
#[derive(Debug, Clone)]
pub struct ChartsState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The source of today's date for the default month.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for ChartsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
        }
    }
}

/// Display a pie chart of the selected month's spending per category.
///
/// Like the expenses page, htmx requests only get the content partial and
/// errors in htmx requests are returned as an alert.
pub async fn get_charts_page(
    State(state): State<ChartsState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<MonthInputQuery>,
) -> Response {
    let result = state
        .clock
        .today()
        .and_then(|today| query.resolve(today).map_err(Error::from))
        .and_then(|period| {
            let connection = state
                .db_connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            let expenses = list_expenses(period, &connection).inspect_err(|error| {
                tracing::error!("could not list expenses for {period}: {error}")
            })?;

            Ok((period, expenses))
        });

    match result {
        Ok((period, expenses)) if is_htmx_request => {
            charts_content(period, &expenses).into_response()
        }
        Ok((period, expenses)) => charts_view(period, &expenses).into_response(),
        Err(error) if is_htmx_request => error.into_alert_response(),
        Err(error) => error.into_response(),
    }
}

fn charts_view(period: Period, expenses: &[Expense]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CHARTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (charts_content(period, expenses))
        }
    };

    base(
        "Charts",
        &[HeadElement::ScriptLink(ECHARTS_URL.to_owned())],
        &content,
    )
}

fn charts_content(period: Period, expenses: &[Expense]) -> Markup {
    html! {
        section id=(CONTENT_ID) class="w-full max-w-screen-lg"
        {
            div class="flex flex-wrap justify-between items-end gap-4 mb-4"
            {
                h2 class="text-xl font-bold" { "Spending for " (period) }

                (month_filter(endpoints::CHARTS_VIEW, CONTENT_ID, period))
            }

            @if expenses.is_empty() {
                p class="text-gray-600 dark:text-gray-400"
                {
                    "No expenses found for this period."
                }

                (dispose_chart_script())
            } @else {
                div class="grid grid-cols-1 lg:grid-cols-3 gap-4"
                {
                    div class="lg:col-span-2"
                    {
                        (chart_view(&category_pie_chart(period, expenses)))
                    }

                    (category_totals_table(expenses))
                }
            }
        }
    }
}

fn category_totals_table(expenses: &[Expense]) -> Markup {
    let totals = sorted_category_totals(expenses);
    let total = grand_total(expenses);

    html! {
        div class="relative overflow-x-auto rounded shadow-md self-start"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Total" }
                    }
                }

                tbody
                {
                    @for (category, category_total) in totals {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (category) }
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format_currency(category_total))
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                        td id="grand-total" class={ (TABLE_CELL_STYLE) " text-right" }
                        {
                            (format_currency(total))
                        }
                    }
                }
            }
        }
    }
}
