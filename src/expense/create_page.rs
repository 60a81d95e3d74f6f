//! The Add Expense page and the form endpoint behind it.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Clock, Error,
    alert::Alert,
    endpoints,
    expense::{
        core::create_expense,
        validation::{ExpenseDraft, MAX_CATEGORY_LENGTH},
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
};

/// The htmx event fired after an expense is saved from the form.
///
/// `static/app.js` listens for it to reset the form.
pub const EXPENSE_CREATED_EVENT: &str = "expense-created";

/// The state needed for the Add Expense page and its form.
#[derive(Debug, Clone)]
pub struct NewExpenseState {
    /// The database connection for storing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The source of today's date for the default expense date.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for NewExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
        }
    }
}

fn new_expense_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                id="expense-form"
                hx-post=(endpoints::NEW_EXPENSE_VIEW)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                data-today=(today)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Expense" }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="e.g. Food"
                        maxlength=(MAX_CATEGORY_LENGTH)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="expense_date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="expense_date"
                        id="expense_date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description (optional)"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Add Expense"
                }
            }
        }
    };

    base("Add Expense", &[currency_input_styles()], &content)
}

/// Renders the page for adding an expense.
pub async fn get_new_expense_page(
    State(state): State<NewExpenseState>,
) -> Result<Response, Error> {
    let today = state
        .clock
        .today()
        .inspect_err(|error| tracing::error!("could not get today's date: {error}"))?;

    Ok(new_expense_view(today).into_response())
}

/// A route handler for the Add Expense form.
///
/// Responds with a notice for the alert container. On success the
/// [EXPENSE_CREATED_EVENT] is triggered so the client can reset the form.
pub async fn submit_expense_form(
    State(state): State<NewExpenseState>,
    Form(draft): Form<ExpenseDraft>,
) -> Response {
    let new_expense = match draft.validate() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("rejected expense form: {error}");
            return Error::Validation(error).into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let expense = match create_expense(new_expense, &connection) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!("created expense {} in {}", expense.id, expense.category);

    (
        StatusCode::OK,
        [(HX_TRIGGER, EXPENSE_CREATED_EVENT)],
        Alert::Success {
            message: "Expense added successfully!".to_owned(),
            details: String::new(),
        }
        .into_html(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        FixedClock,
        db::initialize,
        endpoints,
        expense::{
            core::{count_expenses, get_expense},
            create_page::{
                EXPENSE_CREATED_EVENT, NewExpenseState, get_new_expense_page, submit_expense_form,
            },
            validation::{AmountInput, ExpenseDraft},
        },
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            get_header, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    fn get_test_state() -> NewExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        NewExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
            clock: Arc::new(FixedClock(date!(2024 - 03 - 15))),
        }
    }

    fn draft(amount: &str, category: &str, expense_date: &str) -> ExpenseDraft {
        ExpenseDraft {
            amount: Some(AmountInput::Text(amount.to_owned())),
            category: Some(category.to_owned()),
            expense_date: Some(expense_date.to_owned()),
            description: None,
        }
    }

    #[tokio::test]
    async fn new_expense_page_renders_form() {
        let response = get_new_expense_page(State(get_test_state()))
            .await
            .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::NEW_EXPENSE_VIEW, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "category", "text");
        assert_form_input_with_value(&form, "expense_date", "date", "2024-03-15");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn submitting_form_creates_expense() {
        let state = get_test_state();

        let response = submit_expense_form(
            State(state.clone()),
            Form(draft("250.50", "Food", "2024-03-05")),
        )
        .await;

        assert_status_ok(&response);
        assert_eq!(get_header(&response, "hx-trigger"), EXPENSE_CREATED_EVENT);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("div[role=status]").unwrap())
            .next()
            .expect("want a success alert");
        assert!(
            alert
                .text()
                .collect::<String>()
                .contains("Expense added successfully!")
        );

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(1, &connection).unwrap();
        assert_eq!(expense.amount, 250.50);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.description, "");
    }

    #[tokio::test]
    async fn invalid_form_returns_error_alert_without_writing() {
        let state = get_test_state();

        let response = submit_expense_form(
            State(state.clone()),
            Form(draft("-3", "Food", "2024-03-05")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-trigger").is_none());
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("div[role=alert]").unwrap())
                .next()
                .is_some()
        );

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_expenses(&connection).unwrap(), 0);
    }
}
