//! The JSON API for recording and listing expenses.
//!
//! - `POST /api/expenses` takes `{amount, category, expense_date, description?}`
//!   and responds with `{status, message, id}`.
//! - `GET /api/expenses?month=<1-12>&year=<YYYY>` responds with the expenses
//!   of the resolved period, newest first.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Clock, Error, ErrorKind,
    database_id::ExpenseId,
    expense::{
        core::{Expense, create_expense},
        period::PeriodQuery,
        query::list_expenses,
        validation::{ExpenseDraft, ValidationError},
    },
};

/// The state needed by the expense API.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The source of today's date for the default period.
    pub clock: Arc<dyn Clock>,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            clock: state.clock.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Success,
    Error,
}

/// The body of a successful create request.
#[derive(Debug, Serialize)]
struct CreatedBody {
    status: ResponseStatus,
    message: &'static str,
    id: ExpenseId,
}

/// The body of any failed API request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: ResponseStatus,
    message: String,
    kind: ErrorKind,
}

/// An [Error] rendered as JSON instead of an HTML page.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self(Error::Validation(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status = error.status_code();

        if status.is_server_error() {
            tracing::error!("API request failed: {error}");
        }

        let body = ErrorBody {
            status: ResponseStatus::Error,
            message: error.client_message(),
            kind: error.kind(),
        };

        (status, Json(body)).into_response()
    }
}

/// A route handler for recording a new expense.
///
/// The body is parsed by hand rather than with the [Json] extractor so that
/// every failure, including a missing content type or broken JSON, is
/// reported in the same JSON error shape.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseApiState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let draft: ExpenseDraft = serde_json::from_slice(&body).map_err(|error| {
        tracing::debug!("could not parse expense body: {error}");
        Error::MalformedInput(error.to_string())
    })?;

    let new_expense = draft.validate()?;

    let expense = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        create_expense(new_expense, &connection)
            .inspect_err(|error| tracing::error!("could not create expense: {error}"))?
    };

    tracing::info!("created expense {} in {}", expense.id, expense.category);

    let body = CreatedBody {
        status: ResponseStatus::Success,
        message: "New expense added successfully",
        id: expense.id,
    };

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// A route handler for listing the expenses of a month or a year.
///
/// Without parameters the current month is listed.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseApiState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("could not parse expense query: {rejection}");
        Error::MalformedInput(rejection.body_text())
    })?;
    let today = state.clock.today()?;
    let period = query.resolve(today)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(period, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {period}: {error}"))?;

    Ok(Json(expenses))
}
