//! An expense tracker for logging day to day spending.
//!
//! The library provides a JSON API for recording and listing expenses and a
//! set of server-rendered HTML pages for adding expenses, viewing a month of
//! expenses as a table and summarising a month as a pie chart.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod charts;
mod clock;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::initialize as initialize_db;
pub use expense::{
    AmountInput, Expense, ExpenseDraft, NewExpense, Period, PeriodQuery, ValidationError,
    create_expense, list_expenses,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundPage};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body could not be parsed into the expected structure,
    /// e.g. it is not valid JSON or a field has the wrong type.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The request could be parsed, but one of its fields is missing or
    /// breaks a constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

/// The broad class of an [Error], reported to API clients so they can tell
/// bad input apart from a server side failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request body could not be parsed.
    MalformedInput,
    /// A field is missing or invalid.
    Validation,
    /// The store could not complete the read or write.
    Persistence,
    /// The requested resource does not exist.
    NotFound,
    /// The server is misconfigured.
    Internal,
}

impl Error {
    /// The class of error reported to clients.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput(_) => ErrorKind::MalformedInput,
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound => ErrorKind::NotFound,
            Error::SqlError(_) | Error::DatabaseLockError => ErrorKind::Persistence,
            Error::InvalidTimezoneError(_) => ErrorKind::Internal,
        }
    }

    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MalformedInput | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Persistence | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A message that is safe to show to a client.
    ///
    /// Client errors are described in full, server errors are replaced with
    /// a generic message so that SQL details only end up in the server logs.
    pub fn client_message(&self) -> String {
        match self {
            Error::MalformedInput(_) | Error::Validation(_) => self.to_string(),
            Error::NotFound => "The requested resource could not be found.".to_owned(),
            Error::SqlError(_) | Error::DatabaseLockError => {
                "The expense store could not complete the request. Check the server logs for details."
                    .to_owned()
            }
            Error::InvalidTimezoneError(timezone) => format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundPage.into_response(),
            Error::MalformedInput(_) | Error::Validation(_) => (
                StatusCode::BAD_REQUEST,
                html::error_view(
                    "Bad Request",
                    "400",
                    "Sorry, that request could not be understood.",
                    &self.client_message(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(_) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &self.client_message(),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for htmx requests.
    ///
    /// The view that issued the request keeps its content, only the alert
    /// container is updated.
    fn into_alert_response(self) -> Response {
        let status = self.status_code();

        let (message, details) = match &self {
            Error::Validation(ValidationError::InvalidMonth(_) | ValidationError::InvalidYear(_)) => {
                ("Invalid period", self.client_message())
            }
            Error::MalformedInput(_) | Error::Validation(_) => {
                ("Invalid expense", self.client_message())
            }
            Error::InvalidTimezoneError(_) => ("Invalid Timezone Settings", self.client_message()),
            _ => (
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        (
            status,
            Alert::Error {
                message: message.to_owned(),
                details,
            }
            .into_html(),
        )
            .into_response()
    }
}
