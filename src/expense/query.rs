//! Database queries for listing the expenses of a period.

use rusqlite::Connection;

use crate::{
    Error,
    expense::{
        core::{Expense, map_expense_row},
        period::Period,
    },
};

/// Get the expenses that fall within `period`, newest first.
///
/// Expenses on the same day are returned in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if the query could not be prepared or run.
pub fn list_expenses(period: Period, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let date_range = period.date_range();

    connection
        .prepare(
            "SELECT id, amount, category, expense_date, description
            FROM expense
            WHERE expense_date BETWEEN ?1 AND ?2
            ORDER BY expense_date DESC, id ASC",
        )?
        .query_map((date_range.start(), date_range.end()), map_expense_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
