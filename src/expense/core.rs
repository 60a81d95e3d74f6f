//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::validation::NewExpense,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent.
///
/// Expenses are only created through [create_expense] from a validated
/// [NewExpense] and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// The amount of money spent, always greater than zero.
    pub amount: f64,
    /// A short label for what kind of expense this is, e.g. "Food".
    pub category: String,
    /// When the money was spent.
    #[serde(with = "iso_date")]
    pub expense_date: Date,
    /// Free text detailing the expense, empty if none was given.
    pub description: String,
}

/// Serializes dates as `YYYY-MM-DD` strings.
mod iso_date {
    use serde::Serializer;
    use time::{Date, macros::format_description};

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&formatted)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a validated expense into the database and return the stored row.
///
/// # Errors
/// This function will return an [Error::SqlError] if the row could not be
/// inserted, e.g. a table constraint was violated.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, category, expense_date, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, expense_date, description",
        )?
        .query_row(
            (
                expense.amount,
                expense.category,
                expense.expense_date,
                expense.description,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a stored expense,
/// - or [Error::SqlError] if there is some other SQL error.
#[cfg(test)]
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, category, expense_date, description FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL CHECK (length(category) > 0),
                expense_date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT ''
                )",
        (),
    )?;

    // Every listing filters and sorts on the date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(expense_date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
///
/// The row must contain the columns `id, amount, category, expense_date,
/// description` in that order.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let expense_date = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        category,
        expense_date,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================
