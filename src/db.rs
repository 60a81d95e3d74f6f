//! Sets up the application's database.

use rusqlite::{Connection, TransactionBehavior};

use crate::{Error, expense::create_expense_table};

/// Create the application's tables if they do not already exist.
///
/// The tables are created inside a single exclusive transaction, so either
/// every table is created or none are.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
