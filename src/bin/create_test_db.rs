use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{AmountInput, ExpenseDraft, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Amount, category and description of the demo expenses, one per day
/// counting back from today.
const DEMO_EXPENSES: [(f64, &str, &str); 12] = [
    (250.50, "Food", "Lunch with the team"),
    (40.00, "Transport", "Bus pass top up"),
    (1200.00, "Rent", ""),
    (89.99, "Entertainment", "Concert tickets"),
    (15.25, "Food", "Coffee and a bagel"),
    (320.00, "Utilities", "Electricity bill"),
    (60.00, "Transport", "Taxi home"),
    (45.50, "Food", ""),
    (199.00, "Shopping", "New shoes"),
    (12.00, "Entertainment", "Movie rental"),
    (75.80, "Food", "Groceries"),
    (30.00, "Health", "Pharmacy"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo expenses...");

    // Spread the expenses over the last few weeks so both this month and
    // last month usually have data.
    let today = OffsetDateTime::now_utc().date();

    for (index, (amount, category, description)) in DEMO_EXPENSES.into_iter().enumerate() {
        let expense_date = today - Duration::days(index as i64 * 3);

        let draft = ExpenseDraft {
            amount: Some(AmountInput::Number(amount)),
            category: Some(category.to_owned()),
            expense_date: Some(expense_date.to_string()),
            description: Some(description.to_owned()),
        };

        create_expense(draft.validate()?, &conn)?;
    }

    println!("Success!");

    Ok(())
}
