//! Expense management: the data model, validation, period filtering, the
//! JSON API and the pages for adding and viewing expenses.

mod api;
mod core;
mod create_page;
mod expenses_page;
mod period;
mod query;
mod validation;

pub use api::{create_expense_endpoint, list_expenses_endpoint};
pub use core::{Expense, create_expense, create_expense_table};
pub use create_page::{get_new_expense_page, submit_expense_form};
pub use expenses_page::get_expenses_page;
pub(crate) use expenses_page::month_filter;
pub use period::{MonthInputQuery, Period, PeriodQuery};
pub use query::list_expenses;
pub use validation::{AmountInput, ExpenseDraft, NewExpense, ValidationError};

#[cfg(test)]
pub(crate) use core::{count_expenses, get_expense};
