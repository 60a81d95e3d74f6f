//! Validation of client supplied expense data.
//!
//! Both the JSON API and the HTML form deserialize into an [ExpenseDraft],
//! which must pass [ExpenseDraft::validate] before anything is written.

use serde::Deserialize;
use time::{Date, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

/// The maximum number of characters (grapheme clusters) in a category.
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// The reasons an expense or a period filter may be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The amount was not a finite number greater than zero.
    #[error("amount must be a number greater than zero, got \"{0}\"")]
    InvalidAmount(String),

    /// The category was longer than [MAX_CATEGORY_LENGTH].
    #[error("category must be at most {MAX_CATEGORY_LENGTH} characters, got {0}")]
    CategoryTooLong(usize),

    /// The date was not a calendar date in the format `YYYY-MM-DD`.
    #[error("expense_date must be a date in the format YYYY-MM-DD, got \"{0}\"")]
    InvalidDate(String),

    /// The month was not a whole number from 1 to 12.
    #[error("month must be a whole number from 1 to 12, got \"{0}\"")]
    InvalidMonth(String),

    /// The year was not a whole number from 1 to 9999.
    #[error("year must be a whole number from 1 to 9999, got \"{0}\"")]
    InvalidYear(String),
}

/// An amount as sent by a client.
///
/// JSON clients may send either a number or a numeric string, HTML forms
/// always send strings. Any other JSON value is kept so that it fails
/// validation rather than parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number.
    Number(f64),
    /// A string that should contain a number.
    Text(String),
    /// A boolean, array or object.
    Other(serde_json::Value),
}

impl AmountInput {
    fn parse(&self) -> Result<f64, ValidationError> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::InvalidAmount(text.clone()))?,
            AmountInput::Other(value) => {
                return Err(ValidationError::InvalidAmount(value.to_string()));
            }
        };

        if amount.is_finite() && amount > 0.0 {
            Ok(amount)
        } else {
            Err(ValidationError::InvalidAmount(amount.to_string()))
        }
    }
}

/// Unvalidated expense data from a request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseDraft {
    /// The amount spent.
    pub amount: Option<AmountInput>,
    /// The category label.
    pub category: Option<String>,
    /// The date of the expense, `YYYY-MM-DD`.
    pub expense_date: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
}

/// An expense that has passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The amount spent, finite and greater than zero.
    pub amount: f64,
    /// The trimmed, non-empty category label.
    pub category: String,
    /// The date of the expense.
    pub expense_date: Date,
    /// The trimmed description, possibly empty.
    pub description: String,
}

impl ExpenseDraft {
    /// Check every field and convert the draft into a [NewExpense].
    ///
    /// # Errors
    /// Returns the first [ValidationError] found, checking amount, category
    /// and date in that order.
    pub fn validate(self) -> Result<NewExpense, ValidationError> {
        let amount = self
            .amount
            .ok_or(ValidationError::MissingField("amount"))?
            .parse()?;

        let category = non_blank(self.category).ok_or(ValidationError::MissingField("category"))?;
        let category_length = category.graphemes(true).count();
        if category_length > MAX_CATEGORY_LENGTH {
            return Err(ValidationError::CategoryTooLong(category_length));
        }

        let raw_date =
            non_blank(self.expense_date).ok_or(ValidationError::MissingField("expense_date"))?;
        let expense_date = Date::parse(&raw_date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| ValidationError::InvalidDate(raw_date.clone()))?;

        let description = self
            .description
            .map(|description| description.trim().to_owned())
            .unwrap_or_default();

        Ok(NewExpense {
            amount,
            category,
            expense_date,
            description,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{AmountInput, ExpenseDraft, MAX_CATEGORY_LENGTH, NewExpense, ValidationError};

    fn draft(amount: AmountInput, category: &str, expense_date: &str) -> ExpenseDraft {
        ExpenseDraft {
            amount: Some(amount),
            category: Some(category.to_owned()),
            expense_date: Some(expense_date.to_owned()),
            description: None,
        }
    }

    #[test]
    fn valid_draft_is_accepted() {
        let got = draft(AmountInput::Number(250.50), "Food", "2024-03-05").validate();

        assert_eq!(
            got,
            Ok(NewExpense {
                amount: 250.50,
                category: "Food".to_owned(),
                expense_date: date!(2024 - 03 - 05),
                description: String::new(),
            })
        );
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let got = draft(AmountInput::Text(" 12.5 ".to_owned()), "Food", "2024-03-05")
            .validate()
            .unwrap();

        assert_eq!(got.amount, 12.5);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [0.0, -0.01, -100.0] {
            let got = draft(AmountInput::Number(amount), "Food", "2024-03-05").validate();

            assert!(
                matches!(got, Err(ValidationError::InvalidAmount(_))),
                "amount {amount} should be rejected, got {got:?}"
            );
        }
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        for amount in ["", "abc", "12abc", "NaN", "inf"] {
            let got = draft(AmountInput::Text(amount.to_owned()), "Food", "2024-03-05").validate();

            assert!(
                matches!(got, Err(ValidationError::InvalidAmount(_))),
                "amount {amount:?} should be rejected, got {got:?}"
            );
        }
    }

    #[test]
    fn non_number_json_amounts_fail_validation() {
        for body in [
            r#"{"amount": true}"#,
            r#"{"amount": [5]}"#,
            r#"{"amount": {}}"#,
        ] {
            let draft: ExpenseDraft = serde_json::from_str(body).unwrap();

            assert!(
                matches!(draft.validate(), Err(ValidationError::InvalidAmount(_))),
                "{body} should fail validation"
            );
        }
    }

    #[test]
    fn missing_amount_is_rejected() {
        let mut expense = draft(AmountInput::Number(1.0), "Food", "2024-03-05");
        expense.amount = None;

        assert_eq!(
            expense.validate(),
            Err(ValidationError::MissingField("amount"))
        );
    }

    #[test]
    fn blank_category_is_rejected() {
        let got = draft(AmountInput::Number(1.0), "   ", "2024-03-05").validate();

        assert_eq!(got, Err(ValidationError::MissingField("category")));
    }

    #[test]
    fn category_is_trimmed() {
        let got = draft(AmountInput::Number(1.0), "  Food ", "2024-03-05")
            .validate()
            .unwrap();

        assert_eq!(got.category, "Food");
    }

    #[test]
    fn long_category_is_rejected() {
        let category = "a".repeat(MAX_CATEGORY_LENGTH + 1);

        let got = draft(AmountInput::Number(1.0), &category, "2024-03-05").validate();

        assert_eq!(
            got,
            Err(ValidationError::CategoryTooLong(MAX_CATEGORY_LENGTH + 1))
        );
    }

    #[test]
    fn category_length_counts_characters_not_bytes() {
        let category = "é".repeat(MAX_CATEGORY_LENGTH);

        let got = draft(AmountInput::Number(1.0), &category, "2024-03-05").validate();

        assert!(got.is_ok());
    }

    #[test]
    fn empty_date_is_rejected() {
        let got = draft(AmountInput::Number(1.0), "Food", "").validate();

        assert_eq!(got, Err(ValidationError::MissingField("expense_date")));
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        for expense_date in ["05/03/2024", "2024-02-30", "yesterday", "2024-3-5"] {
            let got = draft(AmountInput::Number(1.0), "Food", expense_date).validate();

            assert_eq!(
                got,
                Err(ValidationError::InvalidDate(expense_date.to_owned()))
            );
        }
    }

    #[test]
    fn description_defaults_to_empty_string() {
        let got = draft(AmountInput::Number(1.0), "Food", "2024-03-05")
            .validate()
            .unwrap();

        assert_eq!(got.description, "");
    }

    #[test]
    fn description_is_kept() {
        let mut expense = draft(AmountInput::Number(1.0), "Food", "2024-03-05");
        expense.description = Some(" Lunch with Sam ".to_owned());

        assert_eq!(expense.validate().unwrap().description, "Lunch with Sam");
    }
}
