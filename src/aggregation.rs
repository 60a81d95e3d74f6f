//! Totals over a period's expenses for the table footer and the pie chart.

use std::collections::HashMap;

use crate::Expense;

/// Sums the amount of each category.
///
/// # Returns
/// HashMap mapping every category present in `expenses` to the sum of its amounts.
pub(crate) fn per_category_totals(expenses: &[Expense]) -> HashMap<&str, f64> {
    let mut totals = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
    }

    totals
}

/// The sum of all amounts in `expenses`, zero if there are none.
pub(crate) fn grand_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Category totals sorted for display: largest total first, ties broken by
/// category name.
pub(crate) fn sorted_category_totals(expenses: &[Expense]) -> Vec<(&str, f64)> {
    let mut totals: Vec<(&str, f64)> = per_category_totals(expenses).into_iter().collect();

    totals.sort_by(|(left_name, left_total), (right_name, right_total)| {
        right_total
            .total_cmp(left_total)
            .then_with(|| left_name.cmp(right_name))
    });

    totals
}
