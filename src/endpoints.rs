//! The API endpoints URIs.

/// The root route which redirects to the page for adding an expense.
pub const ROOT: &str = "/";
/// The page for adding a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page listing a month of expenses as a table.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page summarising a month of expenses as a pie chart.
pub const CHARTS_VIEW: &str = "/charts";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The JSON route for creating and listing expenses.
pub const EXPENSES_API: &str = "/api/expenses";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::NEW_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CHARTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_API);
    }
}
