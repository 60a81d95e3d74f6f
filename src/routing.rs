//! Application router configuration for the JSON API and the HTML views.

use std::path::Path;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    response::Redirect,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    AppState,
    charts::get_charts_page,
    endpoints,
    expense::{
        create_expense_endpoint, get_expenses_page, get_new_expense_page, list_expenses_endpoint,
        submit_expense_form,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Static files are served from `static_dir` under [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // The JSON API may be called from pages served by another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .layer(cors);

    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::NEW_EXPENSE_VIEW,
            get(get_new_expense_page).post(submit_expense_form),
        )
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::CHARTS_VIEW, get(get_charts_page));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the page for adding an expense.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::NEW_EXPENSE_VIEW)
}
