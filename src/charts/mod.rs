//! The View Charts page: a month of expenses summarised per category.

mod handlers;
mod pie;

pub use handlers::get_charts_page;
