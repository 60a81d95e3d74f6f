//! The category breakdown pie chart.
//!
//! The chart is built with charming and handed to the browser as an ECharts
//! option object, which `renderExpenseChart` in `static/app.js` draws.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{Color, JsFunction, Orient, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{Expense, aggregation::sorted_category_totals, expense::Period, html::CURRENCY_SYMBOL};

/// The HTML element ID the chart is drawn into.
pub(super) const CHART_ID: &str = "expense-chart";

/// Slice colours, assigned to categories from the largest total down.
const PALETTE: [&str; 7] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9933", "#C9CBCF",
];

/// Build a pie chart with one slice per category of `expenses`.
pub(super) fn category_pie_chart(period: Period, expenses: &[Expense]) -> Chart {
    let data: Vec<(f64, &str)> = sorted_category_totals(expenses)
        .into_iter()
        .map(|(category, total)| (total, category))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Category")
                .subtext(period.to_string())
                .left("center"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("middle"))
        .color(PALETTE.into_iter().map(Color::from).collect())
        .series(Pie::new().name("Expenses").radius("60%").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "return '{CURRENCY_SYMBOL}' + Number(number).toLocaleString('en-IN', {{
                minimumFractionDigits: 2,
                maximumFractionDigits: 2
            }});"
        ),
    )
}

/// The element the chart is drawn into, followed by the script that draws
/// it.
///
/// The script is inline so that it runs both on a full page load and when
/// htmx swaps in new content for another month.
pub(super) fn chart_view(chart: &Chart) -> Markup {
    // Category names are user input, so stop them from closing the script tag.
    let options = chart.to_string().replace("</", "<\\/");

    html! {
        div
            id=(CHART_ID)
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}

        script {
            (PreEscaped(format!("renderExpenseChart({CHART_ID:?}, {options});")))
        }
    }
}

/// The script that clears any chart left over from a previous month.
pub(super) fn dispose_chart_script() -> Markup {
    html! {
        script { (PreEscaped("disposeExpenseChart();")) }
    }
}
