//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for expense data:
//! - **Category-wise Spending**: Bar chart of the amount spent per category
//! - **Daily Spending Trend**: Line chart of the amount spent per day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    expense::{Expense, aggregate_by_category, aggregate_by_date},
    html::HeadElement,
};

/// The ECharts build loaded by the dashboard page.
pub(super) const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Serialize `chart` for embedding in an inline script.
///
/// Category names are stored as free text, so every `<` is written as the
/// JavaScript escape `\u003c` to stop text such as `</script>` from closing
/// the script element.
pub(super) fn chart_options(chart: &Chart) -> String {
    chart.to_string().replace('<', "\\u003c")
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Category names and the amount spent in each, in the order the bars are drawn.
fn category_series(expenses: &[Expense]) -> (Vec<String>, Vec<f64>) {
    aggregate_by_category(expenses)
        .into_iter()
        .map(|(category, amount)| (category.to_string(), amount))
        .unzip()
}

/// Dates and the amount spent on each, oldest first.
fn daily_series(expenses: &[Expense]) -> (Vec<String>, Vec<f64>) {
    aggregate_by_date(expenses)
        .into_iter()
        .map(|(date, amount)| (date.to_string(), amount))
        .unzip()
}

pub(super) fn category_chart(expenses: &[Expense]) -> Chart {
    let (labels, values) = category_series(expenses);

    Chart::new()
        .title(Title::new().text("Category-wise Spending"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Amount").data(values))
}

pub(super) fn daily_trend_chart(expenses: &[Expense]) -> Chart {
    let (labels, values) = daily_series(expenses);

    Chart::new()
        .title(Title::new().text("Daily Spending Trend"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Amount").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::expense::{Category, Expense};

    use super::{
        category_chart, category_series, chart_options, daily_series, daily_trend_chart,
    };

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new(Category::Travel, 1000.0, "Train", date!(2024 - 01 - 02)),
            Expense::new(Category::Food, 250.0, "Groceries", date!(2024 - 01 - 01)),
            Expense::new(Category::Food, 50.0, "Snacks", date!(2024 - 01 - 02)),
        ]
    }

    #[test]
    fn category_series_sums_per_category() {
        let (labels, values) = category_series(&sample_expenses());

        assert_eq!(labels, ["Food", "Travel"]);
        assert_eq!(values, [300.0, 1000.0]);
    }

    #[test]
    fn daily_series_is_in_ascending_date_order() {
        let (labels, values) = daily_series(&sample_expenses());

        assert_eq!(labels, ["2024-01-01", "2024-01-02"]);
        assert_eq!(values, [250.0, 1050.0]);
    }

    #[test]
    fn charts_are_titled() {
        let expenses = sample_expenses();

        assert!(
            category_chart(&expenses)
                .to_string()
                .contains("Category-wise Spending")
        );
        assert!(
            daily_trend_chart(&expenses)
                .to_string()
                .contains("Daily Spending Trend")
        );
    }

    #[test]
    fn chart_options_cannot_close_script_element() {
        let expenses = [Expense::new(
            Category::from("</script><script>alert(1)</script>"),
            10.0,
            "",
            date!(2024 - 01 - 01),
        )];

        let options = chart_options(&category_chart(&expenses));

        assert!(!options.contains('<'), "got unescaped options {options}");
        assert!(options.contains("\\u003c/script>"));
    }
}
