//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::charts::{
        DashboardChart, ECHARTS_URL, category_chart, chart_options, charts_script, charts_view,
        daily_trend_chart,
    },
    expense::{Expense, fetch_or_empty, total},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, format_currency, info_message},
    navigation::{NavBar, Screen},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with the total spent and charts of every expense.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        fetch_or_empty(&*connection)
    };

    if expenses.is_empty() {
        return Ok(dashboard_no_data_view().into_response());
    }

    let charts = build_dashboard_charts(&expenses);

    Ok(dashboard_view(total(&expenses), &charts).into_response())
}

/// Creates the dashboard charts with their options serialized for ECharts.
fn build_dashboard_charts(expenses: &[Expense]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "category-chart",
            options: chart_options(&category_chart(expenses)),
        },
        DashboardChart {
            id: "daily-trend-chart",
            options: chart_options(&daily_trend_chart(expenses)),
        },
    ]
}

fn dashboard_no_data_view() -> Markup {
    let nav_bar = NavBar::new(Screen::Dashboard).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (info_message("No expenses found."))
        }
    );

    base(Screen::Dashboard.title(), &[], &content)
}

fn total_spent_card(total_spent: f64) -> Markup {
    html!(
        section
            id="total-spent"
            class="w-full mb-4 p-6 rounded-lg bg-white dark:bg-gray-800 shadow-sm"
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { "Total Spent" }
            p class="mt-2 text-3xl font-bold" { (format_currency(total_spent)) }
        }
    )
}

fn dashboard_view(total_spent: f64, charts: &[DashboardChart]) -> Markup {
    let nav_bar = NavBar::new(Screen::Dashboard).into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (total_spent_card(total_spent))
            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(charts),
    ];

    base(Screen::Dashboard.title(), &scripts, &content)
}
