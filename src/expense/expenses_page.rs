//! The View Expenses screen: filters, the expense table and the delete button.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Category, Expense, ExpenseFilter, fetch_or_empty, filter,
        processor::{date_bounds, distinct_categories},
    },
    html::{
        BUTTON_DANGER_STYLE, CATEGORY_BADGE_STYLE, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency, info_message,
    },
    navigation::{NavBar, Screen},
};

/// The max number of graphemes to display in the expense table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The id of the element that filter and delete requests swap out.
pub(crate) const EXPENSES_CONTENT_ID: &str = "expenses-content";

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the expenses page, or just its content for htmx requests.
///
/// Expenses are narrowed down by the categories and date range in the query string.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(expense_filter): Query<ExpenseFilter>,
) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        fetch_or_empty(&*connection)
    };

    let content = expenses_content(&expenses, &expense_filter);

    if is_htmx_request {
        return Ok(Html(content.into_string()).into_response());
    }

    Ok(expenses_view(&content).into_response())
}

fn expenses_view(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(Screen::ViewExpenses).into_html();

    let page = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-4"
            {
                h2 class="text-xl font-bold" { "View Expenses" }

                (content)
            }
        }
    };

    base(Screen::ViewExpenses.title(), &[], &page)
}

/// The message shown in place of the expenses when none have been added.
pub(crate) fn no_expenses_message() -> Markup {
    info_message("No expenses found. Please add some.")
}

/// The swappable part of the expenses page.
fn expenses_content(expenses: &[Expense], expense_filter: &ExpenseFilter) -> Markup {
    let Some((earliest, latest)) = date_bounds(expenses) else {
        return html! {
            div id=(EXPENSES_CONTENT_ID) { (no_expenses_message()) }
        };
    };

    let categories = distinct_categories(expenses);
    let is_category_checked = |category: &Category| {
        expense_filter.categories.is_empty() || expense_filter.categories.contains(category)
    };
    // Date defaults span the checked categories only.
    let in_checked_categories = filter(
        expenses,
        &ExpenseFilter {
            categories: expense_filter.categories.clone(),
            ..ExpenseFilter::default()
        },
    );
    let (earliest, latest) = date_bounds(&in_checked_categories).unwrap_or((earliest, latest));
    let start_date = expense_filter.start_date.unwrap_or(earliest);
    let end_date = expense_filter.end_date.unwrap_or(latest);
    let filtered_expenses = filter(expenses, expense_filter);

    html! {
        div id=(EXPENSES_CONTENT_ID) class="space-y-4"
        {
            form
                hx-get=(endpoints::EXPENSES_VIEW)
                hx-trigger="change"
                hx-target={ "#" (EXPENSES_CONTENT_ID) }
                hx-swap="outerHTML"
                hx-push-url="true"
                class="flex flex-wrap gap-6 items-end"
            {
                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Category" }

                    div class="flex flex-wrap gap-4"
                    {
                        @for category in &categories {
                            label class="inline-flex items-center gap-2 text-sm"
                            {
                                input
                                    type="checkbox"
                                    name="category"
                                    value=(category)
                                    checked[is_category_checked(category)]
                                    class=(FORM_CHECKBOX_STYLE);

                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Start Date" }

                    input
                        type="date"
                        name="start_date"
                        id="start_date"
                        value=(start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End Date" }

                    input
                        type="date"
                        name="end_date"
                        id="end_date"
                        value=(end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (expenses_table(&filtered_expenses))

            button
                type="button"
                hx-delete=(endpoints::EXPENSES_API)
                hx-target={ "#" (EXPENSES_CONTENT_ID) }
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class=(BUTTON_DANGER_STYLE)
            {
                "Delete All Expenses"
            }
        }
    }
}

fn expenses_table(expenses: &[Expense]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded-lg"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense))
                    }

                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "No expenses match the selected filters."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense) -> Markup {
    let (description, tooltip) = format_description(&expense.description);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE) { (expense.date) }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}
