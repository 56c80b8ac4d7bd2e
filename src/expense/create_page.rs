//! Defines the route handler for the page for adding a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::Category,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, base, loading_spinner, rupee_input_styles,
    },
    navigation::{NavBar, Screen},
    timezone::local_today,
};

const FORM_ID: &str = "new-expense-form";

/// Clears the form once the server has accepted the expense so the next one
/// can be entered straight away. Failed submissions keep their values.
fn reset_form_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(format!(
        r#"
        document.addEventListener("htmx:afterRequest", (event) => {{
            const form = event.detail.elt;
            if (form.id === "{FORM_ID}" && event.detail.successful) {{
                form.reset();
            }}
        }});
        "#
    )))
}

fn new_expense_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(Screen::AddExpense).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                id=(FORM_ID)
                hx-post=(endpoints::EXPENSES_API)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Expense" }

                div
                {
                    label
                        for="category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    select
                        name="category"
                        id="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in Category::ALL {
                            option
                                value=(category)
                                selected[category == Category::Food]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            min="1"
                            step="1"
                            placeholder="0"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label
                        for="description"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Description"
                    }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="What was it for?"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Expense"
                }
            }
        }
    };

    base(
        "Add Expense",
        &[rupee_input_styles(), reset_form_script()],
        &content,
    )
}

/// The state needed for the add expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for adding an expense.
pub async fn get_new_expense_page(
    State(state): State<NewExpensePageState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(new_expense_view(today).into_response())
}
