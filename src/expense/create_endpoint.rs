//! Defines the endpoint for adding a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{Category, Expense, ExpenseStore},
};

/// The smallest amount that can be entered for a new expense.
const MIN_AMOUNT: f64 = 1.0;

/// The state needed to add an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent in rupees.
    pub amount: f64,
    /// Text detailing the expense.
    #[serde(default)]
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
}

/// A route handler for adding a new expense, responds with an alert.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    if !form.amount.is_finite() || form.amount < MIN_AMOUNT {
        tracing::warn!("rejected expense with invalid amount {}", form.amount);
        return Error::InvalidAmount(form.amount).into_alert_response();
    }

    if let Category::Unrecognised(category) = form.category {
        tracing::warn!("rejected expense with unknown category {category:?}");
        return Error::InvalidCategory(category).into_alert_response();
    }

    let expense = Expense::new(form.category, form.amount, &form.description, form.date);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = connection.insert(&expense) {
        tracing::error!("could not add expense: {error}");
        return error.into_alert_response();
    }

    tracing::info!(
        "added {} expense of {} on {}",
        expense.category,
        expense.amount,
        expense.date
    );

    Alert::SuccessSimple {
        message: "Expense added successfully!".to_owned(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{FromRequest, State},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{
            Category, Expense, ExpenseStore,
            create_endpoint::{CreateExpenseState, ExpenseForm, create_expense_endpoint},
        },
        test_utils::{assert_status_ok, assert_valid_html, parse_html_fragment},
    };

    fn get_test_state() -> CreateExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        CreateExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    /// Decode `body` the way the router does for a submitted form.
    async fn decode_form(body: &'static str) -> Form<ExpenseForm> {
        let request = Request::post("/api/expenses")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        Form::<ExpenseForm>::from_request(request, &())
            .await
            .expect("Could not decode form")
    }

    fn stored_expenses(state: &CreateExpenseState) -> Vec<Expense> {
        state.db_connection.lock().unwrap().find_all().unwrap()
    }

    #[tokio::test]
    async fn can_add_expense() {
        let state = get_test_state();
        let form = ExpenseForm {
            category: Category::Food,
            amount: 250.0,
            description: "Groceries".to_owned(),
            date: date!(2024 - 01 - 01),
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let message = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();
        assert_eq!(message.trim(), "Expense added successfully!");

        assert_eq!(
            stored_expenses(&state),
            [Expense::new(
                Category::Food,
                250.0,
                "Groceries",
                date!(2024 - 01 - 01)
            )]
        );
    }

    #[tokio::test]
    async fn can_add_expense_without_description() {
        let state = get_test_state();
        let form = decode_form("category=Travel&amount=1000&description=&date=2024-01-02").await;

        let response = create_expense_endpoint(State(state.clone()), form).await;

        assert_status_ok(&response);
        assert_eq!(
            stored_expenses(&state),
            [Expense::new(
                Category::Travel,
                1000.0,
                "",
                date!(2024 - 01 - 02)
            )]
        );
    }

    #[tokio::test]
    async fn rejects_amount_below_one() {
        let state = get_test_state();
        let form = ExpenseForm {
            category: Category::Food,
            amount: 0.0,
            description: String::new(),
            date: date!(2024 - 01 - 01),
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stored_expenses(&state).is_empty());
    }

    #[tokio::test]
    async fn rejects_category_outside_fixed_set() {
        let state = get_test_state();
        let form = decode_form("category=Gifts&amount=10&date=2024-01-02").await;

        let response = create_expense_endpoint(State(state.clone()), form).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stored_expenses(&state).is_empty());
    }

    #[tokio::test]
    async fn rejects_non_finite_amount() {
        let state = get_test_state();
        let form = ExpenseForm {
            category: Category::Bills,
            amount: f64::NAN,
            description: String::new(),
            date: date!(2024 - 01 - 01),
        };

        let response = create_expense_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(stored_expenses(&state).is_empty());
    }

    #[tokio::test]
    async fn missing_table_is_service_unavailable() {
        let state = CreateExpenseState {
            db_connection: Arc::new(Mutex::new(Connection::open_in_memory().unwrap())),
        };
        let form = ExpenseForm {
            category: Category::Food,
            amount: 10.0,
            description: String::new(),
            date: date!(2024 - 01 - 01),
        };

        let response = create_expense_endpoint(State(state), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
