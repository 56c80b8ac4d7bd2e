use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    expense::{
        ExpenseStore,
        expenses_page::{EXPENSES_CONTENT_ID, no_expenses_message},
    },
};

/// The state needed to delete expenses.
#[derive(Debug, Clone)]
pub struct DeleteExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting every expense.
///
/// Responds with a warning alert followed by the empty expenses page content,
/// which replaces the table the request came from.
pub async fn delete_all_expenses_endpoint(State(state): State<DeleteExpensesState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match connection.delete_all() {
        Ok(deleted_count) => {
            tracing::info!("deleted all {deleted_count} expenses");

            let alert = Alert::WarningSimple {
                message: "All expenses deleted!".to_owned(),
            };

            Html(
                html! {
                    div id=(EXPENSES_CONTENT_ID)
                    {
                        (alert.into_markup())
                        (no_expenses_message())
                    }
                }
                .into_string(),
            )
            .into_response()
        }
        Err(error) => {
            tracing::error!("could not delete expenses: {error}");
            error.into_alert_response()
        }
    }
}
