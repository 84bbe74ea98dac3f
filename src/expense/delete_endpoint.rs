//! Defines the endpoint for deleting an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::Response,
};
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, expense::ExpenseId, routing::found_redirect};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the expenses page on
/// success.
///
/// Responds with the 404 page if there is no expense with the ID, including
/// when the ID is not an integer.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Response, Error> {
    let Path(expense_id) = expense_id.map_err(|rejection| {
        tracing::debug!("Invalid expense ID: {}", rejection.body_text());
        Error::NotFound
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_expense(expense_id, &connection)? {
        0 => Err(Error::NotFound),
        _ => {
            tracing::info!("Deleted expense with ID: {expense_id}.");
            Ok(found_redirect(endpoints::ROOT))
        }
    }
}

type RowsAffected = usize;

fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}
