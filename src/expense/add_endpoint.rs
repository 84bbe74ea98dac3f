//! Defines the endpoint for adding an expense.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State, rejection::FormRejection},
    response::Response,
};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer};

use crate::{
    AppState, Error, endpoints,
    expense::{NewExpense, merge_expense},
    routing::found_redirect,
};

/// The state needed to add an expense.
#[derive(Debug, Clone)]
pub struct AddExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AddExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for adding an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub category: String,
    /// The amount in dollars.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub description: String,
    pub date: String,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_amount(&text).map_err(serde::de::Error::custom)
}

/// Parse an amount as typed into the form.
///
/// Surrounding whitespace is ignored and single underscores may separate
/// digits, e.g. " 1_000.50 ".
fn parse_amount(text: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let mut number = String::with_capacity(trimmed.len());

    for (i, c) in trimmed.char_indices() {
        if c != '_' {
            number.push(c);
            continue;
        }

        let between_digits = i > 0
            && bytes[i - 1].is_ascii_digit()
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);

        if !between_digits {
            return Err(format!("invalid amount \"{text}\""));
        }
    }

    number
        .parse::<f64>()
        .map_err(|error| format!("invalid amount \"{text}\": {error}"))
}

impl From<ExpenseForm> for NewExpense {
    fn from(form: ExpenseForm) -> Self {
        Self {
            category: form.category,
            amount: form.amount,
            description: form.description,
            date: form.date,
        }
    }
}

/// A route handler for adding an expense to its category, redirects to the
/// expenses page on success.
///
/// A form with a missing field or an amount that is not a number fails the
/// request with a 500 response.
pub async fn add_expense_endpoint(
    State(state): State<AddExpenseState>,
    form: Result<Form<ExpenseForm>, FormRejection>,
) -> Result<Response, Error> {
    let Form(form) = form.map_err(|rejection| Error::InvalidForm(rejection.body_text()))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    merge_expense(&form.into(), &connection)?;

    Ok(found_redirect(endpoints::ROOT))
}
