//! Defines the app level error type and its conversion to rendered HTML pages.
use axum::response::{IntoResponse, Response};

use crate::{internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The submitted form was missing a field or had a field that could not
    /// be parsed, e.g. a non-numeric amount.
    ///
    /// There is no user facing validation, the request simply fails.
    #[error("could not parse the submitted form: {0}")]
    InvalidForm(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The expenses chart could not be drawn or encoded as an image.
    #[error("could not render the chart: {0}")]
    ChartRender(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidForm(reason) => {
                tracing::warn!("Rejected form submission: {reason}");
                InternalServerError {
                    description: "Could not read the submitted form",
                    fix: "Check that every field is filled in and that the amount is a number.",
                }
                .into_response()
            }
            Error::ChartRender(reason) => {
                tracing::error!("Could not render the expenses chart: {reason}");
                InternalServerError {
                    description: "Could not draw the chart",
                    fix: "Try again later or check the server logs",
                }
                .into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
