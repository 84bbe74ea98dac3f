//! Application router configuration.

use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{add_expense_endpoint, delete_expense_endpoint, get_expenses_page},
    graph::get_graph_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::ADD_EXPENSE, post(add_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, get(delete_expense_endpoint))
        .route(endpoints::GRAPH_VIEW, get(get_graph_page))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A `302 Found` response that sends the client to `uri`.
///
/// `axum::response::Redirect` only offers 303, 307 and 308.
pub(crate) fn found_redirect(uri: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, uri.to_owned())]).into_response()
}
