//! The URIs served by the app.
//!
//! For endpoints that take a parameter, e.g., '/delete/{expense_id}', use [format_endpoint].

/// The page listing every expense along with the form for adding expenses.
pub const ROOT: &str = "/";
/// The route the add expense form posts to.
pub const ADD_EXPENSE: &str = "/add";
/// The route for deleting a single expense.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";
/// The page with a bar chart of the amount spent per category.
pub const GRAPH_VIEW: &str = "/graph";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/delete/{expense_id}', '{expense_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
