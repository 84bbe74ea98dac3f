//! Displays the expenses bar chart.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::get_all_expenses,
    graph::{
        CategorySeries,
        chart::{CHART_HEIGHT, CHART_WIDTH, render_chart_data_uri},
    },
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
};

/// The state needed for the [get_graph_page](crate::graph::get_graph_page) route handler.
#[derive(Debug, Clone)]
pub struct GraphState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GraphState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn graph_view(chart_uri: &str, is_empty: bool) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="page-header"
            {
                h1 { "Expenses by Category" }

                a href=(endpoints::ROOT) class=(LINK_STYLE) { "Back to expenses" }
            }

            img
                src=(chart_uri)
                alt="Bar chart of the total amount per category"
                width=(CHART_WIDTH)
                height=(CHART_HEIGHT)
                class="chart";

            @if is_empty {
                p class="empty"
                {
                    "There are no expenses to chart yet. "
                    (link(endpoints::ROOT, "Add an expense"))
                    " to get started."
                }
            }
        }
    );

    base("Graph", &content)
}

/// Renders the page with a bar chart of the amount for each category.
///
/// The chart is drawn from scratch on every request.
pub async fn get_graph_page(State(state): State<GraphState>) -> Result<Response, Error> {
    tracing::info!("Generating graph for expenses.");

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("could not get all expenses: {error}"))?
    };

    let series = CategorySeries::from_expenses(&expenses);
    let is_empty = series.is_empty();

    let chart_uri = tokio::task::spawn_blocking(move || render_chart_data_uri(&series))
        .await
        .map_err(|error| Error::ChartRender(format!("chart task failed: {error}")))??;

    tracing::info!("Graph generated successfully.");

    Ok(graph_view(&chart_uri, is_empty).into_response())
}
