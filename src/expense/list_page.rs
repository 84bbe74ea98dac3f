//! Displays every expense along with the form for adding expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{Expense, get_all_expenses},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, link,
    },
};

/// The state needed for the [get_expenses_page](crate::expense::get_expenses_page) route handler.
#[derive(Debug, Clone)]
pub struct ExpenseListState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The expense data to display in the view
#[derive(Debug, PartialEq)]
struct ExpenseTableRow {
    category: String,
    amount: f64,
    description: String,
    date: String,
    delete_url: String,
}

impl From<Expense> for ExpenseTableRow {
    fn from(expense: Expense) -> Self {
        Self {
            delete_url: format_endpoint(endpoints::DELETE_EXPENSE, expense.id),
            category: expense.category,
            amount: expense.amount,
            description: expense.description.unwrap_or_default(),
            date: expense.date,
        }
    }
}

fn expenses_view(expenses: &[ExpenseTableRow]) -> Markup {
    let table_row = |expense: &ExpenseTableRow| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th scope="row" class=(TABLE_CELL_STYLE) { (expense.category) }

                td class="table-cell amount" { (format_currency(expense.amount)) }

                td class=(TABLE_CELL_STYLE) { (expense.description) }

                td class=(TABLE_CELL_STYLE) { (expense.date) }

                td class=(TABLE_CELL_STYLE)
                {
                    a href=(expense.delete_url) class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        )
    };

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section
            {
                header class="page-header"
                {
                    h1 { "Expenses" }

                    a href=(endpoints::GRAPH_VIEW) class=(LINK_STYLE) { "View graph" }
                }

                table class="table"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            (table_row(expense))
                        }

                        @if expenses.is_empty() {
                            tr
                            {
                                td colspan="5" class="table-cell empty"
                                {
                                    "No expenses yet. Add one with the form below."
                                }
                            }
                        }
                    }
                }
            }

            (add_expense_form())
        }
    );

    base("Expenses", &content)
}

fn add_expense_form() -> Markup {
    html!(
        section class=(FORM_CONTAINER_STYLE)
        {
            h2 { "Add Expense" }

            form method="post" action=(endpoints::ADD_EXPENSE) class="form"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    input
                        id="category"
                        name="category"
                        type="text"
                        required
                        placeholder="Food"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        id="amount"
                        name="amount"
                        type="number"
                        step="0.01"
                        required
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        id="description"
                        name="description"
                        type="text"
                        placeholder="Lunch"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        id="date"
                        name="date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }

            p class="form-hint"
            {
                "Adding to an existing category adds to its total. See the totals as a "
                (link(endpoints::GRAPH_VIEW, "bar chart"))
                "."
            }
        }
    )
}

/// Renders the page listing every expense.
pub async fn get_expenses_page(State(state): State<ExpenseListState>) -> Result<Response, Error> {
    tracing::info!("Rendering the home page.");

    let expenses: Vec<ExpenseTableRow> = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("could not get all expenses: {error}"))?
            .into_iter()
            .map(ExpenseTableRow::from)
            .collect()
    };

    Ok(expenses_view(&expenses).into_response())
}


#[cfg(test)]
mod get_expenses_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        expense::{NewExpense, merge_expense},
        initialize_db,
        test_utils::{assert_status_ok, parse_html_document},
    };

    use super::{ExpenseListState, get_expenses_page};

    #[tokio::test]
    async fn shows_one_row_per_category() {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        let additions = [("Food", 1.0), ("Rent", 2.0), ("Food", 3.0), ("Fun", 4.0), ("Rent", 5.0)];
        for (category, amount) in additions {
            merge_expense(
                &NewExpense {
                    category: category.to_owned(),
                    amount,
                    description: String::new(),
                    date: "2024-01-01".to_owned(),
                },
                &connection,
            )
            .unwrap();
        }
        let state = ExpenseListState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_expenses_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        let selector = Selector::parse("tbody tr th").unwrap();
        let categories: Vec<String> = html
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(categories, vec!["Food", "Rent", "Fun"]);
    }
}
