use rusqlite::{Connection, Row, params};

use crate::Error;

/// Alias for the integer type used for expense IDs.
pub type ExpenseId = i64;

/// The running total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// The label the expense is grouped by.
    ///
    /// Adding an expense with a category that already exists adds to that
    /// record rather than creating a new one.
    pub category: String,
    /// The total amount for the category.
    pub amount: f64,
    /// The description given with the most recent addition.
    pub description: Option<String>,
    /// The date given with the most recent addition, stored as entered.
    pub date: String,
}

/// The data needed to add an expense to a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The category to add the amount to.
    pub category: String,
    /// The amount to add, may be negative.
    pub amount: f64,
    /// Replaces the description of an existing expense.
    pub description: String,
    /// Replaces the date of an existing expense.
    pub date: String,
}

pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT,
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_expense(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let category = row.get(1)?;
    let amount = row.get(2)?;
    let description = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        category,
        amount,
        description,
        date,
    })
}

/// Get every expense in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if the query could not be prepared or a row
/// could not be read.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, category, amount, description, date FROM expense ORDER BY id ASC")?
        .query_map([], map_row_to_expense)?
        .map(|expense_result| expense_result.map_err(Error::from))
        .collect()
}

/// Get the expense with the given `id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .query_row(
            "SELECT id, category, amount, description, date FROM expense WHERE id = ?1",
            params![id],
            map_row_to_expense,
        )
        .map_err(Error::from)
}

/// The number of stored expenses.
pub fn count_expenses(connection: &Connection) -> Result<usize, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(*) FROM expense", [], |row| row.get(0))?;

    Ok(count as usize)
}
