//! Expenses: the single record type of the app, one per category.

mod add_endpoint;
mod core;
mod delete_endpoint;
mod list_page;
mod merge;

pub use add_endpoint::add_expense_endpoint;
pub use core::{
    Expense, ExpenseId, NewExpense, count_expenses, create_expense_table, get_all_expenses,
    get_expense,
};
pub use delete_endpoint::delete_expense_endpoint;
pub use list_page::get_expenses_page;
pub use merge::{MergeOutcome, merge_expense};
