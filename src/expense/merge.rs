//! Adds an expense to its category, creating the category on first use.

use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};

use crate::{
    Error,
    expense::core::{Expense, NewExpense, get_expense, map_row_to_expense},
};

/// What [merge_expense] did with the new expense.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No expense had the category, so a new one was created.
    Created(Expense),
    /// The amount was added to the existing expense for the category.
    Updated(Expense),
}

impl MergeOutcome {
    /// The expense as stored after the merge.
    pub fn expense(&self) -> &Expense {
        match self {
            MergeOutcome::Created(expense) | MergeOutcome::Updated(expense) => expense,
        }
    }
}

/// Add `new_expense` to the stored expense with the same category, or create
/// a new expense if there is none.
///
/// On update the amount is accumulated while the description and date are
/// replaced with those of `new_expense`. Categories are compared exactly.
/// If there is more than one expense for the category, the oldest is updated.
///
/// The lookup and the write run in a single immediate transaction so that two
/// merges for an unseen category cannot both insert. There is no uniqueness
/// constraint on the category column, so this only holds for writers that go
/// through this function.
///
/// # Errors
/// Returns [Error::SqlError] if the transaction could not be started or
/// committed, or if any of the queries fail.
pub fn merge_expense(new_expense: &NewExpense, connection: &Connection) -> Result<MergeOutcome, Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let existing = transaction
        .query_row(
            "SELECT id, category, amount, description, date FROM expense
            WHERE category = ?1 ORDER BY id ASC LIMIT 1",
            params![new_expense.category],
            map_row_to_expense,
        )
        .optional()?;

    let outcome = match existing {
        Some(existing) => {
            transaction.execute(
                "UPDATE expense SET amount = amount + ?1, description = ?2, date = ?3 WHERE id = ?4",
                params![
                    new_expense.amount,
                    new_expense.description,
                    new_expense.date,
                    existing.id
                ],
            )?;

            MergeOutcome::Updated(get_expense(existing.id, &transaction)?)
        }
        None => {
            transaction.execute(
                "INSERT INTO expense (category, amount, description, date) VALUES (?1, ?2, ?3, ?4)",
                params![
                    new_expense.category,
                    new_expense.amount,
                    new_expense.description,
                    new_expense.date
                ],
            )?;

            MergeOutcome::Created(Expense {
                id: transaction.last_insert_rowid(),
                category: new_expense.category.clone(),
                amount: new_expense.amount,
                description: Some(new_expense.description.clone()),
                date: new_expense.date.clone(),
            })
        }
    };

    transaction.commit()?;

    match &outcome {
        MergeOutcome::Created(_) => tracing::info!(
            "Added new expense: {} - {} on {}.",
            new_expense.category,
            new_expense.amount,
            new_expense.date
        ),
        MergeOutcome::Updated(_) => tracing::info!(
            "Updated expense for category {}: {} on {}.",
            new_expense.category,
            new_expense.amount,
            new_expense.date
        ),
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use rusqlite::{Connection, params};

    use crate::{
        expense::core::{Expense, NewExpense, count_expenses, get_all_expenses},
        initialize_db,
    };

    use super::{MergeOutcome, merge_expense};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        connection
    }

    fn new_expense(category: &str, amount: f64, description: &str, date: &str) -> NewExpense {
        NewExpense {
            category: category.to_owned(),
            amount,
            description: description.to_owned(),
            date: date.to_owned(),
        }
    }

    #[test]
    fn creates_expense_for_new_category() {
        let connection = get_test_connection();

        let outcome = merge_expense(
            &new_expense("Food", 10.0, "lunch", "2024-01-01"),
            &connection,
        )
        .unwrap();

        let want = Expense {
            id: 1,
            category: "Food".to_owned(),
            amount: 10.0,
            description: Some("lunch".to_owned()),
            date: "2024-01-01".to_owned(),
        };
        assert_eq!(outcome, MergeOutcome::Created(want.clone()));
        assert_eq!(get_all_expenses(&connection), Ok(vec![want]));
    }

    #[test]
    fn accumulates_amount_and_overwrites_details_for_existing_category() {
        let connection = get_test_connection();
        merge_expense(
            &new_expense("Food", 10.0, "lunch", "2024-01-01"),
            &connection,
        )
        .unwrap();

        let outcome = merge_expense(
            &new_expense("Food", 5.0, "dinner", "2024-01-02"),
            &connection,
        )
        .unwrap();

        let want = Expense {
            id: 1,
            category: "Food".to_owned(),
            amount: 15.0,
            description: Some("dinner".to_owned()),
            date: "2024-01-02".to_owned(),
        };
        assert_eq!(outcome, MergeOutcome::Updated(want.clone()));
        assert_eq!(get_all_expenses(&connection), Ok(vec![want]));
    }

    #[test]
    fn keeps_one_expense_per_category() {
        let connection = get_test_connection();
        let additions = [
            ("Food", 10.0),
            ("Rent", 1200.0),
            ("Food", 2.5),
            ("Bills", 80.0),
            ("Rent", 1200.0),
            ("Food", 7.5),
        ];

        for (category, amount) in additions {
            merge_expense(
                &new_expense(category, amount, "", "2024-03-01"),
                &connection,
            )
            .unwrap();
        }

        let totals: Vec<(String, f64)> = get_all_expenses(&connection)
            .unwrap()
            .into_iter()
            .map(|expense| (expense.category, expense.amount))
            .collect();
        assert_eq!(
            totals,
            vec![
                ("Food".to_owned(), 20.0),
                ("Rent".to_owned(), 2400.0),
                ("Bills".to_owned(), 80.0),
            ]
        );
    }

    #[test]
    fn categories_are_case_sensitive() {
        let connection = get_test_connection();

        merge_expense(&new_expense("food", 1.0, "", "2024-01-01"), &connection).unwrap();
        let outcome =
            merge_expense(&new_expense("Food", 1.0, "", "2024-01-01"), &connection).unwrap();

        assert!(matches!(outcome, MergeOutcome::Created(_)));
        assert_eq!(count_expenses(&connection), Ok(2));
    }

    #[test]
    fn negative_amounts_are_accumulated() {
        let connection = get_test_connection();
        merge_expense(&new_expense("Food", 10.0, "", "2024-01-01"), &connection).unwrap();

        let outcome =
            merge_expense(&new_expense("Food", -25.0, "refund", "2024-01-03"), &connection)
                .unwrap();

        assert_eq!(outcome.expense().amount, -15.0);
    }

    #[test]
    fn updates_oldest_expense_when_category_is_duplicated() {
        let connection = get_test_connection();
        for amount in [1.0, 2.0] {
            connection
                .execute(
                    "INSERT INTO expense (category, amount, description, date) VALUES ('Food', ?1, '', '2024-01-01')",
                    params![amount],
                )
                .unwrap();
        }

        let outcome =
            merge_expense(&new_expense("Food", 10.0, "", "2024-01-02"), &connection).unwrap();

        assert_eq!(outcome.expense().id, 1);
        assert_eq!(outcome.expense().amount, 11.0);
        assert_eq!(count_expenses(&connection), Ok(2));
    }
}
