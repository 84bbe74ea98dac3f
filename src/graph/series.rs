use crate::expense::Expense;

/// The category labels and amounts plotted by the expenses chart.
///
/// The two sequences are parallel: `amounts[i]` is the amount for
/// `categories[i]`. Expenses are neither deduplicated nor aggregated, so each
/// stored expense becomes one bar, in the order the expenses were given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub amounts: Vec<f64>,
}

impl CategorySeries {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let (categories, amounts) = expenses
            .iter()
            .map(|expense| (expense.category.clone(), expense.amount))
            .unzip();

        Self {
            categories,
            amounts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::expense::Expense;

    use super::CategorySeries;

    fn expense(id: i64, category: &str, amount: f64) -> Expense {
        Expense {
            id,
            category: category.to_owned(),
            amount,
            description: None,
            date: "2024-01-01".to_owned(),
        }
    }

    #[test]
    fn projects_expenses_in_order() {
        let expenses = vec![
            expense(1, "Rent", 1200.0),
            expense(2, "Food", 15.0),
            expense(4, "Bills", 80.25),
        ];

        let series = CategorySeries::from_expenses(&expenses);

        assert_eq!(series.categories, vec!["Rent", "Food", "Bills"]);
        assert_eq!(series.amounts, vec![1200.0, 15.0, 80.25]);
    }

    #[test]
    fn keeps_duplicate_categories_as_separate_bars() {
        let expenses = vec![expense(1, "Food", 1.0), expense(2, "Food", 2.0)];

        let series = CategorySeries::from_expenses(&expenses);

        assert_eq!(series.categories.len(), series.amounts.len());
        assert_eq!(series.categories, vec!["Food", "Food"]);
        assert_eq!(series.amounts, vec![1.0, 2.0]);
    }

    #[test]
    fn empty_with_no_expenses() {
        let series = CategorySeries::from_expenses(&[]);

        assert!(series.is_empty());
        assert_eq!(series, CategorySeries::default());
    }
}
