//! Defines the core data models and database queries for expenses.

use std::fmt::Display;

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// What an expense was spent on.
///
/// New expenses may only use one of the five named categories, but values read
/// back from the database are not validated. Any other text is kept as
/// [Category::Unrecognised] so it can still be displayed and summed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Groceries, restaurants, snacks.
    Food,
    /// Fares, fuel, accommodation.
    Travel,
    /// Clothes, electronics, household goods.
    Shopping,
    /// Rent, utilities, subscriptions.
    Bills,
    /// Anything else.
    Other,
    /// A category stored by something other than the entry form.
    Unrecognised(String),
}

impl Category {
    /// The categories that can be chosen when adding an expense.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    /// The name of the category as it is stored and displayed.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
            Category::Unrecognised(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Food" => Category::Food,
            "Travel" => Category::Travel,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            "Other" => Category::Other,
            _ => Category::Unrecognised(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_owned())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognised(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Category::from)
    }
}

/// Money spent on something.
///
/// Expenses have no identity: two expenses with the same fields are
/// indistinguishable once they have been read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent.
    pub amount: f64,
    /// A free-text note, may be empty.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
}

impl Expense {
    /// Create a new expense.
    pub fn new(category: Category, amount: f64, description: &str, date: Date) -> Self {
        Self {
            category,
            amount,
            description: description.to_owned(),
            date,
        }
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Handles the persistence of expenses.
///
/// Implementations assign and keep any identity they need internally, it is
/// never returned to callers.
pub trait ExpenseStore {
    /// Persist a single expense.
    fn insert(&self, expense: &Expense) -> Result<(), Error>;

    /// Retrieve every stored expense in the order they were inserted.
    fn find_all(&self) -> Result<Vec<Expense>, Error>;

    /// Remove every stored expense, returning how many were removed.
    fn delete_all(&self) -> Result<usize, Error>;
}

impl ExpenseStore for Connection {
    fn insert(&self, expense: &Expense) -> Result<(), Error> {
        self.execute(
            "INSERT INTO expense (category, amount, description, date) VALUES (?1, ?2, ?3, ?4)",
            (
                &expense.category,
                expense.amount,
                &expense.description,
                expense.date,
            ),
        )?;

        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Expense>, Error> {
        self.prepare("SELECT category, amount, description, date FROM expense ORDER BY id ASC")?
            .query_map([], map_expense_row)?
            .collect::<Result<Vec<Expense>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }

    fn delete_all(&self) -> Result<usize, Error> {
        self.execute("DELETE FROM expense", ())
            .map_err(|error| error.into())
    }
}

/// Map a database row to an [Expense].
///
/// The row must contain the columns category, amount, description and date, in that order.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        category: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
    })
}

/// Create the expense table in the database.
///
/// There are no constraints on the category or amount, values are checked
/// by the entry form before they are written.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use super::{Category, Expense, ExpenseStore, create_expense_table};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_expense_table(&connection).unwrap();
        connection
    }

    #[test]
    fn find_all_returns_expenses_in_insertion_order() {
        let connection = get_test_connection();
        let want = vec![
            Expense::new(Category::Travel, 1000.0, "cab", date!(2024 - 01 - 02)),
            Expense::new(Category::Food, 250.0, "lunch", date!(2024 - 01 - 01)),
        ];

        for expense in &want {
            connection.insert(expense).unwrap();
        }

        let got = connection.find_all().unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn find_all_on_empty_store_returns_empty_vec() {
        let connection = get_test_connection();

        let got = connection.find_all().unwrap();

        assert!(got.is_empty(), "want no expenses, got {got:#?}");
    }

    #[test]
    fn delete_all_then_find_all_returns_empty_vec() {
        let connection = get_test_connection();
        connection
            .insert(&Expense::new(Category::Bills, 80.0, "", date!(2024 - 03 - 01)))
            .unwrap();
        connection
            .insert(&Expense::new(Category::Other, 5.0, "", date!(2024 - 03 - 02)))
            .unwrap();

        let deleted = connection.delete_all().unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(connection.find_all().unwrap(), Vec::new());
    }

    #[test]
    fn reads_unrecognised_category_without_error() {
        let connection = get_test_connection();
        connection
            .execute(
                "INSERT INTO expense (category, amount, description, date)
                VALUES ('Gifts', 12.5, 'flowers', '2024-02-14')",
                (),
            )
            .unwrap();

        let got = connection.find_all().unwrap();

        assert_eq!(
            got,
            vec![Expense::new(
                Category::Unrecognised("Gifts".to_owned()),
                12.5,
                "flowers",
                date!(2024 - 02 - 14)
            )]
        );
    }

    #[test]
    fn query_fails_when_table_is_missing() {
        let connection = Connection::open_in_memory().unwrap();

        let result = connection.find_all();

        assert!(result.is_err(), "want error, got {result:?}");
    }

    #[test]
    fn category_round_trips_through_string() {
        for category in Category::ALL {
            let name = category.to_string();
            assert_eq!(Category::from(name), category);
        }

        assert_eq!(
            String::from(Category::Unrecognised("Pets".to_owned())),
            "Pets"
        );
    }
}
