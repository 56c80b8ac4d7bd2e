//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// Create all of the application's tables if they do not already exist.
///
/// # Errors
/// Returns an [Error::StorageUnavailable] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_expense_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
    }
}
