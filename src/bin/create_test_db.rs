use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{Category, Expense, ExpenseStore, initialize_db};

/// How many days back from today the sample expenses are spread over.
const SAMPLE_DAYS: i64 = 30;

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Adding sample expenses...");

    let expenses = sample_expenses();
    for expense in &expenses {
        conn.insert(expense)?;
    }

    println!("Added {} expenses. Success!", expenses.len());

    Ok(())
}

/// A month of everyday spending ending today.
fn sample_expenses() -> Vec<Expense> {
    let today = OffsetDateTime::now_utc().date();
    let mut expenses = Vec::new();

    for days_ago in (0..SAMPLE_DAYS).rev() {
        let date = today - Duration::days(days_ago);

        expenses.push(Expense::new(
            Category::Food,
            (120 + (days_ago * 37) % 280) as f64,
            "Lunch",
            date,
        ));

        match days_ago % 7 {
            0 => expenses.push(Expense::new(
                Category::Shopping,
                1499.0,
                "Weekly groceries and household supplies",
                date,
            )),
            3 => expenses.push(Expense::new(Category::Travel, 350.0, "Cab to office", date)),
            _ => {}
        }

        if days_ago == SAMPLE_DAYS - 1 {
            expenses.push(Expense::new(Category::Bills, 12000.0, "Rent", date));
            expenses.push(Expense::new(Category::Bills, 899.0, "Electricity", date));
        }

        if days_ago == SAMPLE_DAYS / 2 {
            expenses.push(Expense::new(Category::Other, 500.0, "", date));
        }
    }

    expenses
}
