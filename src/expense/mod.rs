//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, its `Category` and the `ExpenseStore` trait
//! - Pure functions for filtering, totalling and aggregating expenses
//! - View handlers for adding, viewing and deleting expenses

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod expenses_page;
mod processor;

pub use core::{Category, Expense, ExpenseStore, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use create_page::get_new_expense_page;
pub use delete_endpoint::delete_all_expenses_endpoint;
pub use expenses_page::get_expenses_page;
pub use processor::{
    ExpenseFilter, aggregate_by_category, aggregate_by_date, fetch_all, fetch_or_empty, filter,
    total,
};
