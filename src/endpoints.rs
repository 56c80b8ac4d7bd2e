//! The API endpoints URIs.

/// The root route which redirects to the add expense page.
pub const ROOT: &str = "/";
/// The page for adding a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page for viewing, filtering and deleting expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page summarising expenses with charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create expenses (POST) or delete all of them (DELETE).
pub const EXPENSES_API: &str = "/api/expenses";
