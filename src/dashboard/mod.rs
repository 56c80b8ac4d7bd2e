//! Dashboard module
//!
//! Provides an overview page with the total amount spent and charts of
//! spending per category and per day.

mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
