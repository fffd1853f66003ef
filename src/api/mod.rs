//! HTTP API module for the salary engine.
//!
//! This module provides the REST API endpoints for take-home pay
//! breakdowns and monthly budgets.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BreakdownRequest, BudgetRequest};
pub use response::{ApiError, ApiErrorResponse, BudgetResponse};
pub use state::AppState;
