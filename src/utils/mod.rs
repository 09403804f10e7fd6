//! Utility modules
//!
//! This module contains common utilities used throughout the client,
//! including error handling, logging setup, and display helpers.

pub mod errors;
pub mod logging;
pub mod helpers;

pub use errors::{get_error_message, EventHubError, Result};
