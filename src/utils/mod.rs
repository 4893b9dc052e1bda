//! Utility functions for code generation and input checks.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - Constraint violation classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
