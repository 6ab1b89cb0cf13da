//! Result type alias for tekport operations

use crate::domain::errors::TekportError;

/// Result type used throughout tekport
pub type Result<T> = std::result::Result<T, TekportError>;
