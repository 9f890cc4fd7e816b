//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_core::prelude::*;` to import all essential types.

pub use crate::decision::Decision;
pub use crate::operation::{OperationParseError, ToolArgs, ToolOperation};
pub use crate::types::{RiskLevel, Timestamp, UserId};
