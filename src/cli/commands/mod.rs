//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod status;
pub mod validate;

use crate::domain::EmbarkError;

/// Exit code for an error raised before an export could start
pub(crate) fn exit_code_for(error: &EmbarkError) -> i32 {
    match error {
        EmbarkError::Configuration(_) => 2,
        EmbarkError::Fetch(_) | EmbarkError::Provision(_) => 4,
        _ => 5,
    }
}
