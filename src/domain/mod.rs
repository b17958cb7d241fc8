//! Domain models and types for Embark.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Source types** ([`RawRecord`], [`Record`], [`Page`])
//! - **Destination types** ([`EmbeddingVector`], [`Point`], [`Payload`])
//! - **Error types** ([`EmbarkError`], [`FetchError`], [`ProvisionError`], [`WriteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EmbarkError>`] or one of the
//! stage-specific errors, which convert into [`EmbarkError`] with `?`:
//!
//! ```rust
//! use embark::domain::{EmbarkError, FetchError, Result};
//!
//! fn fetch() -> std::result::Result<(), FetchError> {
//!     Err(FetchError::Transport("connection refused".to_string()))
//! }
//!
//! fn example() -> Result<()> {
//!     fetch()?;
//!     Ok(())
//! }
//!
//! assert!(matches!(example(), Err(EmbarkError::Fetch(_))));
//! ```

pub mod errors;
pub mod point;
pub mod record;
pub mod result;

pub use errors::{EmbarkError, FetchError, ProvisionError, WriteError};
pub use point::{EmbeddingVector, Payload, Point};
pub use record::{Page, RawRecord, Record};
pub use result::Result;
