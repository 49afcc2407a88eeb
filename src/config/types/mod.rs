//! Configuration utility types.
//!
//! | Module  | Purpose                     |
//! |---------|-----------------------------|
//! | `error` | Configuration error types   |
//! | `field` | Config field path for diags |

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
