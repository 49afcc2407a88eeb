//! Path and URL utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`)
//! - [`route`]: URL utilities (`is_external_link`, `resolve_relative_link`)

pub mod fs;
pub mod route;

pub use fs::normalize_path;
pub use route::resolve_relative_link;
