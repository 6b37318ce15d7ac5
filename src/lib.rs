pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod packager;
pub mod template;
pub mod version;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::{PackagerError, Result};
pub use metadata::PackageMetadata;
pub use packager::{PackageRequest, RenderOptions, Rendered, generate};
pub use template::{Template, substitute};
pub use version::normalize_version;
