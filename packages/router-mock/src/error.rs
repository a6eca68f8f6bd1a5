//! Errors reported by the router.

use thiserror::Error;

/// An error that aborts a navigation before the router state is touched.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A placeholder in the target pathname had no value in the target query.
    #[error("missing value for parameter `{param}` of `{pattern}`")]
    MissingParam {
        /// The name of the placeholder.
        param: String,
        /// The pathname that was being interpolated.
        pattern: String,
    },
}
