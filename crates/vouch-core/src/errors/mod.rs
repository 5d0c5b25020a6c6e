mod storage_error;
mod vouch_error;

pub use storage_error::StorageError;
pub use vouch_error::VouchError;

/// Convenience alias used throughout the workspace.
pub type VouchResult<T> = Result<T, VouchError>;
