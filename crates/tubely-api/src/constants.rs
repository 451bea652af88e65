//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path the local storage backend is served under
pub const ASSETS_PATH: &str = "/assets";

/// Allowance on top of a file budget for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

