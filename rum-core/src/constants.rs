/// The ingestion path the flushed payload is posted to.
pub const DEFAULT_ENDPOINT: &str = "/api/perf";

/// The content type of a beacon carrying a string body.
pub const BEACON_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// The user agent native transports report.
pub const USER_AGENT: &str = concat!("rum.rust/", env!("CARGO_PKG_VERSION"));
