//! Process-wide logging setup and header redaction.

use once_cell::sync::OnceCell;
use reqwest::header::HeaderMap;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceCell<()> = OnceCell::new();

const SENSITIVE_HEADERS: [&str; 2] = ["x-api-key", "authorization"];

/// Initialize the global tracing subscriber once. Safe to call repeatedly;
/// later calls (and an already-installed subscriber from the host
/// application) are no-ops.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("aipolabs=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Render headers for logging with credential values masked.
///
/// `x-api-key` and `authorization` are matched case-insensitively; all
/// other headers pass through untouched.
pub fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let key = name.as_str().to_string();
            let value = if SENSITIVE_HEADERS.contains(&key.to_ascii_lowercase().as_str()) {
                "<redacted>".to_string()
            } else {
                value.to_str().unwrap_or("<non-ascii>").to_string()
            };
            (key, value)
        })
        .collect()
}
