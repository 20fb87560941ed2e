//! Shared helpers for the wiremock-backed integration tests.

use std::time::Duration;

use aipolabs::{Aipolabs, ClientConfig, RetryConfig};

pub const TEST_API_KEY: &str = "test-api-key";

/// Client pointed at a mock server, with backoff delays shrunk so retry
/// tests stay fast. Attempt counts match the production default (3).
pub fn test_client(base_url: &str) -> Aipolabs {
    let config = ClientConfig::new(Some(TEST_API_KEY.to_string()), Some(base_url.to_string()))
        .expect("test client config");
    let retry = RetryConfig {
        max_attempts: 3,
        multiplier: Duration::from_millis(1),
        min_wait: Duration::from_millis(1),
        max_wait: Duration::from_millis(5),
    };
    Aipolabs::with_config(config, retry).expect("test client")
}
