//! Aipolabs - Rust SDK for the Aipolabs ACI
//!
//! This library lets LLM-based agents discover and invoke third-party
//! integrations ("apps"/"functions") hosted behind the Aipolabs backend.
//! It wraps the authenticated HTTP API, ships the meta-function schemas an
//! LLM uses to search and execute indexed functions, and dispatches
//! incoming tool-calls to the right handler.
//!
//! ```no_run
//! use aipolabs::Aipolabs;
//! use serde_json::json;
//!
//! # async fn run() -> aipolabs::Result<()> {
//! let client = Aipolabs::new(None, None)?; // reads AIPOLABS_API_KEY
//!
//! // Hand the meta-function schemas to your LLM, then route whatever it
//! // calls back through the dispatcher:
//! let result = client
//!     .handle_function_call(
//!         "BRAVE_SEARCH__WEB_SEARCH",
//!         json!({"query": "test"}),
//!         Some("end-user-123"),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod logging;
mod transport;

pub mod meta_functions;
pub mod resources;

pub use client::{Aipolabs, CallKind};
pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};
pub use error::{AipolabsError, Result};
pub use logging::{init_logging, redact_headers};

pub use meta_functions::{
    FunctionExecutionParams, FunctionExecutionResult, GetFunctionDefinitionParams,
    SearchAppsParams, SearchFunctionsParams,
};
pub use resources::{
    AppConfiguration, AppDetails, AppSummary, FunctionSummary, LinkedAccount, SecurityCredentials,
    SecurityScheme,
};
