//! Resource clients for the backend's HTTP surface.
//!
//! Each resource is a thin request builder over the shared retried
//! transport: validate params locally, keep unset optionals off the wire,
//! deserialize typed results. List endpoints preserve the server's
//! relevance ordering.

pub mod app_configurations;
pub mod apps;
pub mod functions;
pub mod linked_accounts;

use serde::{Deserialize, Serialize};

pub use app_configurations::{
    AppConfiguration, AppConfigurationsListParams, AppConfigurationsResource,
};
pub use apps::{AppDetails, AppSummary, AppsResource};
pub use functions::{FunctionSummary, FunctionsResource};
pub use linked_accounts::{
    LinkedAccount, LinkedAccountsListParams, LinkedAccountsResource, SecurityCredentials,
};

/// Authentication mechanism an app requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityScheme {
    NoAuth,
    ApiKey,
    Oauth2,
}
