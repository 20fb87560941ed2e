//! Apps resource: `GET apps/search` and `GET apps/{name}`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::functions::FunctionSummary;
use crate::error::{AipolabsError, Result};
use crate::meta_functions::SearchAppsParams;
use crate::transport::Transport;

/// Read-only projection of an app returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSummary {
    pub name: String,
    pub description: String,
}

/// Full app record returned by `GET apps/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDetails {
    pub name: String,
    pub description: String,
    pub functions: Vec<FunctionSummary>,
}

pub struct AppsResource {
    transport: Arc<Transport>,
}

impl AppsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Search apps, sorted by the server by relevance to the intent.
    pub async fn search(&self, params: SearchAppsParams) -> Result<Vec<AppSummary>> {
        let pairs = params.query_pairs();
        tracing::info!(params = ?pairs, "searching apps");
        let data = self.transport.get("apps/search", &pairs).await?;
        serde_json::from_value(data)
            .map_err(|e| AipolabsError::validation(format!("unexpected apps/search response: {e}")))
    }

    pub async fn get(&self, app_name: &str) -> Result<AppDetails> {
        tracing::info!(app_name, "getting app");
        let data = self.transport.get(&format!("apps/{app_name}"), &[]).await?;
        serde_json::from_value(data)
            .map_err(|e| AipolabsError::validation(format!("unexpected apps/{app_name} response: {e}")))
    }
}
