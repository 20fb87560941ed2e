//! Linked-accounts resource: per-end-user credential bindings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::SecurityScheme;
use crate::error::{AipolabsError, Result};
use crate::transport::Transport;

/// Credentials embedded in a linked account, limited to what a client may
/// see. Shape follows the account's `security_scheme`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityCredentials {
    Oauth2 { access_token: String },
    ApiKey { secret_key: String },
    NoAuth {},
}

/// A per-end-user credential binding that authorizes execution of an app's
/// functions under a specific security scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub id: String,
    pub project_id: String,
    pub app_name: String,
    pub linked_account_owner_id: String,
    pub security_scheme: SecurityScheme,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_credentials: Option<SecurityCredentials>,
}

/// Filters for listing linked accounts.
#[derive(Debug, Clone, Default)]
pub struct LinkedAccountsListParams {
    pub app_name: Option<String>,
    pub linked_account_owner_id: Option<String>,
}

impl LinkedAccountsListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(app_name) = &self.app_name {
            pairs.push(("app_name", app_name.clone()));
        }
        if let Some(owner) = &self.linked_account_owner_id {
            pairs.push(("linked_account_owner_id", owner.clone()));
        }
        pairs
    }
}

pub struct LinkedAccountsResource {
    transport: Arc<Transport>,
}

impl LinkedAccountsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, params: LinkedAccountsListParams) -> Result<Vec<LinkedAccount>> {
        let pairs = params.query_pairs();
        tracing::info!(params = ?pairs, "listing linked accounts");
        let data = self.transport.get("linked-accounts", &pairs).await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected linked-accounts response: {e}"))
        })
    }

    pub async fn get(&self, linked_account_id: &str) -> Result<LinkedAccount> {
        tracing::info!(linked_account_id, "getting linked account");
        let data = self
            .transport
            .get(&format!("linked-accounts/{linked_account_id}"), &[])
            .await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected linked-account response: {e}"))
        })
    }

    /// Enable or disable a linked account without unlinking it.
    pub async fn update(&self, linked_account_id: &str, enabled: bool) -> Result<LinkedAccount> {
        tracing::info!(linked_account_id, enabled, "updating linked account");
        let body = json!({ "enabled": enabled });
        let data = self
            .transport
            .patch(&format!("linked-accounts/{linked_account_id}"), &body)
            .await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected linked-account response: {e}"))
        })
    }

    pub async fn delete(&self, linked_account_id: &str) -> Result<()> {
        tracing::info!(linked_account_id, "deleting linked account");
        self.transport
            .delete(&format!("linked-accounts/{linked_account_id}"))
            .await?;
        Ok(())
    }
}
