//! App-configurations resource: project-level app setup.
//!
//! Lifecycle is fully server-owned; the SDK only mirrors the records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SecurityScheme;
use crate::error::{AipolabsError, Result};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfiguration {
    pub app_name: String,
    pub security_scheme: SecurityScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_scheme_overrides: Option<Value>,
    pub all_functions_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_functions: Option<Vec<String>>,
}

/// Filters for listing app configurations.
#[derive(Debug, Clone, Default)]
pub struct AppConfigurationsListParams {
    pub app_names: Option<Vec<String>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl AppConfigurationsListParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(app_names) = &self.app_names {
            for app_name in app_names {
                pairs.push(("app_names", app_name.clone()));
            }
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Serialize)]
struct AppConfigurationCreate<'a> {
    app_name: &'a str,
    security_scheme: SecurityScheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_scheme_overrides: Option<Value>,
    all_functions_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled_functions: Option<Vec<String>>,
}

pub struct AppConfigurationsResource {
    transport: Arc<Transport>,
}

impl AppConfigurationsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        params: AppConfigurationsListParams,
    ) -> Result<Vec<AppConfiguration>> {
        let pairs = params.query_pairs();
        tracing::info!(params = ?pairs, "listing app configurations");
        let data = self.transport.get("app-configurations", &pairs).await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected app-configurations response: {e}"))
        })
    }

    pub async fn get(&self, app_name: &str) -> Result<AppConfiguration> {
        tracing::info!(app_name, "getting app configuration");
        let data = self
            .transport
            .get(&format!("app-configurations/{app_name}"), &[])
            .await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected app-configuration response: {e}"))
        })
    }

    /// Create a configuration with every function of the app enabled.
    pub async fn create(
        &self,
        app_name: &str,
        security_scheme: SecurityScheme,
    ) -> Result<AppConfiguration> {
        let create = AppConfigurationCreate {
            app_name,
            security_scheme,
            security_scheme_overrides: None,
            all_functions_enabled: true,
            enabled_functions: None,
        };
        let body = serde_json::to_value(&create)
            .map_err(|e| AipolabsError::validation(format!("invalid create params: {e}")))?;
        tracing::info!(app_name, "creating app configuration");
        let data = self.transport.post("app-configurations", &body).await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected app-configuration response: {e}"))
        })
    }

    pub async fn delete(&self, app_name: &str) -> Result<()> {
        tracing::info!(app_name, "deleting app configuration");
        self.transport
            .delete(&format!("app-configurations/{app_name}"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_defaults() {
        let create = AppConfigurationCreate {
            app_name: "TEST_APP",
            security_scheme: SecurityScheme::ApiKey,
            security_scheme_overrides: None,
            all_functions_enabled: true,
            enabled_functions: None,
        };
        // Unset optionals are omitted, not sent as null.
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            serde_json::json!({
                "app_name": "TEST_APP",
                "security_scheme": "api_key",
                "all_functions_enabled": true,
            })
        );
    }

    #[test]
    fn test_list_params_query_pairs() {
        let params = AppConfigurationsListParams {
            app_names: Some(vec!["A".into(), "B".into()]),
            limit: Some(10),
            offset: None,
        };
        assert_eq!(
            params.query_pairs(),
            vec![
                ("app_names", "A".to_string()),
                ("app_names", "B".to_string()),
                ("limit", "10".to_string()),
            ]
        );
        assert!(AppConfigurationsListParams::default().query_pairs().is_empty());
    }
}
