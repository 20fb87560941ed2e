//! Top-level client and the function-call dispatcher.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{AipolabsError, Result};
use crate::meta_functions::{
    self, FunctionExecutionParams, GetFunctionDefinitionParams, SearchAppsParams,
    SearchFunctionsParams,
};
use crate::resources::{
    AppConfigurationsResource, AppsResource, FunctionsResource, LinkedAccountsResource,
};
use crate::transport::Transport;

/// What an incoming tool-call name resolves to.
///
/// Derived purely from the name by exact match against the four reserved
/// meta-function names; anything else executes a directly-named indexed
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    SearchApps,
    SearchFunctions,
    GetFunctionDefinition,
    ExecuteFunction,
    DirectExecute,
}

impl CallKind {
    pub fn classify(function_name: &str) -> Self {
        match function_name {
            meta_functions::search_apps::NAME => Self::SearchApps,
            meta_functions::search_functions::NAME => Self::SearchFunctions,
            meta_functions::get_function_definition::NAME => Self::GetFunctionDefinition,
            meta_functions::execute_function::NAME => Self::ExecuteFunction,
            _ => Self::DirectExecute,
        }
    }
}

/// Client for the Aipolabs app/function catalog and execution API.
///
/// Holds the immutable configuration and one HTTP connection pool shared
/// by all resources. Construction fails hard when no API key can be found.
pub struct Aipolabs {
    pub apps: AppsResource,
    pub functions: FunctionsResource,
    pub app_configurations: AppConfigurationsResource,
    pub linked_accounts: LinkedAccountsResource,
}

impl Aipolabs {
    /// Create a client, falling back to the `AIPOLABS_API_KEY` /
    /// `AIPOLABS_BASE_URL` environment variables for omitted values.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let config = ClientConfig::new(api_key, base_url)?;
        Self::with_config(config, RetryConfig::default())
    }

    /// Create a client from explicit configuration, e.g. to tighten the
    /// retry policy.
    pub fn with_config(config: ClientConfig, retry: RetryConfig) -> Result<Self> {
        let transport = Arc::new(Transport::new(config, retry)?);
        Ok(Self {
            apps: AppsResource::new(transport.clone()),
            functions: FunctionsResource::new(transport.clone()),
            app_configurations: AppConfigurationsResource::new(transport.clone()),
            linked_accounts: LinkedAccountsResource::new(transport),
        })
    }

    /// Route an LLM tool-call to the right handler and return its JSON
    /// result.
    ///
    /// Meta-function calls are validated locally first; a validation
    /// failure never reaches the network. Execution paths (the
    /// `AIPOLABS_EXECUTE_FUNCTION` meta function and directly-named
    /// indexed functions) additionally require `linked_account_owner_id`
    /// and fail with [`AipolabsError::MissingLinkedAccountOwnerId`] before
    /// any request when it is absent.
    pub async fn handle_function_call(
        &self,
        function_name: &str,
        arguments: Value,
        linked_account_owner_id: Option<&str>,
    ) -> Result<Value> {
        tracing::info!(function_name, "handling function call");
        match CallKind::classify(function_name) {
            CallKind::SearchApps => {
                let params = SearchAppsParams::from_value(arguments)?;
                let apps = self.apps.search(params).await?;
                to_json(apps)
            }
            CallKind::SearchFunctions => {
                let params = SearchFunctionsParams::from_value(arguments)?;
                let functions = self.functions.search(params).await?;
                to_json(functions)
            }
            CallKind::GetFunctionDefinition => {
                let params = GetFunctionDefinitionParams::from_value(arguments)?;
                self.functions.get_definition(&params.function_name).await
            }
            CallKind::ExecuteFunction => {
                let params = FunctionExecutionParams::from_value(arguments)?;
                let owner = require_owner(linked_account_owner_id)?;
                let result = self
                    .functions
                    .execute(
                        &params.function_name,
                        Value::Object(params.function_parameters),
                        owner,
                    )
                    .await?;
                to_json(result)
            }
            CallKind::DirectExecute => {
                let owner = require_owner(linked_account_owner_id)?;
                let result = self
                    .functions
                    .execute(function_name, arguments, owner)
                    .await?;
                to_json(result)
            }
        }
    }
}

fn require_owner(linked_account_owner_id: Option<&str>) -> Result<&str> {
    linked_account_owner_id.ok_or(AipolabsError::MissingLinkedAccountOwnerId)
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| AipolabsError::validation(format!("error serializing result: {e}")))
}
