//! Functions resource: search, definition fetch, and execution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AipolabsError, Result};
use crate::meta_functions::{FunctionExecutionResult, SearchFunctionsParams};
use crate::transport::Transport;

/// Read-only projection of a function returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSummary {
    pub name: String,
    pub description: String,
}

pub struct FunctionsResource {
    transport: Arc<Transport>,
}

impl FunctionsResource {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Search functions, sorted by the server by relevance to the intent.
    pub async fn search(&self, params: SearchFunctionsParams) -> Result<Vec<FunctionSummary>> {
        let pairs = params.query_pairs();
        tracing::info!(params = ?pairs, "searching functions");
        let data = self.transport.get("functions/search", &pairs).await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected functions/search response: {e}"))
        })
    }

    /// Fetch the JSON schema definition of one function.
    ///
    /// The schema shape is owned by the backend and handed to the LLM
    /// verbatim, so it stays an untyped [`Value`].
    pub async fn get_definition(&self, function_name: &str) -> Result<Value> {
        tracing::info!(function_name, "getting function definition");
        self.transport
            .get(&format!("functions/{function_name}/definition"), &[])
            .await
    }

    /// Execute an indexed function on behalf of one end user.
    ///
    /// `linked_account_owner_id` scopes execution to that user's linked
    /// credentials and is mandatory for every execution.
    pub async fn execute(
        &self,
        function_name: &str,
        function_parameters: Value,
        linked_account_owner_id: &str,
    ) -> Result<FunctionExecutionResult> {
        tracing::info!(function_name, linked_account_owner_id, "executing function");
        let body = json!({
            "function_input": function_parameters,
            "linked_account_owner_id": linked_account_owner_id,
        });
        let data = self
            .transport
            .post(&format!("functions/{function_name}/execute"), &body)
            .await?;
        serde_json::from_value(data).map_err(|e| {
            AipolabsError::validation(format!("unexpected function execution response: {e}"))
        })
    }
}
