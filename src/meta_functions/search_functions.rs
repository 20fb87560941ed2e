//! `AIPOLABS_SEARCH_FUNCTIONS`: discover executable functions by intent.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::search_apps::validate_pagination;
use crate::error::{AipolabsError, Result};

pub const NAME: &str = "AIPOLABS_SEARCH_FUNCTIONS";

pub static SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "function",
        "function": {
            "name": NAME,
            "description": "This function allows you to find relevant executable functions that can help complete your tasks or get data and information you need.",
            "parameters": {
                "type": "object",
                "properties": {
                    "app_names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "The names of the apps you want to search functions in. You can get app names by using the AIPOLABS_SEARCH_APPS function. If not provided, functions of all apps will be searched."
                    },
                    "intent": {
                        "type": "string",
                        "description": "Use this to find relevant functions you might need. Returned results of this function will be sorted by relevance to the intent."
                    },
                    "limit": {
                        "type": "integer",
                        "default": 100,
                        "description": "The maximum number of functions to return from the search.",
                        "minimum": 1,
                        "maximum": 1000
                    },
                    "offset": {
                        "type": "integer",
                        "default": 0,
                        "minimum": 0,
                        "description": "Pagination offset."
                    }
                },
                "required": [],
                "additionalProperties": false
            }
        }
    })
});

/// Filters for `GET functions/search`. Unset fields are left off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFunctionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl SearchFunctionsParams {
    /// Validate raw LLM-supplied arguments into a params model.
    pub fn from_value(args: Value) -> Result<Self> {
        let params: Self = serde_json::from_value(args).map_err(|e| {
            AipolabsError::validation(format!("invalid search functions params: {e}"))
        })?;
        validate_pagination(params.limit)?;
        Ok(params)
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(app_names) = &self.app_names {
            for app_name in app_names {
                pairs.push(("app_names", app_name.clone()));
            }
        }
        if let Some(intent) = &self.intent {
            pairs.push(("intent", intent.clone()));
        }
        if let Some(configured_only) = self.configured_only {
            pairs.push(("configured_only", configured_only.to_string()));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_names_repeat_as_query_pairs() {
        let params = SearchFunctionsParams::from_value(
            json!({"app_names": ["BRAVE_SEARCH", "GMAIL"], "intent": "search"}),
        )
        .unwrap();
        assert_eq!(
            params.query_pairs(),
            vec![
                ("app_names", "BRAVE_SEARCH".to_string()),
                ("app_names", "GMAIL".to_string()),
                ("intent", "search".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter_set_produces_no_query_pairs() {
        let params = SearchFunctionsParams::default();
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn test_non_object_arguments_are_rejected() {
        assert!(SearchFunctionsParams::from_value(json!("intent")).is_err());
        assert!(SearchFunctionsParams::from_value(json!({"limit": "ten"})).is_err());
    }
}
