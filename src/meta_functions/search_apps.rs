//! `AIPOLABS_SEARCH_APPS`: discover apps relevant to an intent.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AipolabsError, Result};

pub const NAME: &str = "AIPOLABS_SEARCH_APPS";

pub static SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "function",
        "function": {
            "name": NAME,
            "description": "This function allows you to find relevant apps (which includes a set of functions) that can help complete your tasks or get data and information you need.",
            "parameters": {
                "type": "object",
                "properties": {
                    "intent": {
                        "type": "string",
                        "description": "Use this to find relevant apps you might need. Returned results of this function will be sorted by relevance to the intent. Examples include 'what's the top news in the stock market today', 'i want to automate outbound marketing emails'."
                    },
                    "limit": {
                        "type": "integer",
                        "default": 100,
                        "description": "The maximum number of apps to return from the search.",
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

/// Filters for `GET apps/search`. Unset fields are left off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchAppsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl SearchAppsParams {
    /// Validate raw LLM-supplied arguments into a params model.
    pub fn from_value(args: Value) -> Result<Self> {
        let params: Self = serde_json::from_value(args)
            .map_err(|e| AipolabsError::validation(format!("invalid search apps params: {e}")))?;
        validate_pagination(params.limit)?;
        Ok(params)
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(intent) = &self.intent {
            pairs.push(("intent", intent.clone()));
        }
        if let Some(configured_only) = self.configured_only {
            pairs.push(("configured_only", configured_only.to_string()));
        }
        if let Some(categories) = &self.categories {
            for category in categories {
                pairs.push(("categories", category.clone()));
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

pub(crate) fn validate_pagination(limit: Option<u32>) -> Result<()> {
    if let Some(limit) = limit {
        if !(1..=1000).contains(&limit) {
            return Err(AipolabsError::validation(format!(
                "limit must be between 1 and 1000, got {limit}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_set_produces_no_query_pairs() {
        let params = SearchAppsParams::from_value(json!({})).unwrap();
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn test_all_fields_become_query_pairs() {
        let params = SearchAppsParams {
            intent: Some("test".into()),
            configured_only: Some(true),
            categories: Some(vec!["utility".into(), "education".into()]),
            limit: Some(10),
            offset: Some(5),
        };
        assert_eq!(
            params.query_pairs(),
            vec![
                ("intent", "test".to_string()),
                ("configured_only", "true".to_string()),
                ("categories", "utility".to_string()),
                ("categories", "education".to_string()),
                ("limit", "10".to_string()),
                ("offset", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_limit_out_of_range_is_rejected() {
        assert!(SearchAppsParams::from_value(json!({"limit": 0})).is_err());
        assert!(SearchAppsParams::from_value(json!({"limit": 1001})).is_err());
        assert!(SearchAppsParams::from_value(json!({"limit": 1000})).is_ok());
    }

    #[test]
    fn test_schema_names_the_reserved_function() {
        assert_eq!(SCHEMA["function"]["name"], NAME);
        assert_eq!(SCHEMA["type"], "function");
    }
}
