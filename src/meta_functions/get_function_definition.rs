//! `AIPOLABS_GET_FUNCTION_DEFINITION`: fetch the schema of one function.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AipolabsError, Result};

pub const NAME: &str = "AIPOLABS_GET_FUNCTION_DEFINITION";

pub static SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "function",
        "function": {
            "name": NAME,
            "description": "This function allows you to get the definition of an executable function.",
            "parameters": {
                "type": "object",
                "properties": {
                    "function_name": {
                        "type": "string",
                        "description": "The name of the function you want to get the definition for. You can get function names by using the AIPOLABS_SEARCH_FUNCTIONS function."
                    }
                },
                "required": ["function_name"],
                "additionalProperties": false
            }
        }
    })
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFunctionDefinitionParams {
    pub function_name: String,
}

impl GetFunctionDefinitionParams {
    pub fn from_value(args: Value) -> Result<Self> {
        serde_json::from_value(args).map_err(|e| {
            AipolabsError::validation(format!("invalid get function definition params: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_is_required() {
        assert!(GetFunctionDefinitionParams::from_value(json!({})).is_err());
        let params =
            GetFunctionDefinitionParams::from_value(json!({"function_name": "TEST_FUNCTION"}))
                .unwrap();
        assert_eq!(params.function_name, "TEST_FUNCTION");
    }
}
