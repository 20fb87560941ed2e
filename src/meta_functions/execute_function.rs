//! `AIPOLABS_EXECUTE_FUNCTION`: request execution of an indexed function.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::get_function_definition;
use crate::error::{AipolabsError, Result};

pub const NAME: &str = "AIPOLABS_EXECUTE_FUNCTION";

pub static SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "function",
        "function": {
            "name": NAME,
            "description": "Execute a specific retrieved function. Provide the executable function name, and the required function parameters for that function based on function definition retrieved.",
            "parameters": {
                "type": "object",
                "properties": {
                    "function_name": {
                        "type": "string",
                        "description": format!("The name of the function to execute, which is retrieved from the {} function.", get_function_definition::NAME)
                    },
                    "function_parameters": {
                        "type": "object",
                        "description": "This object contains the all input parameters in key-value pairs needed to execute the specified function. The required parameters depend on the 'function_name' and are provided in the function definition retrieved. For functions without parameters, provide an empty object.",
                        "additionalProperties": true
                    }
                },
                "required": ["function_name", "function_parameters"],
                "additionalProperties": false
            }
        }
    })
});

/// Validated arguments for an execution request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionExecutionParams {
    pub function_name: String,
    #[serde(default)]
    pub function_parameters: Map<String, Value>,
}

impl FunctionExecutionParams {
    /// Normalize raw LLM-supplied arguments.
    ///
    /// LLMs frequently flatten the input parameters next to `function_name`
    /// instead of nesting them under `function_parameters`. Two explicit
    /// paths, with a present `function_parameters` key taking precedence:
    ///
    /// 1. `function_parameters` present: the object deserializes as-is.
    /// 2. Absent: every key other than `function_name` is folded into a
    ///    synthesized `function_parameters` map.
    ///
    /// A missing `function_name` fails validation on either path.
    pub fn from_value(args: Value) -> Result<Self> {
        let Value::Object(mut map) = args else {
            return Err(AipolabsError::validation(
                "execute function params must be an object",
            ));
        };

        if map.contains_key("function_parameters") {
            return serde_json::from_value(Value::Object(map)).map_err(|e| {
                AipolabsError::validation(format!("invalid execute function params: {e}"))
            });
        }

        let function_name = match map.remove("function_name") {
            Some(Value::String(name)) => name,
            Some(_) => {
                return Err(AipolabsError::validation("function_name must be a string"));
            }
            None => {
                return Err(AipolabsError::validation("function_name is required"));
            }
        };

        Ok(Self {
            function_name,
            function_parameters: map,
        })
    }
}

/// Result of an indexed-function execution, as reported by the backend.
///
/// `success` is passed through uninterpreted; `data`/`error` are omitted
/// from re-serialized output when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_arguments_are_folded_into_function_parameters() {
        let params =
            FunctionExecutionParams::from_value(json!({"function_name": "X", "a": 1, "b": 2}))
                .unwrap();
        assert_eq!(params.function_name, "X");
        assert_eq!(
            Value::Object(params.function_parameters),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn test_nested_arguments_pass_through_unchanged() {
        let params = FunctionExecutionParams::from_value(
            json!({"function_name": "X", "function_parameters": {"a": 1}}),
        )
        .unwrap();
        assert_eq!(params.function_name, "X");
        assert_eq!(Value::Object(params.function_parameters), json!({"a": 1}));
    }

    #[test]
    fn test_present_function_parameters_key_wins() {
        // A present key means no folding, even with stray siblings; the
        // stray key is simply ignored by deserialization.
        let params = FunctionExecutionParams::from_value(
            json!({"function_name": "X", "function_parameters": {"a": 1}, "b": 2}),
        )
        .unwrap();
        assert_eq!(Value::Object(params.function_parameters), json!({"a": 1}));
    }

    #[test]
    fn test_missing_function_name_fails_validation() {
        let err = FunctionExecutionParams::from_value(json!({"a": 1})).unwrap_err();
        assert!(matches!(err, AipolabsError::Validation { status: None, .. }));

        let err = FunctionExecutionParams::from_value(json!({"function_parameters": {"a": 1}}))
            .unwrap_err();
        assert!(matches!(err, AipolabsError::Validation { .. }));
    }

    #[test]
    fn test_execution_result_omits_absent_fields() {
        let result = FunctionExecutionResult {
            success: true,
            data: Some(json!("string")),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"success": true, "data": "string"})
        );
    }
}
