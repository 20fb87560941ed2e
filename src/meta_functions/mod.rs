//! Meta functions handed to an LLM tool-calling interface.
//!
//! Each module carries the reserved function name, its static JSON schema,
//! and the params model used to validate the arguments the LLM supplies.
//! The schemas are backend-independent: they let the model search for apps
//! and functions, fetch a function definition, and request execution of an
//! indexed function without the host application enumerating tools ahead
//! of time.

pub mod execute_function;
pub mod get_function_definition;
pub mod search_apps;
pub mod search_functions;

use serde_json::Value;

pub use execute_function::{FunctionExecutionParams, FunctionExecutionResult};
pub use get_function_definition::GetFunctionDefinitionParams;
pub use search_apps::SearchAppsParams;
pub use search_functions::SearchFunctionsParams;

/// All four meta-function schemas, ready to hand verbatim to an LLM
/// tool-calling interface.
pub fn all_schemas() -> Vec<Value> {
    vec![
        search_apps::SCHEMA.clone(),
        search_functions::SCHEMA.clone(),
        get_function_definition::SCHEMA.clone(),
        execute_function::SCHEMA.clone(),
    ]
}
