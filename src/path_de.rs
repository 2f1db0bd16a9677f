use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize a subtree of an already-parsed document, keeping the JSON path
/// of the failing node in the error message.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
