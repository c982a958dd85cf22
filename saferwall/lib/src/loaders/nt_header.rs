use api::RequestInit;
use serde_json::{Map, Value};

use super::take_pe;
use crate::client::SaferwallClient;
use crate::error::LoaderError;

/// Loads the PE NT header in the shape the header page renders.
///
/// ## Errors
///
/// Returns [`LoaderError::MissingField`] if the response has no `pe`
/// object, or [`LoaderError::Api`] if the request fails.
pub async fn load_nt_header(client: &SaferwallClient, hash: &str) -> Result<Value, LoaderError> {
    let file: Value = client
        .request(
            &format!("files/{hash}?fields=pe.nt_header"),
            false,
            RequestInit::new(),
        )
        .await?;

    let mut nt_header = take_pe(file)?
        .get_mut("nt_header")
        .map(Value::take)
        .unwrap_or(Value::Null);
    reshape_nt_header(&mut nt_header);
    Ok(nt_header)
}

/// Moves `Signature` under `FileHeader` and `OptionalHeader.DataDirectory`
/// up to the top level.
///
/// Each move only happens when the source value is truthy. A `FileHeader`
/// that exists but is not an object is left alone together with the
/// signature.
pub fn reshape_nt_header(nt_header: &mut Value) {
    let Some(header) = nt_header.as_object_mut() else {
        return;
    };

    let signature_movable = header.get("Signature").is_some_and(is_truthy)
        && matches!(
            header.get("FileHeader"),
            None | Some(Value::Null) | Some(Value::Object(_))
        );
    if signature_movable {
        if let Some(signature) = header.remove("Signature") {
            let file_header = header
                .entry("FileHeader")
                .or_insert_with(|| Value::Object(Map::new()));
            if file_header.is_null() {
                *file_header = Value::Object(Map::new());
            }
            if let Some(file_header) = file_header.as_object_mut() {
                file_header.insert("Signature".to_string(), signature);
            }
        }
    }

    let data_directory = header
        .get_mut("OptionalHeader")
        .and_then(Value::as_object_mut)
        .filter(|optional| optional.get("DataDirectory").is_some_and(is_truthy))
        .and_then(|optional| optional.remove("DataDirectory"));
    if let Some(data_directory) = data_directory {
        header.insert("DataDirectory".to_string(), data_directory);
    }
}

/// JavaScript truthiness, which the rendering layer relies on.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_moves_signature_and_data_directory() {
        let mut nt = json!({
            "Signature": 17744,
            "FileHeader": { "Machine": 332 },
            "OptionalHeader": { "Magic": 267, "DataDirectory": [{ "Size": 0 }] }
        });
        reshape_nt_header(&mut nt);

        assert_eq!(
            nt,
            json!({
                "FileHeader": { "Machine": 332, "Signature": 17744 },
                "OptionalHeader": { "Magic": 267 },
                "DataDirectory": [{ "Size": 0 }]
            })
        );
    }

    #[test]
    fn test_falsy_values_stay_put() {
        let mut nt = json!({
            "Signature": 0,
            "FileHeader": {},
            "OptionalHeader": { "DataDirectory": null }
        });
        let before = nt.clone();
        reshape_nt_header(&mut nt);
        assert_eq!(nt, before);
    }

    #[test]
    fn test_missing_file_header_is_created() {
        let mut nt = json!({ "Signature": "PE" });
        reshape_nt_header(&mut nt);
        assert_eq!(nt, json!({ "FileHeader": { "Signature": "PE" } }));
    }

    #[test]
    fn test_scalar_file_header_keeps_signature() {
        let mut nt = json!({ "Signature": 17744, "FileHeader": 5 });
        let before = nt.clone();
        reshape_nt_header(&mut nt);
        assert_eq!(nt, before);
    }

    #[test]
    fn test_non_object_is_ignored() {
        let mut nt = Value::Null;
        reshape_nt_header(&mut nt);
        assert!(nt.is_null());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1.5)));
    }
}
