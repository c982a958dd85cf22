use api::RequestInit;
use serde_json::Value;

use super::take_pe;
use crate::client::SaferwallClient;
use crate::error::LoaderError;

/// Loads the bound import table of a PE file.
///
/// An absent or non-array table yields no items.
pub async fn load_bound_imports(
    client: &SaferwallClient,
    hash: &str,
) -> Result<Vec<Value>, LoaderError> {
    let file: Value = client
        .request(
            &format!("files/{hash}?fields=pe.bound_import"),
            false,
            RequestInit::new(),
        )
        .await?;

    match take_pe(file)?.get_mut("bound_import").map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Ok(Vec::new()),
    }
}
