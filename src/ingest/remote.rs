use crate::error::AdapterError;

/// Download an asset over HTTP(S).
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, AdapterError> {
    log::debug!("Downloading asset from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AdapterError::Network(format!("Failed to download from {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(AdapterError::Network(format!(
            "HTTP {} from {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AdapterError::Network(format!("Failed to read response from {url}: {e}")))?;
    Ok(bytes.to_vec())
}
