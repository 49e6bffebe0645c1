use dnsbox_domain::DomainError;
use reqwest::StatusCode;

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads a blocklist source: an `http(s)://` URL or a local file path.
pub async fn fetch_source(source: &str, client: &reqwest::Client) -> Result<String, DomainError> {
    if is_url(source) {
        fetch_url(source, client).await
    } else {
        let bytes = tokio::fs::read(source).await.map_err(|e| {
            DomainError::BlocklistSource(format!("read error for {}: {}", source, e))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

async fn fetch_url(url: &str, client: &reqwest::Client) -> Result<String, DomainError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DomainError::BlocklistSource(format!("fetch error for {}: {}", url, e)))?;

    if response.status() != StatusCode::OK {
        return Err(DomainError::BlocklistSource(format!(
            "HTTP {} for {}",
            response.status().as_u16(),
            url
        )));
    }

    response
        .text()
        .await
        .map_err(|e| DomainError::BlocklistSource(format!("read error for {}: {}", url, e)))
}
