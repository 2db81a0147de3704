use crate::core::config::ServiceConfig;
use crate::{MapError, Result};

/// Builds the HTTP client shared by all services of one screen.
///
/// Public OpenStreetMap services reject requests without an identifying
/// User-Agent, so one is always set.
pub fn build_client(config: &ServiceConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()?;
    Ok(client)
}

/// GETs `url` with `query` and returns the body text of a successful response
pub(crate) async fn get_text(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<String> {
    log::debug!("GET {}", url);
    let response = client.get(url).query(query).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::Service(format!("{} returned HTTP {}", url, status)));
    }
    Ok(response.text().await?)
}

/// GETs `url` and returns the raw body
pub(crate) async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    log::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::Service(format!("{} returned HTTP {}", url, status)));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Joins a configured base url and a path without doubling slashes
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// One-shot local HTTP server for service tests
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Client that talks to the local server directly, whatever the proxy environment
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// Answers the next request with `status` and `body`; returns the base url
    pub async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }
}
