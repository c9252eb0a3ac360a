use std::time::Duration;

/// Fire-and-forget GET against a provider's refresh webhook. Failures are
/// logged and never propagated — a dead webhook must not stall ingestion.
pub async fn notify(client: &reqwest::Client, url: &str) {
    match client.get(url).timeout(Duration::from_secs(10)).send().await {
        Ok(response) if response.status().is_success() => {
            debug!("Webhook `{}` notified", url);
        }
        Ok(response) => {
            warn!("Webhook `{}` returned {}", url, response.status());
        }
        Err(e) => {
            warn!("Webhook `{}` failed: {}", url, e);
        }
    }
}
