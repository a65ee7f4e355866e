//! Health check command - checks a running chatbox server.

use std::time::Duration;

use crate::cli::HealthArgs;

/// Build the health endpoint URL from a base URL.
pub fn health_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// Run the health check command
///
/// Returns an error describing why the server is not healthy.
pub async fn run(args: &HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("failed to connect to {url}: {e}"))?;
    if !response.status().is_success() {
        return Err(format!("server returned HTTP status {}", response.status()).into());
    }

    let body: serde_json::Value = response.json().await?;
    match body.get("status").and_then(|s| s.as_str()) {
        Some("healthy") => {
            let sessions = body.get("sessions").and_then(|s| s.as_u64()).unwrap_or(0);
            println!("healthy: {sessions} active session(s) at {url}");
            Ok(())
        }
        other => Err(format!("server reported status {}", other.unwrap_or("<missing>")).into()),
    }
}
