// REST side of the feed: the startup status fetch and the two manual
// actions. Actions are fire-and-forget — a failure becomes a one-shot
// notice upstream, never a retry.

use observatory_shared::Snapshot;
use serde::Deserialize;

use super::config::FeedConfig;
use super::normalize;
use crate::error::FeedError;

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    #[serde(default)]
    pub generation: Option<u64>,
    #[serde(default)]
    pub expected_duration: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Best-effort snapshot fetch used once at startup (and available for
/// manual refresh). Any failure is recoverable: the caller falls back to
/// the synthetic feed.
pub async fn fetch_status(config: &FeedConfig) -> Result<Snapshot, FeedError> {
    let resp = reqwest::get(config.status_url())
        .await
        .map_err(|e| FeedError::FeedUnavailable(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(FeedError::FeedUnavailable(format!(
            "status endpoint returned HTTP {}",
            resp.status()
        )));
    }
    let raw: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| FeedError::FeedUnavailable(e.to_string()))?;
    Ok(normalize::snapshot_from_value(&raw))
}

/// Ask the server to run one evolution cycle now.
pub async fn trigger_evolution(config: &FeedConfig) -> Result<TriggerResponse, FeedError> {
    let body = post_json(&config.trigger_url()).await?;
    let parsed: TriggerResponse =
        serde_json::from_value(body).map_err(|e| FeedError::Action(e.to_string()))?;
    accept_trigger(parsed)
}

/// Ask the server to reset the run to generation zero.
pub async fn reset_evolution(config: &FeedConfig) -> Result<ResetResponse, FeedError> {
    let body = post_json(&config.reset_url()).await?;
    let parsed: ResetResponse =
        serde_json::from_value(body).map_err(|e| FeedError::Action(e.to_string()))?;
    accept_reset(parsed)
}

async fn post_json(url: &str) -> Result<serde_json::Value, FeedError> {
    let resp = reqwest::Client::new()
        .post(url)
        .send()
        .await
        .map_err(|e| FeedError::Action(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(FeedError::Action(format!(
            "server returned HTTP {}",
            resp.status()
        )));
    }
    resp.json()
        .await
        .map_err(|e| FeedError::Action(e.to_string()))
}

fn accept_trigger(body: TriggerResponse) -> Result<TriggerResponse, FeedError> {
    if body.status == "triggered" {
        Ok(body)
    } else {
        Err(FeedError::Action(format!(
            "trigger rejected: {}",
            body.status
        )))
    }
}

fn accept_reset(body: ResetResponse) -> Result<ResetResponse, FeedError> {
    if body.status == "reset_complete" {
        Ok(body)
    } else {
        Err(FeedError::Action(format!("reset rejected: {}", body.status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_payload_parses() {
        let body: TriggerResponse = serde_json::from_str(
            r#"{"status":"triggered","generation":12,"expected_duration":4.5}"#,
        )
        .unwrap();
        let accepted = accept_trigger(body).unwrap();
        assert_eq!(accepted.generation, Some(12));
    }

    #[test]
    fn trigger_with_other_status_is_an_action_error() {
        let body: TriggerResponse =
            serde_json::from_str(r#"{"status":"busy"}"#).unwrap();
        let err = accept_trigger(body).unwrap_err();
        assert!(matches!(err, FeedError::Action(_)));
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn reset_payload_parses() {
        let body: ResetResponse =
            serde_json::from_str(r#"{"status":"reset_complete","message":"ok"}"#).unwrap();
        let accepted = accept_reset(body).unwrap();
        assert_eq!(accepted.message.as_deref(), Some("ok"));
    }

    #[test]
    fn reset_with_other_status_is_an_action_error() {
        let body: ResetResponse = serde_json::from_str(r#"{"status":"refused"}"#).unwrap();
        assert!(accept_reset(body).is_err());
    }
}
