// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Slack Web API client.
//!
//! Handles:
//! - Game notifications via `chat.postMessage` (bot token)
//! - The "run status check" ping via an incoming webhook

use crate::error::AppError;
use crate::services::Notifier;
use async_trait::async_trait;
use serde::Deserialize;

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Slack client bound to one channel.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    channel: String,
}

/// Envelope every Web API method returns. HTTP status is 200 even on error.
#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackClient {
    pub fn new(bot_token: String, channel: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SLACK_API_BASE.to_string(),
            bot_token,
            channel,
        }
    }

    /// Post a message to the configured channel.
    pub async fn post_message(&self, text: &str) -> Result<(), AppError> {
        let url = format!("{}/chat.postMessage", self.base_url);
        let body = serde_json::json!({
            "channel": self.channel,
            "text": text,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Slack(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Slack(format!("HTTP {}: {}", status, body)));
        }

        let api: SlackApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Slack(format!("JSON parse error: {}", e)))?;

        check_api_response(api)
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn send(&self, text: &str) -> Result<(), AppError> {
        self.post_message(text).await
    }
}

fn check_api_response(api: SlackApiResponse) -> Result<(), AppError> {
    if api.ok {
        Ok(())
    } else {
        Err(AppError::Slack(
            api.error.unwrap_or_else(|| "unknown_error".to_string()),
        ))
    }
}

/// Block-kit body for the "haven't run today" ping.
pub fn run_ping_payload(site: &str) -> serde_json::Value {
    serde_json::json!({
        "blocks": [
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": "*Run Status Check* 🏃" }
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": "Someone checked your website and noticed you haven't gone for a run today! 🏃‍♂️\nThink you'll head out for one? 🤔"
                }
            },
            {
                "type": "context",
                "elements": [
                    { "type": "mrkdwn", "text": format!("Sent from {}", site) }
                ]
            }
        ]
    })
}

/// Deliver the run ping to an incoming webhook.
pub async fn send_run_ping(
    http: &reqwest::Client,
    webhook_url: &str,
    site: &str,
) -> Result<(), AppError> {
    let response = http
        .post(webhook_url)
        .json(&run_ping_payload(site))
        .send()
        .await
        .map_err(|e| AppError::Slack(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AppError::Slack(format!(
            "Slack webhook responded with {}",
            response.status()
        )));
    }

    tracing::info!("Run status ping sent");
    Ok(())
}
