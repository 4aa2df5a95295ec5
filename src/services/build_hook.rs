// src/services/build_hook.rs
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Environment variable holding the deploy build hook.
pub const BUILD_HOOK_ENV: &str = "NETLIFY_BUILD_HOOK_URL";

/// Upstream body is echoed back truncated to this many characters.
const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReport {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TriggerReport {
    fn failed(error: impl Into<String>) -> Self {
        TriggerReport { ok: false, status: None, body: None, error: Some(error.into()) }
    }
}

/// Report plus the HTTP status the trigger endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub http_status: u16,
    pub report: TriggerReport,
}

pub struct BuildHookTrigger {
    hook_url: Option<String>,
    client: Client,
}

impl BuildHookTrigger {
    pub fn new(hook_url: Option<String>) -> Self {
        BuildHookTrigger {
            hook_url: hook_url.filter(|u| !u.trim().is_empty()),
            client: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.hook_url.is_some()
    }

    /// POSTs once to the hook. Any response from upstream counts as success,
    /// whatever its status; only transport errors fail.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Some(hook) = self.hook_url.as_deref() else {
            warn!("{} not set, skipping build trigger", BUILD_HOOK_ENV);
            return TriggerOutcome {
                http_status: 500,
                report: TriggerReport::failed(format!("{} not set", BUILD_HOOK_ENV)),
            };
        };

        info!("Posting to build hook");
        let res = match self.client.post(hook).send().await {
            Ok(res) => res,
            Err(e) => {
                error!("Build hook request failed: {}", e);
                return TriggerOutcome { http_status: 500, report: TriggerReport::failed(e.to_string()) };
            }
        };

        let status = res.status().as_u16();
        let body = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read build hook response: {}", e);
                return TriggerOutcome { http_status: 500, report: TriggerReport::failed(e.to_string()) };
            }
        };
        info!("Build hook responded with status {}", status);

        TriggerOutcome {
            http_status: 200,
            report: TriggerReport {
                ok: true,
                status: Some(status),
                body: Some(body.chars().take(BODY_PREVIEW_CHARS).collect()),
                error: None,
            },
        }
    }
}
