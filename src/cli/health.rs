use std::time::{Duration, Instant};

use crate::error::DawaError;
use crate::sources::openfda::OpenFdaConfig;

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthRow {
    pub api: String,
    pub status: String,
    pub latency: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    pub healthy: usize,
    pub total: usize,
    pub rows: Vec<HealthRow>,
}

impl HealthReport {
    pub fn all_healthy(&self) -> bool {
        self.healthy == self.total
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Dawa Health Check\n\n");
        out.push_str("| API | Status | Latency |\n");
        out.push_str("|-----|--------|---------|\n");
        for row in &self.rows {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                row.api, row.status, row.latency
            ));
        }
        out.push_str(&format!(
            "\nStatus: {}/{} APIs healthy\n",
            self.healthy, self.total
        ));
        out
    }
}

async fn check_one(client: &reqwest::Client, api: &str, url: &str) -> HealthRow {
    let start = Instant::now();
    let resp = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await;

    match resp {
        Ok(resp) => {
            let status = resp.status();
            let elapsed = start.elapsed().as_millis();
            if status.is_success() {
                HealthRow {
                    api: api.to_string(),
                    status: "ok".into(),
                    latency: format!("{elapsed}ms"),
                }
            } else {
                HealthRow {
                    api: api.to_string(),
                    status: "error".into(),
                    latency: format!("{elapsed}ms (HTTP {})", status.as_u16()),
                }
            }
        }
        Err(err) => {
            let reason = if err.is_timeout() {
                "timeout"
            } else if err.is_connect() {
                "connect"
            } else {
                "error"
            };
            HealthRow {
                api: api.to_string(),
                status: "error".into(),
                latency: reason.into(),
            }
        }
    }
}

fn health_http_client(config: &OpenFdaConfig) -> Result<reqwest::Client, DawaError> {
    reqwest::Client::builder()
        // Keep health checks snappy regardless of the configured search timeout.
        .timeout(Duration::from_secs(10).min(config.http.read_timeout))
        .connect_timeout(Duration::from_secs(5).min(config.http.connect_timeout))
        .user_agent(config.http.user_agent.as_ref())
        .build()
        .map_err(DawaError::HttpClientInit)
}

/// Runs a connectivity check against the configured openFDA endpoint.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be created.
pub async fn check(config: &OpenFdaConfig) -> Result<HealthReport, DawaError> {
    let client = health_http_client(config)?;
    let url = format!(
        "{}/drug/label.json?limit=1",
        config.base.as_ref().trim_end_matches('/')
    );

    let rows = vec![check_one(&client, "OpenFDA drug labels", &url).await];
    let healthy = rows.iter().filter(|r| r.status == "ok").count();
    Ok(HealthReport {
        healthy,
        total: rows.len(),
        rows,
    })
}
