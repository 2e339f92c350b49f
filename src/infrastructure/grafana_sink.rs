// Provisioning API sink - pushes dashboards to the dashboard backend over HTTP
use crate::application::assembler::RenderedDashboard;
use crate::application::dashboard_sink::DashboardSink;
use crate::infrastructure::json_mapper::DashboardJson;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GrafanaSink {
    url: String,
    token: String,
    folder_uid: Option<String>,
    overwrite: bool,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveDashboardRequest<'a> {
    dashboard: ProvisionedDashboard<'a>,
    overwrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_uid: Option<&'a str>,
    message: String,
}

/// The backend matches on uid/title when `id` is null.
#[derive(Debug, Serialize)]
struct ProvisionedDashboard<'a> {
    id: Option<u64>,
    #[serde(flatten)]
    body: &'a DashboardJson,
}

#[derive(Debug, Deserialize)]
struct SaveDashboardResponse {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    version: Option<i64>,
}

impl GrafanaSink {
    pub fn new(url: String, token: String, folder_uid: Option<String>, overwrite: bool) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            token,
            folder_uid,
            overwrite,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/dashboards/db", self.url)
    }

    fn build_request<'a>(&'a self, dashboard: &'a RenderedDashboard) -> SaveDashboardRequest<'a> {
        SaveDashboardRequest {
            dashboard: ProvisionedDashboard {
                id: None,
                body: &dashboard.dashboard,
            },
            overwrite: self.overwrite,
            folder_uid: self.folder_uid.as_deref(),
            message: format!("Provisioned by dashgen: {}", dashboard.title),
        }
    }
}

#[async_trait]
impl DashboardSink for GrafanaSink {
    fn name(&self) -> &str {
        "grafana"
    }

    async fn publish(&self, dashboard: &RenderedDashboard) -> Result<()> {
        let request = self.build_request(dashboard);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to the provisioning API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Provisioning failed with status {}: {}", status, body);
        }

        let saved = response
            .json::<SaveDashboardResponse>()
            .await
            .context("Failed to parse provisioning response")?;

        tracing::debug!(
            "Backend stored {:?} as uid {:?} version {:?}",
            dashboard.title,
            saved.uid,
            saved.version
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::assembler::assemble;
    use crate::domain::dashboard::Dashboard;
    use crate::domain::grid::GridPos;
    use crate::domain::panel::Panel;
    use crate::domain::target::Target;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one request with `status_line` and a JSON `body`,
    /// handing back the raw request it received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);

                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    fn rendered() -> RenderedDashboard {
        let dashboard = Dashboard::new("Redirector Overview")
            .with_uid("redirect")
            .with_panels(vec![Panel::time_series(
                "Up",
                "Prometheus",
                None,
                vec![Target::new("up", "A")],
                GridPos::new(0, 0, 12, 8),
            )]);
        assemble(&dashboard).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let sink = GrafanaSink::new("http://grafana:3000/".to_string(), "t".to_string(), None, true);
        assert_eq!(sink.endpoint(), "http://grafana:3000/api/dashboards/db");
    }

    #[test]
    fn test_request_body_shape() {
        let sink = GrafanaSink::new(
            "http://grafana:3000".to_string(),
            "t".to_string(),
            Some("ops".to_string()),
            false,
        );
        let dashboard = rendered();
        let body = serde_json::to_value(sink.build_request(&dashboard)).unwrap();

        assert_eq!(body["overwrite"], false);
        assert_eq!(body["folderUid"], "ops");
        assert_eq!(body["message"], "Provisioned by dashgen: Redirector Overview");
        assert_eq!(body["dashboard"]["id"], json!(null));
        assert_eq!(body["dashboard"]["uid"], "redirect");
        assert_eq!(body["dashboard"]["title"], "Redirector Overview");
        assert_eq!(body["dashboard"]["panels"][0]["id"], 0);
    }

    #[test]
    fn test_request_body_without_folder() {
        let sink = GrafanaSink::new("http://grafana:3000".to_string(), "t".to_string(), None, true);
        let dashboard = rendered();
        let body = serde_json::to_value(sink.build_request(&dashboard)).unwrap();

        assert!(body.get("folderUid").is_none());
        assert_eq!(body["overwrite"], true);
    }

    #[tokio::test]
    async fn test_publish_posts_with_bearer_token() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"id":1,"uid":"redirect","url":"/d/redirect","status":"success","version":3}"#,
        )
        .await;
        let sink = GrafanaSink::new(url, "secret-token".to_string(), None, true);

        sink.publish(&rendered()).await.unwrap();

        let request = server.await.unwrap();
        let lowered = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/dashboards/db HTTP/1.1"));
        assert!(lowered.contains("authorization: bearer secret-token"));
        assert!(lowered.contains("content-type: application/json"));
        assert!(request.contains(r#""title":"Redirector Overview""#));
        assert!(request.contains(r#""overwrite":true"#));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_status_and_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 401 Unauthorized",
            r#"{"message":"invalid API key"}"#,
        )
        .await;
        let sink = GrafanaSink::new(url, "wrong".to_string(), None, true);

        let error = sink.publish(&rendered()).await.unwrap_err();
        let message = format!("{:#}", error);

        assert!(message.contains("401"), "{}", message);
        assert!(message.contains("invalid API key"), "{}", message);
        server.await.unwrap();
    }
}
