// Publish service - Use case for assembling and delivering a batch of dashboards
use crate::application::assembler::{RenderedDashboard, assemble};
use crate::application::dashboard_sink::DashboardSink;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::AssemblyError;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// A dashboard together with where its definition came from.
#[derive(Debug, Clone)]
pub struct DashboardSource {
    pub origin: String,
    pub dashboard: Dashboard,
}

#[derive(Debug)]
pub enum PublishStatus {
    /// Assembled and delivered to every listed sink (none in check mode).
    Delivered { sinks: Vec<String> },
    /// Validation failed; nothing was emitted.
    Rejected(AssemblyError),
    /// Another dashboard earlier in the batch already owns this output slug.
    SlugConflict { slug: String, first_origin: String },
    /// Assembled, but at least one sink failed.
    SinkFailed {
        delivered: Vec<String>,
        failures: Vec<(String, String)>,
    },
}

#[derive(Debug)]
pub struct PublishOutcome {
    pub origin: String,
    pub title: String,
    pub status: PublishStatus,
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, PublishStatus::Delivered { .. })
    }
}

#[derive(Clone)]
pub struct PublishService {
    sinks: Vec<Arc<dyn DashboardSink>>,
}

impl PublishService {
    pub fn new(sinks: Vec<Arc<dyn DashboardSink>>) -> Self {
        Self { sinks }
    }

    /// Assembles every dashboard first, claiming output slugs in input
    /// order, then delivers the accepted ones concurrently. Outcomes come
    /// back in input order.
    pub async fn publish_all(&self, sources: Vec<DashboardSource>) -> Vec<PublishOutcome> {
        let mut claimed: HashMap<String, String> = HashMap::new();
        let mut staged = Vec::with_capacity(sources.len());

        for source in sources {
            let title = source.dashboard.title.clone();
            let assembled = match assemble(&source.dashboard) {
                Ok(rendered) => match claimed.get(&rendered.slug) {
                    Some(first_origin) => {
                        tracing::error!(
                            "Dashboard from {} maps to {:?}, already taken by {}",
                            source.origin,
                            rendered.slug,
                            first_origin
                        );
                        Err(PublishStatus::SlugConflict {
                            slug: rendered.slug,
                            first_origin: first_origin.clone(),
                        })
                    }
                    None => {
                        claimed.insert(rendered.slug.clone(), source.origin.clone());
                        Ok(rendered)
                    }
                },
                Err(e) => {
                    tracing::error!("Rejected dashboard from {}: {}", source.origin, e);
                    Err(PublishStatus::Rejected(e))
                }
            };
            staged.push((source.origin, title, assembled));
        }

        let deliveries = staged
            .into_iter()
            .map(|(origin, title, assembled)| async move {
                let status = match assembled {
                    Ok(rendered) => self.deliver(&rendered).await,
                    Err(status) => status,
                };
                PublishOutcome {
                    origin,
                    title,
                    status,
                }
            });

        join_all(deliveries).await
    }

    async fn deliver(&self, rendered: &RenderedDashboard) -> PublishStatus {
        let mut delivered = Vec::new();
        let mut failures = Vec::new();

        for sink in &self.sinks {
            match sink.publish(rendered).await {
                Ok(()) => {
                    tracing::info!("Published {:?} to {}", rendered.title, sink.name());
                    delivered.push(sink.name().to_string());
                }
                Err(e) => {
                    tracing::error!(
                        "Error publishing {:?} to {}: {:#}",
                        rendered.title,
                        sink.name(),
                        e
                    );
                    failures.push((sink.name().to_string(), format!("{:#}", e)));
                }
            }
        }

        if failures.is_empty() {
            PublishStatus::Delivered { sinks: delivered }
        } else {
            PublishStatus::SinkFailed {
                delivered,
                failures,
            }
        }
    }
}
