// Sink trait for handing assembled dashboards to an external collaborator
use crate::application::assembler::RenderedDashboard;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardSink: Send + Sync {
    /// Short name used in logs and the run report
    fn name(&self) -> &str;

    /// Deliver one assembled dashboard
    async fn publish(&self, dashboard: &RenderedDashboard) -> anyhow::Result<()>;
}
