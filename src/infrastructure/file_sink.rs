// File sink - writes one JSON document per dashboard
use crate::application::assembler::RenderedDashboard;
use crate::application::dashboard_sink::DashboardSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    pretty: bool,
}

impl FileSink {
    pub fn new(directory: PathBuf, pretty: bool) -> Self {
        Self { directory, pretty }
    }

    pub fn path_for(&self, dashboard: &RenderedDashboard) -> PathBuf {
        self.directory.join(format!("{}.json", dashboard.slug))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl DashboardSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn publish(&self, dashboard: &RenderedDashboard) -> Result<()> {
        let mut text = dashboard.to_text(self.pretty)?;
        text.push('\n');

        tokio::fs::create_dir_all(&self.directory)
            .await
            .with_context(|| format!("Failed to create {}", self.directory.display()))?;

        let path = self.path_for(dashboard);
        tokio::fs::write(&path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
