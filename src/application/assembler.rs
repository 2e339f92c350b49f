// Assembly pipeline - validate, assign panel ids, serialize
use crate::application::validation::validate_dashboard;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::AssemblyError;
use crate::infrastructure::json_mapper::{DashboardJson, dashboard_to_json};

/// A validated dashboard with ids assigned, ready to hand to a sink.
#[derive(Debug, Clone)]
pub struct RenderedDashboard {
    pub slug: String,
    pub title: String,
    pub dashboard: DashboardJson,
}

impl RenderedDashboard {
    pub fn to_text(&self, pretty: bool) -> Result<String, AssemblyError> {
        let text = if pretty {
            serde_json::to_string_pretty(&self.dashboard)?
        } else {
            serde_json::to_string(&self.dashboard)?
        };
        Ok(text)
    }
}

fn panel_id(index: usize) -> Result<u32, AssemblyError> {
    u32::try_from(index).map_err(|_| AssemblyError::PanelIdOverflow { panel_index: index })
}

/// Re-derives every panel id from sequence order, overwriting any earlier
/// assignment.
pub fn assign_panel_ids(mut dashboard: Dashboard) -> Result<Dashboard, AssemblyError> {
    for (index, panel) in dashboard.panels.iter_mut().enumerate() {
        panel.id = Some(panel_id(index)?);
    }

    tracing::debug!(
        "Assigned ids 0..{} to panels of {:?}",
        dashboard.panels.len(),
        dashboard.title
    );

    Ok(dashboard)
}

/// Validates and assigns ids without serializing.
pub fn prepare(dashboard: &Dashboard) -> Result<Dashboard, AssemblyError> {
    validate_dashboard(dashboard)?;
    assign_panel_ids(dashboard.clone())
}

/// Full pipeline. Nothing is produced unless validation passes.
pub fn assemble(dashboard: &Dashboard) -> Result<RenderedDashboard, AssemblyError> {
    let prepared = prepare(dashboard)?;

    Ok(RenderedDashboard {
        slug: prepared.slug(),
        title: prepared.title.clone(),
        dashboard: dashboard_to_json(&prepared),
    })
}
