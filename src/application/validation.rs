// Structural checks run before any id is assigned or byte emitted
use crate::domain::dashboard::Dashboard;
use crate::domain::error::{AssemblyError, TitleScope};
use crate::domain::grid::GridPos;
use crate::domain::panel::Panel;
use crate::domain::template::Template;
use std::collections::HashSet;

/// Fail-fast validation in traversal order: dashboard title, templates,
/// each panel (title, targets, refIds), then the grid layout.
pub fn validate_dashboard(dashboard: &Dashboard) -> Result<(), AssemblyError> {
    if dashboard.title.trim().is_empty() {
        return Err(AssemblyError::EmptyTitle {
            scope: TitleScope::Dashboard,
        });
    }

    validate_templates(&dashboard.templating.list)?;

    for (index, panel) in dashboard.panels.iter().enumerate() {
        validate_panel(index, panel)?;
    }

    validate_layout(
        dashboard
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| (&panel.grid_pos, index)),
    )?;

    Ok(())
}

pub fn validate_templates(templates: &[Template]) -> Result<(), AssemblyError> {
    let mut names = HashSet::new();
    for template in templates {
        if !template.has_valid_name() {
            return Err(AssemblyError::InvalidTemplateName {
                name: template.name.clone(),
            });
        }
        if !names.insert(template.name.as_str()) {
            return Err(AssemblyError::DuplicateTemplate {
                name: template.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_panel(index: usize, panel: &Panel) -> Result<(), AssemblyError> {
    if panel.title.trim().is_empty() {
        return Err(AssemblyError::EmptyTitle {
            scope: TitleScope::Panel(index),
        });
    }

    if panel.targets.is_empty() {
        return Err(AssemblyError::MissingTargets { panel_index: index });
    }

    let mut ref_ids = HashSet::new();
    for target in &panel.targets {
        if target.ref_id.is_empty() {
            return Err(AssemblyError::EmptyRefId { panel_index: index });
        }
        if !ref_ids.insert(target.ref_id.as_str()) {
            return Err(AssemblyError::DuplicateRefId {
                panel_index: index,
                ref_id: target.ref_id.clone(),
            });
        }
    }

    Ok(())
}

/// Per-rectangle bounds only. Overlapping panels are accepted and logged;
/// the renderer tolerates them.
pub fn validate_layout<'a, I>(positions: I) -> Result<(), AssemblyError>
where
    I: IntoIterator<Item = (&'a GridPos, usize)>,
{
    let mut accepted: Vec<(&GridPos, usize)> = Vec::new();

    for (grid_pos, panel_index) in positions {
        grid_pos
            .check_bounds()
            .map_err(|reason| AssemblyError::Layout { panel_index, reason })?;

        for (other, other_index) in &accepted {
            if grid_pos.overlaps(other) {
                tracing::warn!(
                    "Panel {} overlaps panel {} on the grid",
                    panel_index,
                    other_index
                );
            }
        }
        accepted.push((grid_pos, panel_index));
    }

    Ok(())
}
