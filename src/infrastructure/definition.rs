// Dashboard definition files (TOML) and their conversion into the domain graph
use crate::application::publish_service::DashboardSource;
use crate::domain::dashboard::{Dashboard, TimeRange};
use crate::domain::grid::GridPos;
use crate::domain::panel::{Panel, TableOptions};
use crate::domain::target::{ResultFormat, Target};
use crate::domain::template::{Template, TemplateRefresh, Templating};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DashboardDefinition {
    pub title: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub time: Option<TimeDefinition>,
    /// Used by every template and panel that doesn't name its own
    #[serde(default)]
    pub datasource: Option<String>,
    #[serde(default)]
    pub templates: Vec<TemplateDefinition>,
    #[serde(default)]
    pub panels: Vec<PanelDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TimeDefinition {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshDefinition {
    Never,
    #[default]
    OnLoad,
    OnTimeRange,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TemplateDefinition {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub datasource: Option<String>,
    pub query: String,
    #[serde(default)]
    pub include_all: bool,
    #[serde(default)]
    pub all_value: Option<String>,
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub refresh: RefreshDefinition,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PanelKindDefinition {
    #[serde(alias = "time_series")]
    Timeseries,
    Table,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PanelDefinition {
    pub kind: PanelKindDefinition,
    pub title: String,
    #[serde(default)]
    pub datasource: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub grid: GridDefinition,
    #[serde(default)]
    pub targets: Vec<TargetDefinition>,
    #[serde(default)]
    pub show_header: Option<bool>,
    #[serde(default)]
    pub filterable: Option<bool>,
    #[serde(default)]
    pub display_mode: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct GridDefinition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatDefinition {
    #[default]
    TimeSeries,
    Table,
    Instant,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TargetDefinition {
    pub expr: String,
    #[serde(default)]
    pub legend_format: String,
    #[serde(default)]
    pub format: FormatDefinition,
    pub ref_id: String,
}

fn default_timezone() -> String {
    "browser".to_string()
}

impl DashboardDefinition {
    pub fn into_dashboard(self) -> Result<Dashboard> {
        let default_datasource = self.datasource;

        let templates = self
            .templates
            .into_iter()
            .map(|t| {
                let datasource = pick_datasource(t.datasource, &default_datasource)
                    .with_context(|| format!("template {:?}", t.name))?;
                let refresh = match t.refresh {
                    RefreshDefinition::Never => TemplateRefresh::Never,
                    RefreshDefinition::OnLoad => TemplateRefresh::OnDashboardLoad,
                    RefreshDefinition::OnTimeRange => TemplateRefresh::OnTimeRangeChange,
                };

                Ok(Template::new(t.name, t.label, datasource, t.query)
                    .with_include_all(t.include_all, t.all_value)
                    .with_multi(t.multi)
                    .with_refresh(refresh))
            })
            .collect::<Result<Vec<_>>>()?;

        let panels = self
            .panels
            .into_iter()
            .enumerate()
            .map(|(index, p)| {
                p.into_panel(&default_datasource)
                    .with_context(|| format!("panel {}", index))
            })
            .collect::<Result<Vec<_>>>()?;

        let time = self
            .time
            .map(|t| TimeRange::new(t.from, t.to))
            .unwrap_or_default();

        let mut dashboard = Dashboard::new(self.title)
            .with_description(self.description)
            .with_tags(self.tags)
            .with_timezone(self.timezone)
            .with_time(time)
            .with_templating(Templating::new(templates))
            .with_panels(panels);
        if let Some(uid) = self.uid {
            dashboard = dashboard.with_uid(uid);
        }

        Ok(dashboard)
    }
}

impl PanelDefinition {
    fn into_panel(self, default_datasource: &Option<String>) -> Result<Panel> {
        let datasource = pick_datasource(self.datasource, default_datasource)
            .with_context(|| format!("{:?}", self.title))?;
        let grid_pos = GridPos::new(self.grid.x, self.grid.y, self.grid.w, self.grid.h);
        let targets = self.targets.into_iter().map(TargetDefinition::into_target).collect();

        let panel = match self.kind {
            PanelKindDefinition::Timeseries => {
                let table_only = [
                    ("show_header", self.show_header.is_some()),
                    ("filterable", self.filterable.is_some()),
                    ("display_mode", self.display_mode.is_some()),
                ];
                if let Some((field, _)) = table_only.iter().find(|(_, set)| *set) {
                    anyhow::bail!("{} is only valid for table panels", field);
                }
                Panel::time_series(self.title, datasource, self.unit, targets, grid_pos)
            }
            PanelKindDefinition::Table => {
                if self.unit.is_some() {
                    anyhow::bail!("unit is only valid for timeseries panels");
                }
                let defaults = TableOptions::default();
                Panel::table(self.title, datasource, targets, grid_pos).with_table_options(
                    TableOptions {
                        show_header: self.show_header.unwrap_or(defaults.show_header),
                        filterable: self.filterable.unwrap_or(defaults.filterable),
                        display_mode: self.display_mode.unwrap_or(defaults.display_mode),
                    },
                )
            }
        };

        Ok(panel)
    }
}

impl TargetDefinition {
    fn into_target(self) -> Target {
        let format = match self.format {
            FormatDefinition::TimeSeries => ResultFormat::TimeSeries,
            FormatDefinition::Table => ResultFormat::Table,
            FormatDefinition::Instant => ResultFormat::Instant,
        };

        Target::new(self.expr, self.ref_id)
            .with_legend(self.legend_format)
            .with_format(format)
    }
}

fn pick_datasource(own: Option<String>, default: &Option<String>) -> Result<String> {
    own.or_else(|| default.clone())
        .context("no datasource given and the dashboard has no default datasource")
}

pub fn parse_definition(text: &str) -> Result<Dashboard> {
    let definition: DashboardDefinition =
        toml::from_str(text).context("Failed to parse dashboard definition")?;
    definition.into_dashboard()
}

pub fn load_definition(path: &Path) -> Result<DashboardSource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dashboard = parse_definition(&text).with_context(|| format!("In {}", path.display()))?;

    Ok(DashboardSource {
        origin: path.display().to_string(),
        dashboard,
    })
}

/// Every `*.toml` directly inside `directory`, in path order.
pub fn discover_definitions(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to list {}", directory.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::debug!(
        "Found {} definition files in {}",
        paths.len(),
        directory.display()
    );

    Ok(paths)
}

pub fn load_definitions(paths: &[PathBuf]) -> Result<Vec<DashboardSource>> {
    paths.iter().map(|path| load_definition(path)).collect()
}
