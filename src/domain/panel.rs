// Panel domain models
use super::grid::GridPos;
use super::target::Target;

#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub show_header: bool,
    pub filterable: bool,
    pub display_mode: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            filterable: false,
            display_mode: "auto".to_string(),
        }
    }
}

/// Rendering-specific payload of a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    TimeSeries { unit: Option<String> },
    Table(TableOptions),
}

impl PanelKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            PanelKind::TimeSeries { .. } => "timeseries",
            PanelKind::Table(_) => "table",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Assigned by the assembly pass; `None` until then.
    pub id: Option<u32>,
    pub title: String,
    pub datasource: String,
    pub targets: Vec<Target>,
    pub grid_pos: GridPos,
    pub kind: PanelKind,
}

impl Panel {
    pub fn time_series(
        title: impl Into<String>,
        datasource: impl Into<String>,
        unit: Option<String>,
        targets: Vec<Target>,
        grid_pos: GridPos,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            datasource: datasource.into(),
            targets,
            grid_pos,
            kind: PanelKind::TimeSeries { unit },
        }
    }

    pub fn table(
        title: impl Into<String>,
        datasource: impl Into<String>,
        targets: Vec<Target>,
        grid_pos: GridPos,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            datasource: datasource.into(),
            targets,
            grid_pos,
            kind: PanelKind::Table(TableOptions::default()),
        }
    }

    pub fn with_table_options(mut self, options: TableOptions) -> Self {
        if let PanelKind::Table(_) = self.kind {
            self.kind = PanelKind::Table(options);
        }
        self
    }
}
