// Assembly errors
use std::fmt;

/// Which declaration is missing its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleScope {
    Dashboard,
    Panel(usize),
}

impl fmt::Display for TitleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleScope::Dashboard => write!(f, "dashboard"),
            TitleScope::Panel(index) => write!(f, "panel {}", index),
        }
    }
}

/// Fatal for the dashboard being assembled; nothing is emitted.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("panel {panel_index} has an invalid grid position: {reason}")]
    Layout { panel_index: usize, reason: String },

    #[error("panel {panel_index} declares refId {ref_id:?} more than once")]
    DuplicateRefId { panel_index: usize, ref_id: String },

    #[error("panel {panel_index} has a target with an empty refId")]
    EmptyRefId { panel_index: usize },

    #[error("template {name:?} is declared more than once")]
    DuplicateTemplate { name: String },

    #[error("template name {name:?} is not a valid identifier")]
    InvalidTemplateName { name: String },

    #[error("{scope} has an empty title")]
    EmptyTitle { scope: TitleScope },

    #[error("panel {panel_index} has no targets")]
    MissingTargets { panel_index: usize },

    #[error("panel {panel_index} cannot be given a 32-bit id")]
    PanelIdOverflow { panel_index: usize },

    #[error("failed to serialize dashboard: {0}")]
    Serialization(#[from] serde_json::Error),
}
