// Query target domain model

/// How the backend shapes a target's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFormat {
    #[default]
    TimeSeries,
    Table,
    /// Table evaluated at a single instant.
    Instant,
}

/// One query bound to a panel. `expr` is opaque and may reference
/// dashboard variables as `$name`; nothing here interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub expr: String,
    pub legend_format: String,
    pub format: ResultFormat,
    pub ref_id: String,
}

impl Target {
    pub fn new(expr: impl Into<String>, ref_id: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            legend_format: String::new(),
            format: ResultFormat::TimeSeries,
            ref_id: ref_id.into(),
        }
    }

    pub fn with_legend(mut self, legend_format: impl Into<String>) -> Self {
        self.legend_format = legend_format.into();
        self
    }

    pub fn with_format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }
}
