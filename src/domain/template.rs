// Dashboard variable domain model

/// When the backend re-runs a variable's discovery query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateRefresh {
    Never,
    #[default]
    OnDashboardLoad,
    OnTimeRangeChange,
}

impl TemplateRefresh {
    pub fn code(self) -> u8 {
        match self {
            TemplateRefresh::Never => 0,
            TemplateRefresh::OnDashboardLoad => 1,
            TemplateRefresh::OnTimeRangeChange => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub label: String,
    pub datasource: String,
    pub query: String,
    pub include_all: bool,
    pub all_value: Option<String>,
    pub multi: bool,
    pub refresh: TemplateRefresh,
}

impl Template {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        datasource: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            datasource: datasource.into(),
            query: query.into(),
            include_all: false,
            all_value: None,
            multi: false,
            refresh: TemplateRefresh::default(),
        }
    }

    /// Offer an "All" option; `all_value` is what the backend receives
    /// for it (the backend joins every option when absent).
    pub fn with_include_all(mut self, include_all: bool, all_value: Option<String>) -> Self {
        self.include_all = include_all;
        self.all_value = all_value;
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn with_refresh(mut self, refresh: TemplateRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    /// ASCII letter or `_` first, then ASCII alphanumerics or `_`.
    pub fn has_valid_name(&self) -> bool {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Templating {
    pub list: Vec<Template>,
}

impl Templating {
    pub fn new(list: Vec<Template>) -> Self {
        Self { list }
    }
}
