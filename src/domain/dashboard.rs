// Dashboard domain model
use super::panel::Panel;
use super::template::Templating;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl TimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new("now-6h", "now")
    }
}

/// Aggregate root. Panel order is display order and id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub uid: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub timezone: String,
    pub time: TimeRange,
    pub templating: Templating,
    pub panels: Vec<Panel>,
}

impl Dashboard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uid: None,
            description: String::new(),
            tags: Vec::new(),
            timezone: "browser".to_string(),
            time: TimeRange::default(),
            templating: Templating::default(),
            panels: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_time(mut self, time: TimeRange) -> Self {
        self.time = time;
        self
    }

    pub fn with_templating(mut self, templating: Templating) -> Self {
        self.templating = templating;
        self
    }

    pub fn with_panels(mut self, panels: Vec<Panel>) -> Self {
        self.panels = panels;
        self
    }

    /// File-name friendly identifier: the uid if set, otherwise the title
    /// lowercased with runs of non-alphanumerics collapsed to `-`.
    pub fn slug(&self) -> String {
        if let Some(uid) = &self.uid {
            return uid.clone();
        }

        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        if slug.is_empty() {
            slug.push_str("dashboard");
        }
        slug
    }
}
