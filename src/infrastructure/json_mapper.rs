// Mapper to convert domain models to the dashboard backend's JSON schema
use crate::domain::dashboard::Dashboard;
use crate::domain::grid::GridPos;
use crate::domain::panel::{Panel, PanelKind};
use crate::domain::target::{ResultFormat, Target};
use crate::domain::template::Template;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardJson {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub timezone: String,
    pub time: TimeJson,
    pub templating: TemplatingJson,
    pub panels: Vec<PanelJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeJson {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatingJson {
    pub list: Vec<TemplateJson>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateJson {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub datasource: String,
    pub query: String,
    pub include_all: bool,
    pub all_value: Option<String>,
    pub multi: bool,
    pub refresh: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelJson {
    pub id: Option<u32>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub datasource: String,
    pub grid_pos: GridPosJson,
    pub targets: Vec<TargetJson>,
    #[serde(flatten)]
    pub options: PanelOptionsJson,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PanelOptionsJson {
    #[serde(rename_all = "camelCase")]
    TimeSeries {
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Table {
        show_header: bool,
        filterable: bool,
        display_mode: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct GridPosJson {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetJson {
    pub expr: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub legend_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant: Option<bool>,
    pub ref_id: String,
}

pub fn dashboard_to_json(dashboard: &Dashboard) -> DashboardJson {
    // Tags behave as a set but keep declaration order for stable output
    let mut seen = HashSet::new();
    let tags = dashboard
        .tags
        .iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect();

    DashboardJson {
        title: dashboard.title.clone(),
        description: dashboard.description.clone(),
        tags,
        timezone: dashboard.timezone.clone(),
        time: TimeJson {
            from: dashboard.time.from.clone(),
            to: dashboard.time.to.clone(),
        },
        templating: TemplatingJson {
            list: dashboard.templating.list.iter().map(template_to_json).collect(),
        },
        panels: dashboard.panels.iter().map(panel_to_json).collect(),
        uid: dashboard.uid.clone(),
    }
}

fn template_to_json(template: &Template) -> TemplateJson {
    TemplateJson {
        name: template.name.clone(),
        label: template.label.clone(),
        kind: "query",
        datasource: template.datasource.clone(),
        query: template.query.clone(),
        include_all: template.include_all,
        all_value: template.all_value.clone(),
        multi: template.multi,
        refresh: template.refresh.code(),
    }
}

fn panel_to_json(panel: &Panel) -> PanelJson {
    let options = match &panel.kind {
        PanelKind::TimeSeries { unit } => PanelOptionsJson::TimeSeries { unit: unit.clone() },
        PanelKind::Table(table) => PanelOptionsJson::Table {
            show_header: table.show_header,
            filterable: table.filterable,
            display_mode: table.display_mode.clone(),
        },
    };

    PanelJson {
        id: panel.id,
        kind: panel.kind.type_name(),
        title: panel.title.clone(),
        datasource: panel.datasource.clone(),
        grid_pos: grid_pos_to_json(&panel.grid_pos),
        targets: panel.targets.iter().map(target_to_json).collect(),
        options,
    }
}

fn grid_pos_to_json(grid_pos: &GridPos) -> GridPosJson {
    GridPosJson {
        x: grid_pos.x,
        y: grid_pos.y,
        w: grid_pos.w,
        h: grid_pos.h,
    }
}

fn target_to_json(target: &Target) -> TargetJson {
    let (format, instant) = match target.format {
        ResultFormat::TimeSeries => (None, None),
        ResultFormat::Table => (Some("table"), None),
        ResultFormat::Instant => (Some("table"), Some(true)),
    };

    TargetJson {
        expr: target.expr.clone(),
        legend_format: target.legend_format.clone(),
        format,
        instant,
        ref_id: target.ref_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::TimeRange;
    use crate::domain::panel::TableOptions;
    use crate::domain::template::{TemplateRefresh, Templating};
    use serde_json::json;

    #[test]
    fn test_target_shapes() {
        let series = target_to_json(&Target::new("up", "A"));
        assert_eq!(serde_json::to_value(series).unwrap(), json!({"expr": "up", "refId": "A"}));

        let legend = target_to_json(&Target::new("up", "B").with_legend("{{job}}"));
        assert_eq!(
            serde_json::to_value(legend).unwrap(),
            json!({"expr": "up", "legendFormat": "{{job}}", "refId": "B"})
        );

        let table = target_to_json(&Target::new("up", "C").with_format(ResultFormat::Table));
        assert_eq!(
            serde_json::to_value(table).unwrap(),
            json!({"expr": "up", "format": "table", "refId": "C"})
        );

        let instant = target_to_json(&Target::new("up", "D").with_format(ResultFormat::Instant));
        assert_eq!(
            serde_json::to_value(instant).unwrap(),
            json!({"expr": "up", "format": "table", "instant": true, "refId": "D"})
        );
    }

    #[test]
    fn test_panel_variant_fields() {
        let mut ts = Panel::time_series(
            "RPS",
            "Prometheus",
            Some("ops".to_string()),
            vec![Target::new("up", "A")],
            GridPos::new(0, 0, 12, 8),
        );
        ts.id = Some(3);
        let value = serde_json::to_value(panel_to_json(&ts)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "type": "timeseries",
                "title": "RPS",
                "datasource": "Prometheus",
                "gridPos": {"x": 0, "y": 0, "w": 12, "h": 8},
                "targets": [{"expr": "up", "refId": "A"}],
                "unit": "ops"
            })
        );

        let table = Panel::table("Top", "Prometheus", vec![], GridPos::new(12, 0, 12, 8))
            .with_table_options(TableOptions {
                filterable: true,
                ..TableOptions::default()
            });
        let value = serde_json::to_value(panel_to_json(&table)).unwrap();
        assert_eq!(value["type"], "table");
        assert_eq!(value["showHeader"], true);
        assert_eq!(value["filterable"], true);
        assert_eq!(value["displayMode"], "auto");
        assert!(value.get("unit").is_none());
    }

    #[test]
    fn test_dashboard_top_level_shape() {
        let dashboard = Dashboard::new("X")
            .with_description("desc")
            .with_tags(["axum", "redirect", "axum"])
            .with_time(TimeRange::new("now-1h", "now"))
            .with_templating(Templating::new(vec![
                Template::new("status", "Status", "Prometheus", "label_values(up, status)")
                    .with_include_all(true, Some(".*".to_string()))
                    .with_refresh(TemplateRefresh::OnTimeRangeChange),
            ]));

        let value = serde_json::to_value(dashboard_to_json(&dashboard)).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["title", "description", "tags", "timezone", "time", "templating", "panels"] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
        assert!(value.get("uid").is_none());
        assert_eq!(value["tags"], json!(["axum", "redirect"]));
        assert_eq!(value["time"], json!({"from": "now-1h", "to": "now"}));
        assert_eq!(
            value["templating"]["list"][0],
            json!({
                "name": "status",
                "label": "Status",
                "type": "query",
                "datasource": "Prometheus",
                "query": "label_values(up, status)",
                "includeAll": true,
                "allValue": ".*",
                "multi": false,
                "refresh": 2
            })
        );
    }

    #[test]
    fn test_field_order_is_stable() {
        let dashboard = Dashboard::new("X").with_uid("x");
        let text = serde_json::to_string(&dashboard_to_json(&dashboard)).unwrap();
        assert!(text.starts_with("{\"title\":\"X\",\"description\":\"\",\"tags\":[]"));
        assert!(text.ends_with("\"panels\":[],\"uid\":\"x\"}"));
    }
}
