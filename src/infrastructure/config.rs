use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub definitions: DefinitionsSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub grafana: Option<GrafanaSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefinitionsSettings {
    #[serde(default = "default_definitions_directory")]
    pub directory: PathBuf,
}

impl Default for DefinitionsSettings {
    fn default() -> Self {
        Self {
            directory: default_definitions_directory(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            pretty: true,
        }
    }
}

/// Provisioning API of the dashboard backend
#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaSettings {
    pub url: String,
    pub token: String,
    #[serde(default)]
    pub folder_uid: Option<String>,
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

fn default_definitions_directory() -> PathBuf {
    PathBuf::from("dashboards")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("build/dashboards")
}

fn default_true() -> bool {
    true
}

/// Loads `<name>.{toml,...}` if present, then `DASHGEN__SECTION__KEY`
/// environment overrides.
pub fn load_app_config(name: &str) -> anyhow::Result<AppConfig> {
    load_app_config_with(name, env_overrides())
}

fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("DASHGEN").separator("__")
}

fn load_app_config_with(name: &str, environment: config::Environment) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_app_config("config/does-not-exist").unwrap();

        assert_eq!(config.definitions.directory, PathBuf::from("dashboards"));
        assert_eq!(config.output.directory, PathBuf::from("build/dashboards"));
        assert!(config.output.pretty);
        assert!(config.grafana.is_none());
    }

    #[test]
    fn test_environment_overrides_file_settings() {
        let vars: std::collections::HashMap<String, String> = [
            ("DASHGEN__OUTPUT__PRETTY", "false"),
            ("DASHGEN__GRAFANA__URL", "http://grafana:3000"),
            ("DASHGEN__GRAFANA__TOKEN", "from-env"),
            ("UNRELATED__OUTPUT__PRETTY", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = load_app_config_with(
            concat!(env!("CARGO_MANIFEST_DIR"), "/config/dashgen"),
            env_overrides().source(Some(vars)),
        )
        .unwrap();

        assert!(!config.output.pretty);
        assert_eq!(config.output.directory, PathBuf::from("build/dashboards"));

        let grafana = config.grafana.unwrap();
        assert_eq!(grafana.url, "http://grafana:3000");
        assert_eq!(grafana.token, "from-env");
        assert!(grafana.overwrite);
    }

    #[test]
    fn test_parse_grafana_section() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [output]
                directory = "out"
                pretty = false

                [grafana]
                url = "http://localhost:3000"
                token = "secret"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert!(!config.output.pretty);
        assert_eq!(config.definitions.directory, PathBuf::from("dashboards"));

        let grafana = config.grafana.unwrap();
        assert_eq!(grafana.url, "http://localhost:3000");
        assert_eq!(grafana.token, "secret");
        assert_eq!(grafana.folder_uid, None);
        assert!(grafana.overwrite);
    }
}
