// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod definition;
pub mod file_sink;
pub mod grafana_sink;
pub mod json_mapper;
