// Domain layer - Dashboard value graph
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod panel;
pub mod target;
pub mod template;
