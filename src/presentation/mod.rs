// Presentation layer - Command line and run report
pub mod cli;
pub mod report;
