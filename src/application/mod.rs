// Application layer - Assembly pipeline and publication use case
pub mod assembler;
pub mod dashboard_sink;
pub mod publish_service;
pub mod validation;
