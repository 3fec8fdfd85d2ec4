// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_sink;
pub mod mqtt_listener;
