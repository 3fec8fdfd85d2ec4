// Application layer - Ingestion use case and ports
pub mod ingest_service;
pub mod record_sink;
