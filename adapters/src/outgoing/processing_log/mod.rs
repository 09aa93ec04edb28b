pub mod tracing_processing_log;
