pub mod blob_store;
pub mod blocking_task;
pub mod image_codec;
pub mod processing_log;
