pub mod fs_tokio;
pub mod image_rs;
pub mod processing_log;
pub mod tokio_spawn;
