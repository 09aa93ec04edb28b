#[cfg(any(feature = "adapters", feature = "image", feature = "filesystem"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod config;
pub mod error;
pub mod infrastructure_config;
pub mod ports;
pub mod thumbnails;
