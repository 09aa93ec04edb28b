pub mod decode_blocking_tokio;
