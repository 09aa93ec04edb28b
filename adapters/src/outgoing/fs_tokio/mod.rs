pub mod blob_store_fs;
