pub mod blob;
pub mod dimensions;
pub mod error;
pub mod raster;
pub mod thumbnail;
