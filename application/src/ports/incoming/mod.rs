pub mod thumbnails;
