pub mod jpeg_thumbnail_codec;
