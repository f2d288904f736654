pub mod client;
pub mod item_image_generator;
pub mod outfit_suggester;
