pub mod image;
pub mod language;
pub mod messages;
pub mod prompt;

pub use image::ImagePayload;
pub use messages::{build_messages, parse_history};
