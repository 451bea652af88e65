//! Domain models

pub mod video;

pub use video::{LocatorField, NewVideo, VideoRecord};
