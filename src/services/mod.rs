pub mod generator;
pub mod reporter;
pub mod sentinel;

pub use generator::{image_stem, GeneratedImage, Generator};
pub use reporter::{format_duration, LoggingReporter};
pub use sentinel::SentinelFiles;
