pub mod encode;

pub use encode::{encode_png, optimize_png, write_png, BACKGROUND};
