mod client;
mod color;
mod scan;

pub use client::*;
pub use color::*;
pub use scan::*;

pub const LATEST_COLOR_KEY: &str = "latest_color";

pub const SCAN_CONTROL_KEY: &str = "scan_control";
