//! Loading, rendering and exporting utility reports from exported billing sheets

pub mod config;
pub mod constants;
pub mod export;
pub mod observability;
pub mod render;
pub mod source;
