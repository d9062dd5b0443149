//! Turn option-annotated CSV files into a line chart (PDF or SVG) and a
//! LaTeX `tabular` with the best value per column in bold.

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod render;

pub use config::ChartConfig;
pub use error::ChartError;
