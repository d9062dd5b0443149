//! Output side: the LaTeX table on stdout and the chart file.

pub mod chart;
pub mod style;
pub mod table;

pub use chart::{write_chart, OutputFormat};
pub use table::write_latex_table;
