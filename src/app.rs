use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::cli::Invocation;
use crate::config::ChartConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::render::{write_chart, write_latex_table};

// ---------------------------------------------------------------------------
// One conversion run
// ---------------------------------------------------------------------------

/// Parse the input, print the LaTeX table to `table_out`, then write the chart.
///
/// Nothing is written to `table_out` or the chart path unless the whole input
/// parses.
pub fn run<W: Write>(invocation: &Invocation, table_out: &mut W) -> Result<()> {
    let document = load_file(&invocation.infile)
        .with_context(|| format!("reading {}", invocation.infile.display()))?;
    info!(
        "parsed {} options and {} data rows from {}",
        document.options.len(),
        document.table.rows.len(),
        invocation.infile.display()
    );

    if document.options.is_empty() {
        debug!("no options in the header; using defaults");
    }
    let config = ChartConfig::resolve(&document.options);
    let dataset = Dataset::from_table(&document.table);
    if dataset.series.is_empty() {
        warn!("header row has no series columns; table and chart will be empty");
    }

    write_latex_table(table_out, &dataset).context("writing LaTeX table")?;
    table_out.flush().context("writing LaTeX table")?;

    write_chart(&dataset, &config, &invocation.outfile, invocation.format)
        .with_context(|| format!("writing chart to {}", invocation.outfile.display()))?;
    Ok(())
}
