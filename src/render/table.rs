use std::io::{self, Write};

use crate::data::model::Dataset;

/// Series names may carry a dagger footnote mark.
const DAGGER: char = '\u{2020}';

// ---------------------------------------------------------------------------
// LaTeX tabular output
// ---------------------------------------------------------------------------

/// Write `dataset` as a booktabs `tabular`: one row per series, one column per
/// x category plus the label column.
///
/// At each x position every value equal to the position's best (largest
/// present) value is bold, so ties are all bold. Missing cells stay blank.
pub fn write_latex_table<W: Write>(out: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "\\begin{{tabular}}{{{}}}", "c".repeat(dataset.len() + 1))?;
    writeln!(out, "\\toprule")?;
    writeln!(out, "{} \\\\", row(&dataset.x_label, dataset.categories.iter().cloned()))?;
    writeln!(out, "\\midrule")?;

    let best: Vec<Option<f64>> = (0..dataset.len()).map(|i| dataset.best_at(i)).collect();
    for series in &dataset.series {
        let cells = series.values.iter().zip(&best).map(|(value, best)| match value {
            Some(v) if Some(*v) == *best => format!("\\textbf{{{v}}}"),
            Some(v) => v.to_string(),
            None => String::new(),
        });
        writeln!(out, "{} \\\\", row(&escape_name(&series.name), cells))?;
    }

    writeln!(out, "\\bottomrule")?;
    writeln!(out, "\\end{{tabular}}")?;
    Ok(())
}

fn row(label: &str, cells: impl Iterator<Item = String>) -> String {
    std::iter::once(label.to_string())
        .chain(cells)
        .collect::<Vec<_>>()
        .join(" & ")
}

fn escape_name(name: &str) -> String {
    name.replace(DAGGER, "\\dag")
}
