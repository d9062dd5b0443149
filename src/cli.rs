use std::path::{Component, Path, PathBuf};

use clap::Parser;

use crate::error::{ChartError, Result};
use crate::render::OutputFormat;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Process csv files with special headers into pdf charts and latex tables.
#[derive(Parser, Debug)]
#[command(name = "reprochart", version)]
pub struct Cli {
    /// Input file: `key: value` options, a `=` line, then CSV
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// Output chart file (defaults to the input path with a `.pdf` extension;
    /// a `.svg` extension writes SVG instead of PDF)
    #[arg(long, value_name = "PATH", default_value = "")]
    pub outfile: String,
}

/// Validated paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub infile: PathBuf,
    pub outfile: PathBuf,
    pub format: OutputFormat,
}

impl Cli {
    /// Check the arguments and resolve the output path.
    ///
    /// Fails with a usage error when the input does not exist, when the output
    /// is blank, or when both paths name the same file.
    pub fn resolve(&self) -> Result<Invocation> {
        let infile = normalize(&self.infile);
        if !infile.is_file() {
            return Err(ChartError::usage("Cannot find input file!"));
        }

        let outfile = if self.outfile.is_empty() {
            infile.with_extension("pdf")
        } else if self.outfile.trim().is_empty() {
            return Err(ChartError::usage("Cannot use an empty string!"));
        } else {
            PathBuf::from(&self.outfile)
        };

        if absolute(&infile)? == absolute(&outfile)? {
            return Err(ChartError::usage("The infile and outfile cannot be the same!"));
        }

        let format = OutputFormat::from_path(&outfile);
        Ok(Invocation {
            infile,
            outfile,
            format,
        })
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Lexically collapse `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Absolute, normalized form of `path`, relative to the working directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn cli(infile: &Path, outfile: &str) -> Cli {
        Cli {
            infile: infile.to_path_buf(),
            outfile: outfile.to_string(),
        }
    }

    fn usage_message(result: Result<Invocation>) -> String {
        match result {
            Err(ChartError::Usage(msg)) => msg,
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("a/./b/../c.csv")), PathBuf::from("a/c.csv"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn derives_pdf_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bench.csv");
        fs::write(&input, "===\nx,a\n").unwrap();

        let inv = cli(&input, "").resolve().unwrap();
        assert_eq!(inv.outfile, dir.path().join("bench.pdf"));
        assert_eq!(inv.format, OutputFormat::Pdf);
    }

    #[test]
    fn explicit_svg_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bench.csv");
        fs::write(&input, "===\nx,a\n").unwrap();
        let out = dir.path().join("chart.svg");

        let inv = cli(&input, out.to_str().unwrap()).resolve().unwrap();
        assert_eq!(inv.outfile, out);
        assert_eq!(inv.format, OutputFormat::Svg);
    }

    #[test]
    fn missing_input_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let msg = usage_message(cli(&dir.path().join("nope.csv"), "").resolve());
        assert_eq!(msg, "Cannot find input file!");
    }

    #[test]
    fn directory_input_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let msg = usage_message(cli(dir.path(), "").resolve());
        assert_eq!(msg, "Cannot find input file!");
    }

    #[test]
    fn same_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bench.csv");
        fs::write(&input, "===\nx,a\n").unwrap();
        let aliased = dir.path().join("sub").join("..").join("bench.csv");

        let msg = usage_message(cli(&input, aliased.to_str().unwrap()).resolve());
        assert_eq!(msg, "The infile and outfile cannot be the same!");
    }

    #[test]
    fn derived_output_equal_to_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chart.pdf");
        fs::write(&input, "===\nx,a\n").unwrap();

        let msg = usage_message(cli(&input, "").resolve());
        assert_eq!(msg, "The infile and outfile cannot be the same!");
    }

    #[test]
    fn blank_output_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bench.csv");
        fs::write(&input, "===\nx,a\n").unwrap();

        let msg = usage_message(cli(&input, "   ").resolve());
        assert_eq!(msg, "Cannot use an empty string!");
    }

    #[test]
    fn parses_command_line() {
        let parsed = Cli::try_parse_from(["reprochart", "in.csv", "--outfile", "out.pdf"]).unwrap();
        assert_eq!(parsed.infile, PathBuf::from("in.csv"));
        assert_eq!(parsed.outfile, "out.pdf");

        let parsed = Cli::try_parse_from(["reprochart", "in.csv"]).unwrap();
        assert_eq!(parsed.outfile, "");

        assert!(Cli::try_parse_from(["reprochart"]).is_err());
    }
}
