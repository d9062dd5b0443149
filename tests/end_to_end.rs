// tests/end_to_end.rs

use std::fs;
use std::path::Path;

use reprochart::app;
use reprochart::cli::Cli;
use reprochart::ChartError;

const EXAMPLE: &str = "height:4\n===\nmethod,A,B\nx0,1,2\nx1,3,\nx2,,5\n";

fn cli(infile: &Path, outfile: &str) -> Cli {
    Cli {
        infile: infile.to_path_buf(),
        outfile: outfile.to_string(),
    }
}

fn run(infile: &Path, outfile: &str) -> anyhow::Result<String> {
    let invocation = cli(infile, outfile).resolve()?;
    let mut table = Vec::new();
    app::run(&invocation, &mut table)?;
    Ok(String::from_utf8(table)?)
}

#[test]
fn example_produces_table_and_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("example.csv");
    fs::write(&input, EXAMPLE).unwrap();

    let table = run(&input, "").unwrap();
    let expected = "\\begin{tabular}{cccc}\n\
                    \\toprule\n\
                    method & x0 & x1 & x2 \\\\\n\
                    \\midrule\n\
                    A & 1 & \\textbf{3} &  \\\\\n\
                    B & \\textbf{2} &  & \\textbf{5} \\\\\n\
                    \\bottomrule\n\
                    \\end{tabular}\n";
    assert_eq!(table, expected);

    let pdf = fs::read(dir.path().join("example.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn svg_output_uses_figure_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("example.csv");
    fs::write(&input, EXAMPLE).unwrap();
    let output = dir.path().join("chart.svg");

    run(&input, output.to_str().unwrap()).unwrap();
    let svg = fs::read_to_string(&output).unwrap();
    // height 4in, width defaults to 5in, at 72pt per inch
    assert!(svg.contains("width=\"360\""));
    assert!(svg.contains("height=\"288\""));
    assert!(svg.contains(">x2<"));
}

#[test]
fn malformed_header_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "figheight 4\n===\nm,A\nx0,1\n").unwrap();

    let err = run(&input, "").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChartError>(),
        Some(ChartError::Format { line: 1, .. })
    ));
    assert!(!dir.path().join("bad.pdf").exists());
}

#[test]
fn bad_option_value_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "figwidth: wide\n===\nm,A\nx0,1\n").unwrap();

    let err = run(&input, "").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChartError>(),
        Some(ChartError::Value { .. })
    ));
}

#[test]
fn non_numeric_cells_do_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sparse.csv");
    fs::write(&input, "===\nm,A,B\nx0,n/a,4\nx1,7,?\n").unwrap();

    let table = run(&input, "").unwrap();
    assert!(table.contains("A &  & \\textbf{7} \\\\"));
    assert!(table.contains("B & \\textbf{4} &  \\\\"));
}

#[test]
fn identical_paths_fail_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("example.csv");
    fs::write(&input, EXAMPLE).unwrap();

    let err = run(&input, input.to_str().unwrap()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChartError>(),
        Some(ChartError::Usage(msg)) if msg == "The infile and outfile cannot be the same!"
    ));
    assert_eq!(fs::read_to_string(&input).unwrap(), EXAMPLE);
}

#[test]
fn options_drive_the_chart() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("styled.csv");
    fs::write(
        &input,
        "Title: \"Speedup\"\nxtitle: \"Threads\"\nylogscale: true\nylimmin: 1\nylimmax: 16\nynumticks: 5\n\
         ===\nthreads,Ours\u{2020},Base\n1,1,1\n2,1.9,1.5\n4,3.7,2.2\n8,7.1,2.9\n",
    )
    .unwrap();
    let output = dir.path().join("styled.svg");

    let table = run(&input, output.to_str().unwrap()).unwrap();
    assert!(table.contains("Ours\\dag & \\textbf{1} & \\textbf{1.9}"));
    assert!(table.contains("Base & \\textbf{1} & 1.5"));

    let svg = fs::read_to_string(&output).unwrap();
    for text in ["Speedup", "Threads", ">16<", ">Base<"] {
        assert!(svg.contains(text), "missing {text}");
    }
}

#[test]
fn non_finite_axis_options_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let body = "===\nmethod,A,B\nx0,1,2\nx1,3,\nx2,,5\n";
    let headers = [
        "ylimmin: nan\n",
        "ymargin: nan\n",
        "ylimmax: inf\n",
        "xmargin: -inf\n",
        "figwidth: inf\nfigheight: nan\n",
    ];
    for (i, header) in headers.iter().enumerate() {
        let input = dir.path().join(format!("bad{i}.csv"));
        fs::write(&input, format!("{header}{body}")).unwrap();
        let output = dir.path().join(format!("bad{i}.svg"));

        run(&input, output.to_str().unwrap()).unwrap();
        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains(">x2<"), "{header:?}");
    }
}
