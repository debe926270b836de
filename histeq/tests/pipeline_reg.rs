//! End-to-end regression test: decode, equalize, encode, decode again

use clap::Parser;
use histeq::cli::{self, Args};
use histeq::enhance::{EqualizeOptions, Equalizer};
use histeq::io::{self, ImageFormat};
use histeq::{Channel, Image};
use histeq_test::{RegParams, levels, regout_dir};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // Low-contrast input: four levels bunched near the dark end
    let input = levels(16, 16, &[20, 21, 22, 23]).expect("levels");
    let path = format!("{}/pipeline_input.png", regout_dir());
    io::write_image(&input, &path, ImageFormat::Png).expect("write input");

    let decoded = io::read_image(&path).expect("read input");
    rp.compare_images(&input, &decoded);

    let equalizer =
        Equalizer::new(EqualizeOptions::default().with_workers(4)).expect("equalizer");
    let (output, report) = equalizer.equalize_with_report(&decoded).expect("equalize");
    rp.compare_values(256.0, report.histogram.total() as f64, 0.0);

    // Four equally frequent levels spread to quarter steps
    let expected = levels(16, 16, &[64, 128, 191, 255]).expect("levels");
    rp.compare_images(&expected, &output);

    let out_path = format!("{}/pipeline_output.pgm", regout_dir());
    io::write_image(&output, &out_path, ImageFormat::Unknown).expect("write output");
    let reread: Image = io::read_image(&out_path).expect("read output");
    rp.compare_images(&output, &reread);
    rp.compare_values(
        255.0,
        reread.sample(3, 0, Channel::FIRST).unwrap_or(0) as f64,
        0.0,
    );

    assert!(rp.cleanup());
}

/// Equalized pipeline output checked against its golden file.
#[test]
fn pipeline_out_reg() {
    let mut rp = RegParams::new("pipeline_out");

    let input = levels(16, 16, &[20, 21, 22, 23]).expect("levels");
    let equalizer =
        Equalizer::new(EqualizeOptions::default().with_workers(2)).expect("equalizer");
    let output = equalizer.equalize(&input).expect("equalize");
    rp.write_image_and_check(&output, ImageFormat::Pnm).expect("write");

    assert!(rp.cleanup());
}

/// The command-line entry point end to end, on files under `tests/regout`.
#[test]
fn cli_run_reg() {
    let mut rp = RegParams::new("cli_run");

    let input = levels(8, 6, &[20, 21, 22, 23]).expect("levels");
    let in_path = format!("{}/cli_input.bmp", regout_dir());
    let out_path = format!("{}/cli_output.pgm", regout_dir());
    io::write_image(&input, &in_path, ImageFormat::Bmp).expect("write input");

    let args = Args::try_parse_from(["heq", "3", in_path.as_str(), "-o", out_path.as_str()])
        .expect("parse");
    let summary = cli::run(&args).expect("run");
    rp.compare_values(3.0, summary.workers as f64, 0.0);
    rp.compare_values(8.0, summary.width as f64, 0.0);
    rp.compare_values(6.0, summary.height as f64, 0.0);
    rp.compare_values(1.0, if summary.format == ImageFormat::Pnm { 1.0 } else { 0.0 }, 0.0);

    let written = io::read_image(&out_path).expect("read output");
    let expected = levels(8, 6, &[64, 128, 191, 255]).expect("levels");
    rp.compare_images(&expected, &written);

    // `main` turns any error from `run` into exit status 1
    let missing = "/nonexistent/input.png";
    let args = Args::try_parse_from(["heq", "2", missing, "-o", out_path.as_str()])
        .expect("parse");
    rp.compare_values(1.0, if cli::run(&args).is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup());
}
