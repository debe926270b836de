//! Command-line front end for the `heq` binary
//!
//! ```text
//! heq <THREADS> <INPUT> [-o OUTPUT] [-c CHANNEL] [--all-channels] [-v]
//! ```
//!
//! [`run`] does the work and returns an error instead of exiting, so the
//! binary maps any failure to exit status 1.

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use histeq_core::Channel;
use histeq_enhance::{EqualizeOptions, Equalizer};
use histeq_io::{self as io, ImageFormat};
use tracing::{debug, info};

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "output.png";

/// Parsed command-line arguments
#[derive(Debug, Parser)]
#[command(name = "heq")]
#[command(version, about = "Parallel histogram equalization", long_about = None)]
pub struct Args {
    /// Number of worker threads
    #[arg(value_name = "THREADS", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Input image (PNG, JPEG, BMP, PNM or TGA)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image; the extension picks the encoder, PNG if unknown
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Channel to equalize; the others are copied unchanged
    #[arg(short, long, value_name = "N", default_value_t = 0, conflicts_with = "all_channels")]
    pub channel: usize,

    /// Equalize every color channel independently (alpha is kept)
    #[arg(long)]
    pub all_channels: bool,

    /// Log phase timings and image details
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Worker pool size
    pub workers: usize,
    /// Decoded image width
    pub width: u32,
    /// Decoded image height
    pub height: u32,
    /// Encoder used for the output file
    pub format: ImageFormat,
    /// Time spent equalizing, excluding decode and encode
    pub elapsed: Duration,
}

/// Encoder for `path`, PNG when the extension names no known format.
pub fn output_format(path: &std::path::Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        ImageFormat::Unknown => ImageFormat::Png,
        format => format,
    }
}

/// Decode the input, equalize it and encode the output.
///
/// # Errors
///
/// Any decode, equalization or encode error, boxed.
pub fn run(args: &Args) -> Result<RunSummary, Box<dyn Error>> {
    let options = EqualizeOptions::default()
        .with_workers(args.threads as usize)
        .with_channel(Channel::new(args.channel));
    let equalizer = Equalizer::new(options)?;
    println!("{} thread(s)", equalizer.workers());

    let image = io::read_image(&args.input)?;
    println!("Image size is {} by {}.", image.width(), image.height());
    debug!(channels = image.channels(), "decoded {}", args.input.display());

    let start = Instant::now();
    let output = if args.all_channels {
        equalizer.equalize_all_channels(&image)?
    } else {
        equalizer.equalize(&image)?
    };
    let elapsed = start.elapsed();
    println!(
        "Histogram equalization took {:.6} seconds",
        elapsed.as_secs_f64()
    );

    let format = output_format(&args.output);
    io::write_image(&output, &args.output, format)?;
    info!(path = %args.output.display(), ?format, "wrote output");

    Ok(RunSummary {
        workers: equalizer.workers(),
        width: image.width(),
        height: image.height(),
        format,
        elapsed,
    })
}
