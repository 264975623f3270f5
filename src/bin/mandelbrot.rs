extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::{LogProgress, MandelbrotError, Region, SamplerConfig};
use mandelbrot::{DEFAULT_WORKERS, ESCAPE_RADIUS, ITERATION_CAP};
use num::Complex;
use std::str::FromStr;
use std::time::Instant;

/// Reads a corner of the region, written as "re,im".
fn parse_corner(s: &str) -> Result<Complex<f64>, String> {
    let mut parts = s.splitn(2, ',');
    match (parts.next(), parts.next()) {
        (Some(re), Some(im)) => match (f64::from_str(re.trim()), f64::from_str(im.trim())) {
            (Ok(re), Ok(im)) => Ok(Complex::new(re, im)),
            _ => Err(format!("Could not parse '{}' as a pair of numbers", s)),
        },
        _ => Err(format!("Expected a corner written as RE,IM, got '{}'", s)),
    }
}

/// Both corners together, checked as a region.
fn parse_region(leftlower: &str, rightupper: &str) -> Result<Region, MandelbrotError> {
    let corner = |s: &str| parse_corner(s).map_err(MandelbrotError::InvalidRegion);
    Region::from_corners(corner(leftlower)?, corner(rightupper)?)
}

fn validate_count(s: &str, low: usize, high: usize, what: &str) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(n) if n >= low && n <= high => Ok(()),
        Ok(_) => Err(format!("{} must be between {} and {}", what, low, high)),
        Err(_) => Err(format!("Could not parse {} from '{}'", what, s)),
    }
}

fn validate_positive(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(()),
        _ => Err(err.to_string()),
    }
}

const SIZE: &str = "size";
const OUTPUT: &str = "output";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const SERIAL: &str = "serial";

fn args() -> ArgMatches<'static> {
    let default_iterations: &'static str = Box::leak(ITERATION_CAP.to_string().into_boxed_str());
    let default_radius: &'static str = Box::leak(ESCAPE_RADIUS.to_string().into_boxed_str());
    let default_workers: &'static str = Box::leak(DEFAULT_WORKERS.to_string().into_boxed_str());

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Renders the Mandelbrot set as a black and white image")
        .arg(
            Arg::with_name(SIZE)
                .required(true)
                .index(1)
                .validator(|s| validate_count(&s, 1, 65_536, "image size"))
                .help("Width and height of the output image, ideally divisible by 4"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("output.png")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("n")
                .takes_value(true)
                .default_value(default_iterations)
                .validator(|s| validate_count(&s, 1, 10_000_000, "iteration count"))
                .help("Iterations before a point counts as a member of the set"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value(default_radius)
                .validator(|s| validate_positive(&s, "Escape radius must be a positive number"))
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-2.0")
                .validator(|s| parse_corner(&s).map(|_| ()))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("u")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.0,2.0")
                .validator(|s| parse_corner(&s).map(|_| ()))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_workers)
                .validator(|s| validate_count(&s, 1, 256, "thread count"))
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(SERIAL)
                .long(SERIAL)
                .short("s")
                .help("Render on a single thread"),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .expect("clap validated this argument")
}

fn run(matches: &ArgMatches) -> Result<(), MandelbrotError> {
    let size: usize = value(matches, SIZE);
    if size % 4 != 0 {
        warn!("Image size {} should be divisible by 4", size);
    }

    let region = parse_region(
        matches.value_of(LEFTLOWER).unwrap_or_default(),
        matches.value_of(RIGHTUPPER).unwrap_or_default(),
    )?;

    let threads: usize = value(matches, THREADS);
    let cpus = num_cpus::get();
    if threads > cpus {
        warn!("{} threads requested but only {} CPUs are available", threads, cpus);
    }
    let config = SamplerConfig::new(value(matches, ITERATIONS), value(matches, RADIUS), threads)?;

    let output = matches.value_of(OUTPUT).unwrap_or("output.png");
    let serial = matches.is_present(SERIAL);

    info!("Creating mandelbrot set");
    info!("Output file: {}", output);
    info!("Image size: {}x{}", size, size);
    info!("Iterations: {}, escape radius: {}", config.iterations, config.radius);
    info!(
        "Real axis: {} to {}, imaginary axis: {} to {}",
        region.re_low(),
        region.re_high(),
        region.im_low(),
        region.im_high()
    );
    if serial {
        info!("Workers: 1 (serial)");
    } else {
        info!("Workers: {}", config.workers);
    }

    let progress = LogProgress::new();
    let start = Instant::now();
    let bitmap = if serial {
        mandelbrot::compute_bitmap_with_progress(size, &region, &config, &progress)?
    } else {
        mandelbrot::compute_bitmap_threaded(size, &region, &config, &progress)?
    };
    info!("Rendered in {:?}", start.elapsed());
    info!(
        "{} of {} points are in the set",
        bitmap.count_bounded(),
        size * size
    );

    bitmap.write_png(output)?;
    info!("Wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
