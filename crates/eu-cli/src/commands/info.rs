//! Info command: PFM header and value statistics.

use crate::InfoArgs;
use anyhow::Result;
use eu_core::ImageSource;
use eu_io::PfmFile;
use rayon::prelude::*;
use std::fs;

/// Per-channel statistics over every pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stats {
    min: [f32; 3],
    max: [f32; 3],
    sum: [f64; 3],
    non_finite: u64,
}

impl Stats {
    fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            sum: [0.0; 3],
            non_finite: 0,
        }
    }

    fn add(mut self, rgb: [f32; 3]) -> Self {
        if rgb.iter().any(|v| !v.is_finite()) {
            self.non_finite += 1;
            return self;
        }
        for c in 0..3 {
            self.min[c] = self.min[c].min(rgb[c]);
            self.max[c] = self.max[c].max(rgb[c]);
            self.sum[c] += rgb[c] as f64;
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        for c in 0..3 {
            self.min[c] = self.min[c].min(other.min[c]);
            self.max[c] = self.max[c].max(other.max[c]);
            self.sum[c] += other.sum[c];
        }
        self.non_finite += other.non_finite;
        self
    }
}

fn stats<S: ImageSource>(src: &S) -> Stats {
    (0..src.pixel_count())
        .into_par_iter()
        .fold(Stats::empty, |s, i| s.add(src.sample(i)))
        .reduce(Stats::empty, Stats::merge)
}

/// Prints header fields and, unless `--header-only`, value ranges.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let pfm = super::open_pfm(path)?;
        print_text(&args, &pfm, file_size, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

fn print_text(args: &InfoArgs, pfm: &PfmFile, file_size: u64, verbose: bool) {
    let h = pfm.header();
    println!("{}", pfm.path().display());
    println!("  Resolution: {}x{}", h.width, h.height);
    println!("  Channels:   {}", h.channels);
    println!("  Pixels:     {}", h.width as u64 * h.height as u64);
    println!("  File size:  {}", super::format_size(file_size));
    println!("  Gain:       {}", h.gain());
    println!(
        "  Byte order: {}",
        if h.little_endian() { "little endian" } else { "big endian" }
    );
    if verbose {
        println!("  Data at:    {}", h.data_offset);
    }

    if args.header_only {
        return;
    }

    let s = stats(pfm);
    let n = h.width as u64 * h.height as u64 - s.non_finite;
    let names: &[&str] = if h.channels == 1 { &["Y"] } else { &["R", "G", "B"] };
    for (c, name) in names.iter().enumerate() {
        let mean = if n > 0 { s.sum[c] / n as f64 } else { 0.0 };
        println!(
            "  {name}: min {:.6} max {:.6} mean {:.6}",
            s.min[c], s.max[c], mean
        );
    }
    if s.non_finite > 0 {
        println!("  Non-finite: {} pixels", s.non_finite);
    }
}
