//! Ramp command: writes a horizontal gradient PFM for testing the viewer.

use crate::RampArgs;
use anyhow::{Context, Result};
use eu_io::pfm;
use tracing::info;

/// Value of column `x` in a ramp `width` wide that ends at `max`.
fn ramp_value(x: u32, width: u32, max: f32) -> f32 {
    if width <= 1 {
        return max;
    }
    max * x as f32 / (width - 1) as f32
}

/// Writes the ramp described by `args`.
pub fn run(args: RampArgs) -> Result<()> {
    let channels = if args.gray { 1 } else { 3 };
    let mut data = Vec::with_capacity(args.width as usize * args.height as usize * channels);
    for _ in 0..args.height {
        for x in 0..args.width {
            let v = ramp_value(x, args.width, args.max);
            data.extend(std::iter::repeat_n(v, channels));
        }
    }

    pfm::write(&args.output, args.width, args.height, channels as u32, &data)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;
    info!(
        "wrote {} {}x{} ramp 0..{}",
        args.output.display(),
        args.width,
        args.height,
        args.max
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(ramp_value(0, 256, 4.0), 0.0);
        assert_eq!(ramp_value(255, 256, 4.0), 4.0);
        assert_eq!(ramp_value(0, 1, 2.0), 2.0);
    }
}
