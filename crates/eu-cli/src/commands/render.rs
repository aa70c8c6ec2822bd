//! Render command: one grab of a PFM file written to PNG or PPM.

use crate::RenderArgs;
use anyhow::{Context, Result, bail};
use eu_color::{ConversionSettings, MatrixProfile, OutputSpace};
use eu_core::{ImageSource, OutputBuffer, Roi};
use eu_io::frame;
use eu_view::{Session, ViewSettings, grab, viewport};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Renders `args.input` into a `width` x `height` frame.
pub fn run(args: RenderArgs) -> Result<()> {
    if frame::FrameFormat::from_path(&args.output).is_none() {
        bail!("Unsupported output {} (expected .png or .ppm)", args.output.display());
    }

    let mut pfm = super::open_pfm(&args.input)?;
    pfm.prefetch()?;

    let mut out = OutputBuffer::new(args.width, args.height).context("Invalid frame size")?;
    let roi = if args.fit {
        viewport::fit(pfm.width(), pfm.height(), out.bounds())
    } else {
        Roi::new(args.x, args.y, args.scale)
    };
    debug!("roi x={} y={} scale={}", roi.x, roi.y, roi.scale);

    let color = ConversionSettings {
        exposure: args.exposure,
        colorin: args.colorin,
        colorout: args.colorout,
        curve: args.curve,
        gamut: args.gamut,
        channels: args.channel,
    };
    let settings = ViewSettings::for_buffer(&out).with_roi(roi).with_color(color);

    let mut session = Session::new();
    match (&args.profile, args.colorout) {
        (Some(name), OutputSpace::Custom) => {
            let profile = MatrixProfile::by_name(name)?;
            session.set_profile(Some(Arc::new(profile)));
        }
        (Some(name), _) => warn!("--profile {name} ignored without --colorout custom"),
        (None, OutputSpace::Custom) => {
            warn!("--colorout custom without --profile, colors pass through")
        }
        (None, _) => {}
    }

    let start = Instant::now();
    let report = grab(&pfm, &settings, &session, &mut out)
        .with_context(|| format!("Failed to render: {}", args.input.display()))?;
    let covered = report.covered;
    info!(
        "{}x{} -> {}x{} covered {}x{}+{}+{} in {:.1} ms",
        pfm.width(),
        pfm.height(),
        out.width(),
        out.height(),
        covered.w,
        covered.h,
        covered.x,
        covered.y,
        start.elapsed().as_secs_f64() * 1e3
    );
    if report.gamut_faults > 0 {
        warn!("{} pixels failed gamut projection", report.gamut_faults);
    }

    pfm.close();
    frame::write(&args.output, &out)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}
