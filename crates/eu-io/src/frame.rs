//! Export of rendered 8-bit frames.
//!
//! - [`write_png`] - 8-bit RGB PNG
//! - [`write_ppm`] - binary PPM (P6)
//! - [`write`] - picks one of the above from the file extension

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use eu_core::OutputBuffer;
use tracing::debug;

use crate::{IoError, IoResult};

/// Frame file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// PNG, 8-bit RGB.
    Png,
    /// Binary PPM.
    Ppm,
}

impl FrameFormat {
    /// Guesses the format from the extension of `path`.
    ///
    /// ```rust
    /// use eu_io::frame::FrameFormat;
    ///
    /// assert_eq!(FrameFormat::from_path("out.PNG"), Some(FrameFormat::Png));
    /// assert_eq!(FrameFormat::from_path("out.ppm"), Some(FrameFormat::Ppm));
    /// assert_eq!(FrameFormat::from_path("out.exr"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "ppm" | "pnm" => Some(Self::Ppm),
            _ => None,
        }
    }
}

/// Writes `frame` in the format implied by the extension of `path`.
pub fn write<P: AsRef<Path>>(path: P, frame: &OutputBuffer) -> IoResult<()> {
    let path = path.as_ref();
    match FrameFormat::from_path(path) {
        Some(FrameFormat::Png) => write_png(path, frame),
        Some(FrameFormat::Ppm) => write_ppm(path, frame),
        None => Err(IoError::UnsupportedFormat(format!(
            "{} (expected .png or .ppm)",
            path.display()
        ))),
    }
}

/// Writes `frame` as an 8-bit RGB PNG.
pub fn write_png<P: AsRef<Path>>(path: P, frame: &OutputBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    // Frames are display-encoded already.
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(frame.pixels())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!("wrote {} {}x{} png", path.display(), frame.width(), frame.height());
    Ok(())
}

/// Writes `frame` as a binary PPM (P6, maxval 255).
pub fn write_ppm<P: AsRef<Path>>(path: P, frame: &OutputBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write!(w, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    w.write_all(frame.pixels())?;
    w.flush()?;

    debug!("wrote {} {}x{} ppm", path.display(), frame.width(), frame.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn checker() -> OutputBuffer {
        let mut buf = OutputBuffer::new(2, 2).unwrap();
        buf.pixels_mut()[..3].copy_from_slice(&[255, 0, 0]);
        buf.pixels_mut()[9..].copy_from_slice(&[0, 0, 255]);
        buf
    }

    #[test]
    fn ppm_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.ppm");
        write_ppm(&path, &checker()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n2 2\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..header.len() + 3], &[255, 0, 0]);
        assert_eq!(bytes.len(), header.len() + 12);
    }

    #[test]
    fn png_decodes_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = checker();
        write(&path, &frame).unwrap();

        let decoder = png::Decoder::new(std::io::BufReader::new(File::open(&path).unwrap()));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0u8; reader.output_buffer_size().unwrap()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..info.buffer_size()], frame.pixels());
    }

    #[test]
    fn unknown_extension() {
        let dir = tempdir().unwrap();
        let err = write(dir.path().join("frame.tif"), &checker()).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
