//! Portable float map (PFM) files.
//!
//! ```text
//! PF\n                  "PF" = RGB, "Pf" = grey
//! <width> <height>\n
//! <scale>   ...   \n    sign: < 0 little endian, > 0 big endian; |scale| = gain
//! <width * height * channels f32>
//! ```
//!
//! Files are opened through a read-only memory map, so only the pages a
//! frame touches are ever read. Rows are exposed in file order.
//!
//! # Example
//!
//! ```rust,no_run
//! use eu_core::ImageSource;
//! use eu_io::PfmFile;
//!
//! let pfm = PfmFile::open("render.pfm")?;
//! println!("{}x{} gain {}", pfm.width(), pfm.height(), pfm.gain());
//! # Ok::<(), eu_io::IoError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use eu_core::ImageSource;
use memmap2::Mmap;
use tracing::debug;

use crate::{IoError, IoResult};

/// Shortest possible header, `PF\n1 1\n1\n`.
pub const MIN_HEADER_LEN: usize = 9;

/// Headers longer than this are rejected.
pub const MAX_HEADER_LEN: usize = 256;

/// Alignment of pixel data in files written by [`write`].
pub const DATA_ALIGN: usize = 16;

/// Parsed PFM header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfmHeader {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// 3 for `PF`, 1 for `Pf`.
    pub channels: u32,
    /// Raw scale value from the header.
    pub scale: f32,
    /// Byte offset of the first pixel.
    pub data_offset: usize,
}

impl PfmHeader {
    /// Parses the header at the start of `bytes`.
    ///
    /// ```rust
    /// use eu_io::pfm::PfmHeader;
    ///
    /// let h = PfmHeader::parse(b"Pf\n2 3\n-1.0\n").unwrap();
    /// assert_eq!((h.width, h.height, h.channels), (2, 3, 1));
    /// assert!(h.little_endian());
    /// assert_eq!(h.data_offset, 12);
    /// ```
    pub fn parse(bytes: &[u8]) -> IoResult<Self> {
        if bytes.len() < MIN_HEADER_LEN {
            return Err(IoError::invalid(format!(
                "{} bytes is too short for a PFM header",
                bytes.len()
            )));
        }
        let channels = match &bytes[..2] {
            b"PF" => 3,
            b"Pf" => 1,
            _ => return Err(IoError::invalid("missing PF/Pf magic")),
        };

        let head = &bytes[..bytes.len().min(MAX_HEADER_LEN)];
        let mut cursor = Cursor { bytes: head, pos: 2 };
        let width: u32 = cursor.number("width")?;
        let height: u32 = cursor.number("height")?;
        let scale: f32 = cursor.number("scale")?;
        let data_offset = cursor.end_of_line()?;

        if width == 0 || height == 0 {
            return Err(IoError::invalid(format!("zero-sized image {width}x{height}")));
        }
        if !scale.is_finite() || scale == 0.0 {
            return Err(IoError::invalid(format!("invalid scale {scale}")));
        }

        Ok(Self {
            width,
            height,
            channels,
            scale,
            data_offset,
        })
    }

    /// Negative scale marks little-endian data.
    #[inline]
    pub fn little_endian(&self) -> bool {
        self.scale < 0.0
    }

    /// Gain, the magnitude of the scale.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.scale.abs()
    }

    /// Bytes of pixel data the header describes.
    pub fn data_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.channels as usize)?
            .checked_mul(4)
    }
}

/// Whitespace separated tokens of the header.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn number<T: std::str::FromStr>(&mut self, what: &str) -> IoResult<T> {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::invalid(format!("cannot parse {what}")))
    }

    /// Skips padding up to and including the next newline.
    fn end_of_line(&mut self) -> IoResult<usize> {
        self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| self.pos + i + 1)
            .ok_or_else(|| IoError::invalid("unterminated header"))
    }
}

/// A PFM file mapped into memory.
///
/// Implements [`ImageSource`]; after [`PfmFile::close`] it reports itself
/// closed and grabs on it fail with `InvalidSource`.
#[derive(Debug)]
pub struct PfmFile {
    path: PathBuf,
    header: PfmHeader,
    map: Option<Mmap>,
}

impl PfmFile {
    /// Maps `path` and validates its header and size.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len() as usize;
        if len < MIN_HEADER_LEN {
            return Err(IoError::invalid(format!(
                "{}: {len} bytes is too short for a PFM file",
                path.display()
            )));
        }

        // SAFETY: read-only mapping. Another process truncating the file while
        // it is mapped can fault on access; PFM frames are written once.
        let map = unsafe { Mmap::map(&file)? };
        let header = PfmHeader::parse(&map)?;

        let expected = header
            .data_len()
            .ok_or_else(|| IoError::invalid("image size overflows"))?;
        let actual = map.len().saturating_sub(header.data_offset);
        if actual < expected {
            return Err(IoError::Truncated { expected, actual });
        }

        debug!(
            "opened {} {}x{}x{} scale={} data@{}",
            path.display(),
            header.width,
            header.height,
            header.channels,
            header.scale,
            header.data_offset
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            map: Some(map),
        })
    }

    /// File the map was created from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed header.
    pub fn header(&self) -> &PfmHeader {
        &self.header
    }

    /// Unmaps the file. Dimensions stay readable.
    pub fn close(&mut self) {
        if self.map.take().is_some() {
            debug!("closed {}", self.path.display());
        }
    }

    /// Asks the kernel to start reading the whole file.
    pub fn prefetch(&self) -> IoResult<()> {
        match &self.map {
            Some(map) => advise_will_need(map),
            None => Ok(()),
        }
    }

    #[inline]
    fn read(&self, map: &[u8], offset: usize) -> f32 {
        let bytes = &map[offset..offset + 4];
        if self.header.little_endian() {
            LittleEndian::read_f32(bytes)
        } else {
            BigEndian::read_f32(bytes)
        }
    }
}

#[cfg(unix)]
fn advise_will_need(map: &Mmap) -> IoResult<()> {
    map.advise(memmap2::Advice::WillNeed)?;
    Ok(())
}

#[cfg(not(unix))]
fn advise_will_need(_map: &Mmap) -> IoResult<()> {
    Ok(())
}

impl ImageSource for PfmFile {
    fn width(&self) -> u32 {
        self.header.width
    }

    fn height(&self) -> u32 {
        self.header.height
    }

    fn channels(&self) -> u32 {
        self.header.channels
    }

    fn gain(&self) -> f32 {
        self.header.gain()
    }

    fn is_open(&self) -> bool {
        self.map.is_some()
    }

    #[inline]
    fn sample(&self, index: usize) -> [f32; 3] {
        let Some(map) = &self.map else {
            return [0.0; 3];
        };
        let base = self.header.data_offset + index * self.header.channels as usize * 4;
        if self.header.channels == 1 {
            [self.read(map, base); 3]
        } else {
            [
                self.read(map, base),
                self.read(map, base + 4),
                self.read(map, base + 8),
            ]
        }
    }
}

/// Writes a little-endian PFM with pixel data aligned to [`DATA_ALIGN`].
///
/// The scale line is padded with spaces before its newline. `data` holds
/// `channels` (1 or 3) floats per pixel, rows in file order.
pub fn write<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    channels: u32,
    data: &[f32],
) -> IoResult<()> {
    let magic = match channels {
        3 => "PF",
        1 => "Pf",
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {n}"))),
    };
    if width == 0 || height == 0 {
        return Err(eu_core::Error::invalid_dimensions(width, height, "zero-sized image").into());
    }
    let expected = width as usize * height as usize * channels as usize;
    if data.len() != expected {
        return Err(IoError::EncodeError(format!(
            "expected {expected} samples, got {}",
            data.len()
        )));
    }

    let mut header = format!("{magic}\n{width} {height}\n-1.0");
    let pad = (DATA_ALIGN - (header.len() + 1) % DATA_ALIGN) % DATA_ALIGN;
    header.extend(std::iter::repeat_n(' ', pad));
    header.push('\n');

    let mut w = BufWriter::new(File::create(path.as_ref())?);
    w.write_all(header.as_bytes())?;
    for &v in data {
        w.write_f32::<LittleEndian>(v)?;
    }
    w.flush()?;

    debug!(
        "wrote {} {}x{}x{}",
        path.as_ref().display(),
        width,
        height,
        channels
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rgb_big_endian() {
        let h = PfmHeader::parse(b"PF\n640 480\n1.0\n").unwrap();
        assert_eq!((h.width, h.height, h.channels), (640, 480, 3));
        assert!(!h.little_endian());
        assert_eq!(h.gain(), 1.0);
        assert_eq!(h.data_offset, 15);
    }

    #[test]
    fn parse_gain_and_padding() {
        let h = PfmHeader::parse(b"PF\n1 1\n-4.0      \nxxxx").unwrap();
        assert!(h.little_endian());
        assert_eq!(h.gain(), 4.0);
        assert_eq!(h.data_offset, 18);
    }

    #[test]
    fn parse_rejects() {
        assert!(PfmHeader::parse(b"PF\n1").is_err());
        assert!(PfmHeader::parse(b"P6\n1 1\n255\n").is_err());
        assert!(PfmHeader::parse(b"PF\nfoo 1\n-1\n").is_err());
        assert!(PfmHeader::parse(b"PF\n0 1\n-1.0\n").is_err());
        assert!(PfmHeader::parse(b"PF\n1 1\n0.0\n").is_err());
        assert!(PfmHeader::parse(b"PF\n1 1\n-1.0").is_err());
    }

    #[test]
    fn data_len_overflow() {
        let h = PfmHeader {
            width: u32::MAX,
            height: u32::MAX,
            channels: 3,
            scale: -1.0,
            data_offset: 0,
        };
        assert!(h.data_len().is_none());
    }
}
