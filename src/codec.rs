//! Binary graymap (`P5`) reading and writing.
//!
//! Header grammar: the magic `P5`, whitespace, then width, height and maxval
//! as unsigned decimal tokens. Whitespace and `#` comment lines may appear
//! before each token. Exactly one whitespace byte follows maxval, then
//! `width * height` raw pixel bytes in raster order.
//!
//! Files are always written with the three-line header
//! `P5\n{width} {height}\n{maxval}\n`. A failed save may leave a partial file.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{GraymapError, Result};
use crate::image::{Graymap, PIX_MAX};
use crate::metrics::{Counter, Metrics};

// C `isspace` set, which includes vertical tab.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Byte-level scanner over the textual part of the file.
struct HeaderReader<'a, R: BufRead> {
    inner: &'a mut R,
}

impl<'a, R: BufRead> HeaderReader<'a, R> {
    fn peek(&mut self) -> Result<Option<u8>> {
        let buf = self
            .inner
            .fill_buf()
            .map_err(GraymapError::io("reading header"))?;
        Ok(buf.first().copied())
    }

    fn bump(&mut self) {
        self.inner.consume(1);
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.bump();
        }
        Ok(b)
    }

    /// Skip any run of whitespace and comment lines.
    fn skip_separators(&mut self) -> Result<()> {
        loop {
            match self.peek()? {
                Some(b) if is_space(b) => self.bump(),
                Some(b'#') => {
                    // Comment runs through the end of the line.
                    while let Some(b) = self.next_byte()? {
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn magic(&mut self) -> Result<()> {
        let p = self.next_byte()?;
        let five = self.next_byte()?;
        if p != Some(b'P') || five != Some(b'5') {
            return Err(GraymapError::format("invalid magic number, expected P5"));
        }
        match self.peek()? {
            Some(b) if is_space(b) => Ok(()),
            _ => Err(GraymapError::format("whitespace expected after magic number")),
        }
    }

    fn number(&mut self, field: &str) -> Result<usize> {
        self.skip_separators()?;
        let invalid = || GraymapError::format(format!("invalid {field}"));
        let mut value: usize = 0;
        let mut digits = 0;
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(b - b'0')))
                .ok_or_else(invalid)?;
            digits += 1;
            self.bump();
        }
        if digits == 0 {
            return Err(invalid());
        }
        Ok(value)
    }
}

/// Decode a binary graymap from `reader`.
pub fn read_pgm<R: BufRead>(mut reader: R) -> Result<Graymap> {
    let (width, height, maxval) = {
        let mut header = HeaderReader { inner: &mut reader };
        header.magic()?;
        let width = header.number("width")?;
        let height = header.number("height")?;
        let maxval = header.number("maxval")?;
        if maxval == 0 || maxval > usize::from(PIX_MAX) {
            return Err(GraymapError::format("invalid maxval"));
        }
        match header.next_byte()? {
            Some(b) if is_space(b) => {}
            _ => return Err(GraymapError::format("whitespace expected after maxval")),
        }
        (width, height, maxval as u8)
    };

    // The partially filled image is dropped on error.
    let mut img = Graymap::new(width, height, maxval)?;
    reader
        .read_exact(img.as_raw_mut())
        .map_err(GraymapError::io("reading pixels"))?;
    Ok(img)
}

/// Encode `img` as a binary graymap into `writer`.
pub fn write_pgm<W: Write>(img: &Graymap, mut writer: W) -> Result<()> {
    write!(
        writer,
        "P5\n{} {}\n{}\n",
        img.width(),
        img.height(),
        img.maxval()
    )
    .map_err(GraymapError::io("writing header failed"))?;
    writer
        .write_all(img.as_raw())
        .map_err(GraymapError::io("writing pixels failed"))?;
    writer
        .flush()
        .map_err(GraymapError::io("writing pixels failed"))
}

/// Load a binary graymap file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graymap> {
    load_with(path, &mut ())
}

/// Load a binary graymap file, counting pixel accesses into `metrics`.
pub fn load_with<P: AsRef<Path>, M: Metrics>(path: P, metrics: &mut M) -> Result<Graymap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(GraymapError::io("open failed"))?;
    let img = read_pgm(BufReader::new(file))?;
    metrics.add(Counter::PixelAccess, img.len() as u64);
    debug!(
        "loaded {} ({}x{}, maxval {})",
        path.display(),
        img.width(),
        img.height(),
        img.maxval()
    );
    Ok(img)
}

/// Save `img` as a binary graymap file.
pub fn save<P: AsRef<Path>>(img: &Graymap, path: P) -> Result<()> {
    save_with(img, path, &mut ())
}

/// Save `img`, counting pixel accesses into `metrics`.
pub fn save_with<P: AsRef<Path>, M: Metrics>(img: &Graymap, path: P, metrics: &mut M) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(GraymapError::io("open failed"))?;
    write_pgm(img, BufWriter::new(file))?;
    metrics.add(Counter::PixelAccess, img.len() as u64);
    debug!("saved {} ({}x{})", path.display(), img.width(), img.height());
    Ok(())
}
