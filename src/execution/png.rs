//! Inspection of base64 PNG artifacts returned in cell results.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decoded PNG bytes plus the dimensions from the IHDR chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl PngImage {
    pub fn from_base64(data: &str) -> Result<Self> {
        let bytes = base64::decode(data.trim()).context("cell result is not valid base64")?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < 24 || bytes[..8] != SIGNATURE {
            bail!("cell result is not a PNG image");
        }
        if &bytes[12..16] != b"IHDR" {
            bail!("PNG image is missing its IHDR header");
        }
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        Ok(Self { width, height, bytes })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("failed to write image '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved PNG artifact");
        Ok(())
    }
}

impl fmt::Display for PngImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PNG {}x{}, {}", self.width, self.height, human_size(self.bytes.len()))
    }
}

/// One-line caption for an image artifact; decode errors become the caption.
pub fn caption(data: &str) -> String {
    match PngImage::from_base64(data) {
        Ok(img) => img.to_string(),
        Err(e) => format!("unreadable image: {e}"),
    }
}

fn human_size(n: usize) -> String {
    if n < 1024 {
        format!("{n} B")
    } else if n < 1024 * 1024 {
        format!("{:.1} KiB", n as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", n as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
pub(crate) fn fake_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}
