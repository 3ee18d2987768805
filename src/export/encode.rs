use std::path::Path;

use anyhow::Context;
use image::ImageEncoder as _;

use crate::foundation::{
    core::FrameRGBA,
    error::{RemnantError, RemnantResult},
};

/// Encoded output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormatChoice {
    /// Baseline JPEG, alpha dropped.
    Jpeg,
    /// 8-bit RGBA PNG.
    Png,
}

impl ImageFormatChoice {
    /// Pick the format from a file extension (`jpg`, `jpeg`, `png`; case-insensitive).
    pub fn from_path(path: &Path) -> RemnantResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(RemnantError::configuration(format!(
                "unsupported output extension for '{}' (expected .jpg, .jpeg or .png)",
                path.display()
            ))),
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Encode a finished frame.
///
/// JPEG drops alpha and uses `quality` (1..=100); PNG keeps straight RGBA and ignores it.
pub fn encode_frame(
    frame: &FrameRGBA,
    format: ImageFormatChoice,
    quality: u8,
) -> RemnantResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(RemnantError::render(format!(
            "frame holds {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let rgba = frame.to_straight_rgba8();
    let mut out = Vec::new();
    match format {
        ImageFormatChoice::Jpeg => {
            if !(1..=100).contains(&quality) {
                return Err(RemnantError::configuration(
                    "jpeg quality must be in 1..=100",
                ));
            }
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .context("encode jpeg")?;
        }
        ImageFormatChoice::Png => {
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    &rgba,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .context("encode png")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
