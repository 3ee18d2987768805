use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    export::encode::{ImageFormatChoice, encode_frame},
    foundation::{core::FrameRGBA, error::RemnantResult},
};

/// Destination of finished frames.
pub trait SurfaceSink {
    /// Encode and store one frame.
    fn finish(&mut self, frame: &FrameRGBA) -> RemnantResult<()>;
}

/// Writes each finished frame to one file, format chosen by extension.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
    format: ImageFormatChoice,
    quality: u8,
}

impl FileSink {
    /// Fails when the extension names no supported format.
    pub fn new(path: impl Into<PathBuf>, quality: u8) -> RemnantResult<Self> {
        let path = path.into();
        let format = ImageFormatChoice::from_path(&path)?;
        Ok(Self {
            path,
            format,
            quality,
        })
    }

    /// Output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format derived from the extension.
    pub fn format(&self) -> ImageFormatChoice {
        self.format
    }
}

impl SurfaceSink for FileSink {
    fn finish(&mut self, frame: &FrameRGBA) -> RemnantResult<()> {
        let bytes = encode_frame(frame, self.format, self.quality)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("write image '{}'", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "frame written");
        Ok(())
    }
}

/// Keeps encoded frames in memory.
#[derive(Clone, Debug)]
pub struct MemorySink {
    /// Encoding of every stored frame.
    pub format: ImageFormatChoice,
    /// JPEG quality.
    pub quality: u8,
    /// Encoded frames in arrival order.
    pub frames: Vec<Vec<u8>>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new(format: ImageFormatChoice, quality: u8) -> Self {
        Self {
            format,
            quality,
            frames: Vec::new(),
        }
    }
}

impl SurfaceSink for MemorySink {
    fn finish(&mut self, frame: &FrameRGBA) -> RemnantResult<()> {
        self.frames
            .push(encode_frame(frame, self.format, self.quality)?);
        Ok(())
    }
}

/// File name of the `index`-th frame of a sequence: `frame_0001.jpg`.
pub fn sequence_frame_name(index: u32, format: ImageFormatChoice) -> String {
    format!("frame_{index:04}.{}", format.extension())
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
