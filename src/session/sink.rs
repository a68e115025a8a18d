use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::render::cpu::FrameRGBA;
use std::path::PathBuf;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    pub fps: u32,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices between `begin`
/// and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> DotfieldResult<()>;
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotfieldResult<()>;
    fn end(&mut self) -> DotfieldResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DotfieldResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotfieldResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DotfieldResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> DotfieldResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            DotfieldError::render(format!(
                "failed to create output dir '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> DotfieldResult<()> {
        let path = self.dir.join(format!("frame_{idx:05}.png"));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> DotfieldResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode `frame` as a straight-alpha RGBA PNG.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> DotfieldResult<()> {
    let straight = frame.to_straight_alpha();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DotfieldError::render(format!("failed to write png '{}': {e}", path.display())))
}
