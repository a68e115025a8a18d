use crate::color::Rgb8;
use crate::component::{DotGrid, DotGridEnv};
use crate::config::DotGridConfig;
use crate::foundation::core::{Point, Rect, TimestampMs};
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::host::{EventKind, HostEvent, MemoryHost};
use crate::render::cpu::{CpuRasterOpts, CpuTarget};
use crate::scheduler::ManualScheduler;
use crate::session::sink::{FrameSink, SinkConfig};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// A scripted pointer session.
///
/// Coordinates are element-local CSS pixels; times are milliseconds from the session start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplayScript {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_ratio")]
    pub device_pixel_ratio: f64,
    #[serde(default = "default_fps")]
    pub fps: u32,
    pub duration_ms: f64,
    /// Opaque background; transparent when absent.
    #[serde(default)]
    pub background: Option<Rgb8>,
    #[serde(default)]
    pub config: DotGridConfig,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

fn default_ratio() -> f64 {
    1.0
}

fn default_fps() -> u32 {
    60
}

/// One scripted input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptEvent {
    Move { t: f64, x: f64, y: f64 },
    Down { t: f64, x: f64, y: f64 },
    Up { t: f64 },
    Leave { t: f64 },
    Cancel { t: f64 },
    /// Resize the element to `width x height` CSS pixels.
    Resize { t: f64, width: f64, height: f64 },
}

impl ScriptEvent {
    pub fn time(&self) -> TimestampMs {
        match *self {
            Self::Move { t, .. }
            | Self::Down { t, .. }
            | Self::Up { t }
            | Self::Leave { t }
            | Self::Cancel { t }
            | Self::Resize { t, .. } => t,
        }
    }
}

impl ReplayScript {
    pub fn validate(&self) -> DotfieldResult<()> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(DotfieldError::validation(
                "replay width/height must be finite and > 0",
            ));
        }
        if self.fps == 0 {
            return Err(DotfieldError::validation("replay fps must be > 0"));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(DotfieldError::validation(
                "replay durationMs must be finite and >= 0",
            ));
        }
        if self.events.iter().any(|e| !e.time().is_finite()) {
            return Err(DotfieldError::validation("replay event times must be finite"));
        }
        self.config.validate()
    }

    /// Number of frames rendered: one per frame interval, at least one.
    pub fn frame_count(&self) -> u64 {
        let n = (self.duration_ms * f64::from(self.fps) / 1000.0).ceil();
        (n as u64).max(1)
    }

    pub fn frame_time(&self, idx: u64) -> TimestampMs {
        idx as f64 * 1000.0 / f64::from(self.fps)
    }
}

/// Summary of a finished replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: u64,
    pub events: usize,
    pub draws: u64,
}

/// Mount a grid on an in-memory host, feed it the script and push one rasterized frame per
/// frame interval into `sink`.
///
/// Events due at or before a frame's timestamp are dispatched before that frame's decay tick.
#[tracing::instrument(skip_all, fields(frames = script.frame_count()))]
pub fn replay(script: &ReplayScript, sink: &mut dyn FrameSink) -> DotfieldResult<ReplayStats> {
    script.validate()?;

    let host = MemoryHost::new();
    host.set_device_pixel_ratio(script.device_pixel_ratio);
    let element = host.create_element(Rect::new(0.0, 0.0, script.width, script.height));
    let scheduler = ManualScheduler::new();
    let env = DotGridEnv::new(Rc::new(host.clone()), Rc::new(scheduler.clone()));

    let target = CpuTarget::new(CpuRasterOpts {
        clear_rgba: script.background.map(Rgb8::to_rgba8),
    });
    let slot = target.slot();
    let mut grid = DotGrid::mount(&env, element, script.config.clone(), Box::new(target))?;

    let first = slot
        .latest()
        .ok_or_else(|| DotfieldError::render("grid did not draw on mount"))?;
    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        fps: script.fps,
    })?;

    let mut events: Vec<ScriptEvent> = script.events.clone();
    events.sort_by(|a, b| a.time().total_cmp(&b.time()));
    let mut next_event = 0usize;

    let frames = script.frame_count();
    for idx in 0..frames {
        let now = script.frame_time(idx);
        while let Some(ev) = events.get(next_event).filter(|e| e.time() <= now) {
            dispatch(&host, element, ev);
            next_event += 1;
        }
        scheduler.run_frame(now);

        let frame = slot
            .latest()
            .ok_or_else(|| DotfieldError::render("no frame available"))?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;

    let stats = ReplayStats {
        frames,
        events: next_event,
        draws: grid.draw_count(),
    };
    grid.unmount();
    tracing::debug!(?stats, "replay finished");
    Ok(stats)
}

fn dispatch(host: &MemoryHost, element: crate::foundation::core::ElementId, ev: &ScriptEvent) {
    let pointer = |kind, t, x, y| {
        host.dispatch(element, HostEvent::new(kind, Point::new(x, y), t));
    };
    match *ev {
        ScriptEvent::Move { t, x, y } => pointer(EventKind::PointerMove, t, x, y),
        ScriptEvent::Down { t, x, y } => pointer(EventKind::PointerDown, t, x, y),
        ScriptEvent::Up { t } => pointer(EventKind::PointerUp, t, 0.0, 0.0),
        ScriptEvent::Leave { t } => pointer(EventKind::PointerLeave, t, 0.0, 0.0),
        ScriptEvent::Cancel { t } => pointer(EventKind::PointerCancel, t, 0.0, 0.0),
        ScriptEvent::Resize { width, height, .. } => {
            host.set_element_rect(element, Rect::new(0.0, 0.0, width, height));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/replay.rs"]
mod tests;
