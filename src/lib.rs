//! Dotfield is an interactive dot-grid background effect.
//!
//! A regular grid of dots reacts to the pointer: dots within `reach` grow and shift toward the
//! active color, an optional trail follows the pointer and decays when it rests. The crate is
//! host-agnostic:
//!
//! - [`compose_frame`] is a pure function from surface size, config and pointer state to a
//!   [`DrawList`]
//! - [`DotGrid::mount`] wires an [`EventHost`], a [`FrameScheduler`] and a [`DrawTarget`]
//!   together and owns the lifecycle
//! - [`CpuRaster`] turns draw lists into RGBA8 frames with `vello_cpu`
#![forbid(unsafe_code)]

mod foundation;

pub mod color;
pub mod component;
pub mod config;
pub mod grid;
pub mod host;
pub mod pointer;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod trail;

pub use crate::foundation::core::{ElementId, Point, Rect, TimestampMs, Vec2};
pub use crate::foundation::error::{DotfieldError, DotfieldResult};

pub use crate::color::{Rgb8, lerp_color, lerp_rgb};
pub use crate::component::{DotGrid, DotGridEnv, MountedDotGrid};
pub use crate::config::{AnimateMode, DotGridConfig, DrawEffect, MAX_BLUR, MIN_GAP};
pub use crate::grid::{DrawCommand, DrawList, compose_frame};
pub use crate::host::{EventHost, EventKind, HostEvent, MemoryHost};
pub use crate::pointer::{LocalPointerEvent, PointerSink, PointerTracker, Registration};
pub use crate::render::cpu::{CpuRaster, CpuRasterOpts, CpuTarget, FrameRGBA, FrameSlot};
pub use crate::render::target::{DrawTarget, RecordingTarget};
pub use crate::scheduler::{CancelToken, FrameScheduler, ManualScheduler};
pub use crate::session::replay::{ReplayScript, ReplayStats, ScriptEvent, replay};
pub use crate::session::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::surface::SurfaceSize;
pub use crate::trail::{PointerInput, PointerState, Trail};
