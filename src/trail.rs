//! Pointer state and the decaying trail.
//!
//! All positions here are device pixels; conversion from CSS happens before input reaches
//! [`PointerState::apply`].

use crate::config::{AnimateMode, DotGridConfig};
use crate::foundation::core::{Point, TimestampMs};
use std::collections::VecDeque;

/// Recent pointer positions, most recent first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Point>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trail from head-first points, keeping at most `max_len`.
    pub fn from_points(points: impl IntoIterator<Item = Point>, max_len: usize) -> Self {
        Self {
            points: points.into_iter().take(max_len).collect(),
        }
    }

    /// Push a new head and drop tail points beyond `max_len`.
    pub fn push_head(&mut self, p: Point, max_len: usize) {
        self.points.push_front(p);
        while self.points.len() > max_len {
            self.points.pop_back();
        }
    }

    /// Pop one tail point if the trail is longer than `min_len`.
    pub fn pop_tail(&mut self, min_len: usize) -> bool {
        if self.points.len() > min_len {
            self.points.pop_back();
            true
        } else {
            false
        }
    }

    pub fn reset_to(&mut self, p: Point) {
        self.points.clear();
        self.points.push_back(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Option<Point> {
        self.points.front().copied()
    }

    /// Points from head to tail.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Consecutive `(newer, older)` pairs from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }
}

/// Pointer input already translated to device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Move(Point),
    Down(Point),
    Up,
    Leave,
    Cancel,
}

/// Everything the composer needs to know about the pointer, plus the bookkeeping for trail
/// decay.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
    mode: AnimateMode,
    trailing: bool,
    trail_length: usize,
    min_trail_length: usize,
    trailing_lifetime: f64,

    position: Option<Point>,
    active: bool,
    trail: Trail,
    last_move: Option<TimestampMs>,
}

impl PointerState {
    pub fn new(config: &DotGridConfig) -> Self {
        Self {
            mode: config.animate,
            trailing: config.trailing,
            trail_length: config.trail_length,
            min_trail_length: config.min_trail_length,
            trailing_lifetime: config.trailing_lifetime,
            position: None,
            active: config.animate.resting_active(),
            trail: Trail::new(),
            last_move: None,
        }
    }

    /// Apply one input. Every input is followed by exactly one redraw by the caller.
    pub fn apply(&mut self, input: PointerInput, now: TimestampMs) {
        match (self.mode, input) {
            (AnimateMode::OnHover, PointerInput::Move(p)) => {
                self.active = true;
                self.track(p, now);
            }
            (AnimateMode::OnAction, PointerInput::Move(p)) => {
                if self.active {
                    self.track(p, now);
                } else {
                    self.position = Some(p);
                }
            }
            (AnimateMode::OnAction, PointerInput::Down(p)) => {
                self.active = true;
                self.position = Some(p);
                self.last_move = Some(now);
                if self.trailing {
                    self.trail.reset_to(p);
                }
            }
            (AnimateMode::OnAction, PointerInput::Up) => {
                self.active = false;
                self.trail.clear();
            }
            (AnimateMode::OnHover, PointerInput::Down(_) | PointerInput::Up) => {}
            (_, PointerInput::Leave | PointerInput::Cancel) => {
                self.active = self.mode.resting_active();
                self.position = None;
                self.trail.clear();
            }
        }
    }

    fn track(&mut self, p: Point, now: TimestampMs) {
        self.position = Some(p);
        self.last_move = Some(now);
        if self.trailing {
            self.trail.push_head(p, self.trail_length);
        }
    }

    /// Decay tick. Returns `true` when a tail point was dropped and a redraw is due.
    pub fn decay(&mut self, now: TimestampMs) -> bool {
        let Some(last) = self.last_move else {
            return false;
        };
        if now - last <= self.trailing_lifetime {
            return false;
        }
        self.trail.pop_tail(self.min_trail_length)
    }

    /// Position that should influence the grid, if any.
    pub fn draw_pointer(&self) -> Option<Point> {
        if self.active { self.position } else { None }
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn last_move(&self) -> Option<TimestampMs> {
        self.last_move
    }
}

#[cfg(test)]
#[path = "../tests/unit/trail.rs"]
mod tests;
