pub use kurbo::{Point, Rect, Vec2};

/// Opaque handle for an element owned by an [`EventHost`](crate::EventHost).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// Host clock reading in milliseconds (same domain as DOM `event.timeStamp`).
pub type TimestampMs = f64;

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
