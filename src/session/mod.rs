/// Scripted pointer sessions rendered frame by frame.
pub mod replay;
/// Frame consumers.
pub mod sink;
