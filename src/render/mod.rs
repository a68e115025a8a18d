pub(crate) mod blur;
/// CPU rasterization of draw lists.
pub mod cpu;
/// Where composed frames go.
pub mod target;
