use crate::color::Rgb8;
use crate::foundation::core::Point;
use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::grid::{DrawCommand, DrawList};
use crate::render::blur::gaussian_blur_rgba8_premul;
use crate::render::target::DrawTarget;
use std::cell::RefCell;
use std::rc::Rc;
use vello_cpu::kurbo::Shape as _;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with straight (non-premultiplied) alpha, as image encoders expect.
    pub fn to_straight_alpha(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// Options for [`CpuRaster`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRasterOpts {
    /// If set, the frame is composited over this straight RGBA8 color.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Rasterizes [`DrawList`]s with `vello_cpu`.
pub struct CpuRaster {
    opts: CpuRasterOpts,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuRaster {
    pub fn new(opts: CpuRasterOpts) -> Self {
        Self { opts, ctx: None }
    }

    #[tracing::instrument(skip(self, list), fields(width = list.width, height = list.height))]
    pub fn rasterize(&mut self, list: &DrawList) -> DotfieldResult<FrameRGBA> {
        let (w, h) = (list.width, list.height);
        if w == 0 || h == 0 {
            return Ok(FrameRGBA {
                width: w,
                height: h,
                data: Vec::new(),
                premultiplied: true,
            });
        }
        let to_u16 = |v: u32, what: &str| {
            u16::try_from(v).map_err(|_| {
                DotfieldError::render(format!("surface {what} {v} exceeds {}", u16::MAX))
            })
        };
        let (w16, h16) = (to_u16(w, "width")?, to_u16(h, "height")?);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();

        let mut blur = None;
        for cmd in &list.commands {
            match *cmd {
                // The context was reset to transparent above.
                DrawCommand::Clear => {}
                DrawCommand::Blur { radius_px } => blur = Some(radius_px),
                DrawCommand::Dot {
                    center,
                    radius,
                    color,
                } => {
                    if radius <= 0.0 {
                        continue;
                    }
                    ctx.set_paint(paint(color));
                    let circle = vello_cpu::kurbo::Circle::new(to_cpu_point(center), radius);
                    ctx.fill_path(&circle.to_path(0.1));
                }
                DrawCommand::TrailSegment {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.set_paint(paint(color));
                    ctx.set_stroke(
                        vello_cpu::kurbo::Stroke::new(width)
                            .with_caps(vello_cpu::kurbo::Cap::Round)
                            .with_join(vello_cpu::kurbo::Join::Round),
                    );
                    let mut path = vello_cpu::kurbo::BezPath::new();
                    path.move_to(to_cpu_point(from));
                    path.line_to(to_cpu_point(to));
                    ctx.stroke_path(&path);
                }
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        if let Some(sigma) = blur {
            gaussian_blur_rgba8_premul(&mut data, w, h, sigma)?;
        }
        if let Some(bg) = self.opts.clear_rgba {
            composite_over(&mut data, bg);
        }

        Ok(FrameRGBA {
            width: w,
            height: h,
            data,
            premultiplied: true,
        })
    }
}

fn paint(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn to_cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

/// Premultiplied source-over onto a straight-alpha background color.
fn composite_over(data: &mut [u8], bg: [u8; 4]) {
    let ba = u32::from(bg[3]);
    let bg_premul = [
        u32::from(bg[0]) * ba / 255,
        u32::from(bg[1]) * ba / 255,
        u32::from(bg[2]) * ba / 255,
        ba,
    ];
    for px in data.chunks_exact_mut(4) {
        let inv = 255 - u32::from(px[3]);
        for c in 0..4 {
            let v = u32::from(px[c]) + (bg_premul[c] * inv + 127) / 255;
            px[c] = v.min(255) as u8;
        }
    }
}

/// Shared slot holding the latest frame produced by a [`CpuTarget`].
#[derive(Clone, Debug, Default)]
pub struct FrameSlot(Rc<RefCell<Option<FrameRGBA>>>);

impl FrameSlot {
    pub fn latest(&self) -> Option<FrameRGBA> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Option<FrameRGBA> {
        self.0.borrow_mut().take()
    }
}

/// [`DrawTarget`] that rasterizes every presented list into a [`FrameSlot`].
pub struct CpuTarget {
    raster: CpuRaster,
    slot: FrameSlot,
}

impl CpuTarget {
    pub fn new(opts: CpuRasterOpts) -> Self {
        Self {
            raster: CpuRaster::new(opts),
            slot: FrameSlot::default(),
        }
    }

    pub fn slot(&self) -> FrameSlot {
        self.slot.clone()
    }
}

impl DrawTarget for CpuTarget {
    fn present(&mut self, list: &DrawList) -> DotfieldResult<()> {
        let frame = self.raster.rasterize(list)?;
        *self.slot.0.borrow_mut() = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
