use crate::foundation::error::{DotfieldError, DotfieldResult};

/// Separable Gaussian blur of a premultiplied RGBA8 buffer, in place.
///
/// `sigma` is the standard deviation in pixels (canvas `blur(<sigma>px)`); the kernel spans
/// `ceil(3 * sigma)` pixels on each side, capped at the larger image side. Edges clamp.
pub(crate) fn gaussian_blur_rgba8_premul(
    buf: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
) -> DotfieldResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DotfieldError::render("blur buffer size overflow"))?;
    if buf.len() != expected_len {
        return Err(DotfieldError::render(
            "blur expects a buffer of width*height*4 bytes",
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(DotfieldError::validation("blur sigma must be finite and >= 0"));
    }
    let radius = ((3.0 * sigma).ceil() as u32).min(width.max(height));
    if radius == 0 || width == 0 || height == 0 {
        return Ok(());
    }

    let kernel = kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; expected_len];
    pass(buf, &mut tmp, width, height, &kernel, Axis::X);
    pass(&tmp, buf, width, height, &kernel, Axis::Y);
    Ok(())
}

/// Normalized weights in Q16 that sum to exactly `1 << 16`.
fn kernel_q16(radius: u32, sigma: f64) -> Vec<u32> {
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    let mut q: Vec<u32> = weights
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let total: i64 = q.iter().map(|&w| i64::from(w)).sum();
    let mid = q.len() / 2;
    q[mid] = (i64::from(q[mid]) + 65536 - total).clamp(0, 65536) as u32;
    q
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = ((acc[c] + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
