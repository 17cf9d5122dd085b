//! Alpha compositing of overlay bitmaps onto a frame.
//!
//! The bitmap is centered on the overlay's center (mapped through the crop
//! rectangle), sized relative to the uncropped image width, and turned and
//! scaled by the linear part of the overlay transform. Output pixels are
//! inverse-mapped into the bitmap and sampled bilinearly.

use image::RgbaImage;
use kurbo::{Affine, Point, Rect};

use crate::buffer::{pixel_offset, PixelBuffer};
use crate::geometry::OverlayGeometry;

/// Composite `bitmap` onto `image`.
///
/// `scale` is the bitmap width as a fraction of the uncropped image width.
pub(crate) fn composite(
    image: &PixelBuffer,
    bitmap: &RgbaImage,
    geometry: &OverlayGeometry,
    scale: f64,
) -> PixelBuffer {
    let mut output = image.clone();
    let (bw, bh) = bitmap.dimensions();
    if bw == 0 || bh == 0 || scale <= 0.0 {
        return output;
    }

    let Some(center) = geometry.center_in_crop() else {
        log::warn!("Skipping overlay with empty crop rect {:?}", geometry.crop_rect);
        return output;
    };

    let [a, b, c, d, _, _] = geometry.transform.as_coeffs();
    let linear = Affine::new([a, b, c, d, 0.0, 0.0]);
    if linear.determinant().abs() < 1e-12 {
        log::warn!("Skipping overlay with degenerate transform {:?}", geometry.transform);
        return output;
    }
    let inverse = linear.inverse();

    let (w, h) = (image.width as f64, image.height as f64);
    let full_width = w / geometry.crop_rect.width();
    let size_w = scale * full_width;
    let size_h = size_w * bh as f64 / bw as f64;
    let origin = Point::new(center.x * w, center.y * h);

    let local = Rect::new(-size_w / 2.0, -size_h / 2.0, size_w / 2.0, size_h / 2.0);
    let bounds = transformed_bounds(linear, local, origin);
    let x_start = bounds.x0.floor().clamp(0.0, w) as u32;
    let y_start = bounds.y0.floor().clamp(0.0, h) as u32;
    let x_end = bounds.x1.ceil().clamp(0.0, w) as u32;
    let y_end = bounds.y1.ceil().clamp(0.0, h) as u32;

    for py in y_start..y_end {
        for px in x_start..x_end {
            let offset = Point::new(px as f64 + 0.5 - origin.x, py as f64 + 0.5 - origin.y);
            let p = inverse * offset;
            let u = (p.x - local.x0) / size_w * bw as f64 - 0.5;
            let v = (p.y - local.y0) / size_h * bh as f64 - 0.5;

            let Some((premultiplied, alpha)) = sample_bilinear(bitmap, u, v) else {
                continue;
            };
            if alpha <= 0.0 {
                continue;
            }

            let idx = pixel_offset(image.width, px, py);
            for ch in 0..3 {
                let dst = output.pixels[idx + ch] as f64;
                let blended = dst * (1.0 - alpha) + premultiplied[ch];
                output.pixels[idx + ch] = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}

/// Axis-aligned bounds of `rect` after `linear`, translated to `origin`.
fn transformed_bounds(linear: Affine, rect: Rect, origin: Point) -> Rect {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
    .map(|p| linear * p);

    let mut bounds = Rect::from_points(corners[0], corners[0]);
    for corner in &corners[1..] {
        bounds = bounds.union_pt(*corner);
    }
    bounds + origin.to_vec2()
}

/// Sample premultiplied RGB and alpha (0.0-1.0) at a bitmap coordinate.
///
/// Returns `None` outside the bitmap.
fn sample_bilinear(bitmap: &RgbaImage, x: f64, y: f64) -> Option<([f64; 3], f64)> {
    let (w, h) = bitmap.dimensions();
    if x < -0.5 || y < -0.5 || x > w as f64 - 0.5 || y > h as f64 - 0.5 {
        return None;
    }

    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let mut color = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (sx, sy, weight) in [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x1, y0, fx * (1.0 - fy)),
        (x0, y1, (1.0 - fx) * fy),
        (x1, y1, fx * fy),
    ] {
        let [r, g, b, a] = bitmap.get_pixel(sx, sy).0;
        let a = a as f64 / 255.0 * weight;
        color[0] += r as f64 * a;
        color[1] += g as f64 * a;
        color[2] += b as f64 * a;
        alpha += a;
    }

    Some((color, alpha))
}
