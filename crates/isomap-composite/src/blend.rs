use image::RgbaImage;

use crate::CoverageMask;

/// `a * b / 255`, rounded, without a division.
#[inline]
pub fn mul_div_255(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 128;
    (((t >> 8) + t) >> 8) as u8
}

// Overlap of a `w`×`h` sprite placed at (dx, dy) with the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    w: u32,
    h: u32,
}

fn clip(dst: (u32, u32), sprite: (u32, u32), dx: i32, dy: i32) -> Option<Span> {
    let x0 = i64::from(dx).max(0);
    let y0 = i64::from(dy).max(0);
    let x1 = (i64::from(dx) + i64::from(sprite.0)).min(i64::from(dst.0));
    let y1 = (i64::from(dy) + i64::from(sprite.1)).min(i64::from(dst.1));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Span {
        src_x: (x0 - i64::from(dx)) as u32,
        src_y: (y0 - i64::from(dy)) as u32,
        dst_x: x0 as u32,
        dst_y: y0 as u32,
        w: (x1 - x0) as u32,
        h: (y1 - y0) as u32,
    })
}

/// Composites `src` over `dst` at `(dx, dy)`, with per-pixel coverage from `mask`.
///
/// Color channels follow `dst = src*m + dst*(1-m)` weighted by the destination's
/// own alpha, so drawing onto a transparent background keeps the source color.
/// Only the area covered by both `src` and `mask` is touched.
pub fn alpha_over<M: CoverageMask + ?Sized>(
    dst: &mut RgbaImage,
    src: &RgbaImage,
    mask: &M,
    dx: i32,
    dy: i32,
) {
    let (mw, mh) = mask.dimensions();
    let sprite = (src.width().min(mw), src.height().min(mh));
    let Some(span) = clip(dst.dimensions(), sprite, dx, dy) else {
        return;
    };
    for row in 0..span.h {
        for col in 0..span.w {
            let (sx, sy) = (span.src_x + col, span.src_y + row);
            let m = mask.coverage(sx, sy);
            if m == 0 {
                continue;
            }
            let inp = src.get_pixel(sx, sy).0;
            let out = &mut dst.get_pixel_mut(span.dst_x + col, span.dst_y + row).0;
            if m == 255 {
                *out = [inp[0], inp[1], inp[2], 255];
                continue;
            }
            let inv = 255 - m;
            let out_a = out[3];
            let alpha = u32::from(m) + u32::from(mul_div_255(out_a, inv));
            for c in 0..3 {
                let v = u32::from(mul_div_255(inp[c], m))
                    + u32::from(mul_div_255(mul_div_255(out[c], out_a), inv));
                out[c] = (v * 255 / alpha).min(255) as u8;
            }
            out[3] = alpha as u8;
        }
    }
}

/// Multiplies the destination's color by `color` wherever `mask` covers it.
///
/// Partial coverage blends between the untouched and the fully tinted value.
/// Alpha is left as is, and pixels with zero coverage are not written.
pub fn tint_with_mask<M: CoverageMask + ?Sized>(
    dst: &mut RgbaImage,
    color: [u8; 3],
    mask: &M,
    dx: i32,
    dy: i32,
) {
    let Some(span) = clip(dst.dimensions(), mask.dimensions(), dx, dy) else {
        return;
    };
    for row in 0..span.h {
        for col in 0..span.w {
            let m = mask.coverage(span.src_x + col, span.src_y + row);
            if m == 0 {
                continue;
            }
            let out = &mut dst.get_pixel_mut(span.dst_x + col, span.dst_y + row).0;
            for c in 0..3 {
                let tinted = mul_div_255(out[c], color[c]);
                out[c] = if m == 255 {
                    tinted
                } else {
                    mul_div_255(out[c], 255 - m) + mul_div_255(tinted, m)
                };
            }
        }
    }
}
