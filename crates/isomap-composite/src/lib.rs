//! Masked alpha-over compositing and masked color tinting on RGBA images.
//!
//! All blending is 8-bit fixed point. Every operation clips to the part of the
//! source/mask that lands inside the destination, so offsets may be negative or
//! run off any edge.
#![forbid(unsafe_code)]

mod blend;
mod mask;

pub use blend::{alpha_over, mul_div_255, tint_with_mask};
pub use mask::{CoverageMask, Mask};
