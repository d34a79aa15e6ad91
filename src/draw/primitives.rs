use kurbo::{Circle, Point, Shape as _};

use crate::foundation::color::Color;
use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;
use crate::surface::context::{RGBA8_CHANNELS, RenderContext};

/// A `width x height` canvas filled with `color`.
pub fn solid(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    color: Color,
) -> OtfbmResult<Canvas<'_>> {
    ctx.create_canvas(width, height, color)
}

/// Checkerboard of `checks_x x checks_y` cells, starting with `col1` at the top-left.
pub fn checkered(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    checks_x: u32,
    checks_y: u32,
    col1: Color,
    col2: Color,
) -> OtfbmResult<Canvas<'_>> {
    if checks_x == 0 || checks_y == 0 {
        return Err(OtfbmError::validation(format!(
            "check size must be non-zero, got {checks_x}x{checks_y}"
        )));
    }

    let mut canvas = ctx.create_canvas(width, height, col1)?;
    let c2 = col2.to_array();
    for (y, row) in canvas.rows_mut().enumerate() {
        let cell_y = y as u32 / checks_y;
        for (x, px) in row.chunks_exact_mut(RGBA8_CHANNELS).enumerate() {
            if (x as u32 / checks_x + cell_y) % 2 == 1 {
                px.copy_from_slice(&c2);
            }
        }
    }
    Ok(canvas)
}

/// A filled circle of `color` centered at `(center_x, center_y)` over a `bg` background.
///
/// A pixel is covered when its center lies inside the circle. No anti-aliasing.
#[allow(clippy::too_many_arguments)]
pub fn circle(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    center_x: i32,
    center_y: i32,
    radius: f64,
    color: Color,
    bg: Color,
) -> OtfbmResult<Canvas<'_>> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(OtfbmError::validation(format!(
            "circle radius must be finite and non-negative, got {radius}"
        )));
    }

    let mut canvas = ctx.create_canvas(width, height, bg)?;
    let shape = Circle::new(Point::new(center_x.into(), center_y.into()), radius);
    let bbox = shape.bounding_box();
    let fg = color.to_array();

    for (y, row) in canvas.rows_mut().enumerate() {
        let cy = y as f64 + 0.5;
        if cy < bbox.y0 || cy > bbox.y1 {
            continue;
        }
        for (x, px) in row.chunks_exact_mut(RGBA8_CHANNELS).enumerate() {
            if shape.contains(Point::new(x as f64 + 0.5, cy)) {
                px.copy_from_slice(&fg);
            }
        }
    }
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/draw/primitives.rs"]
mod tests;
