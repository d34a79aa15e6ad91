use crate::foundation::color::Color;
use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;
use crate::surface::context::{RGBA8_CHANNELS, RenderContext};

const PERMUTATION_SEED: u64 = 0x6F74_6662_6D5F_7031;
const OCTAVES: u32 = 6;
const LACUNARITY: f64 = 2.0;
const GAIN: f64 = 0.5;

/// Grayscale fractal Perlin noise.
///
/// Pixel `(x, y)` samples the noise field at `((x + offset_x) * scale / width,
/// (y + offset_y) * scale / height)`; the clamped `[-1, 1]` value maps linearly onto `0..=255`.
/// Output is opaque and fully deterministic.
pub fn perlin(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    offset_x: i32,
    offset_y: i32,
    scale: f64,
) -> OtfbmResult<Canvas<'_>> {
    if !scale.is_finite() {
        return Err(OtfbmError::validation(format!(
            "noise scale must be finite, got {scale}"
        )));
    }

    let noise = Perlin::new(PERMUTATION_SEED);
    let mut canvas = ctx.create_canvas(width, height, Color::BLACK)?;
    let sx = scale / f64::from(width);
    let sy = scale / f64::from(height);

    for (y, row) in canvas.rows_mut().enumerate() {
        let ny = (y as f64 + f64::from(offset_y)) * sy;
        for (x, px) in row.chunks_exact_mut(RGBA8_CHANNELS).enumerate() {
            let nx = (x as f64 + f64::from(offset_x)) * sx;
            let p = noise.fbm(nx, ny, 1.0).clamp(-1.0, 1.0);
            let v = ((p + 1.0) * 0.5 * 255.0) as u8;
            px.copy_from_slice(&[v, v, v, 255]);
        }
    }
    Ok(canvas)
}

/// Improved Perlin noise over a seeded permutation table.
pub(crate) struct Perlin {
    perm: [u8; 512],
}

impl Perlin {
    pub(crate) fn new(seed: u64) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut state = seed;
        for i in (1..p.len()).rev() {
            state = mix64(state.wrapping_add(0x9E37_79B9_7F4A_7C15));
            let j = (state % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        Self {
            perm: std::array::from_fn(|i| p[i & 255]),
        }
    }

    /// Roughly in `[-1, 1]`; zero on every lattice point.
    pub(crate) fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let (zi, zf) = lattice(z);
        let (u, v, w) = (fade(xf), fade(yf), fade(zf));

        let p = |i: usize| self.perm[i] as usize;
        let a = p(xi) + yi;
        let aa = p(a) + zi;
        let ab = p(a + 1) + zi;
        let b = p(xi + 1) + yi;
        let ba = p(b) + zi;
        let bb = p(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p(aa), xf, yf, zf), grad(p(ba), xf - 1.0, yf, zf)),
                lerp(
                    u,
                    grad(p(ab), xf, yf - 1.0, zf),
                    grad(p(bb), xf - 1.0, yf - 1.0, zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p(aa + 1), xf, yf, zf - 1.0),
                    grad(p(ba + 1), xf - 1.0, yf, zf - 1.0),
                ),
                lerp(
                    u,
                    grad(p(ab + 1), xf, yf - 1.0, zf - 1.0),
                    grad(p(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
                ),
            ),
        )
    }

    /// Fractal sum of [`Perlin::noise3`] octaves.
    pub(crate) fn fbm(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut freq = 1.0;
        let mut amp = 1.0;
        let mut sum = 0.0;
        for _ in 0..OCTAVES {
            sum += amp * self.noise3(x * freq, y * freq, z * freq);
            freq *= LACUNARITY;
            amp *= GAIN;
        }
        sum
    }
}

/// Integer cell (wrapped to the table) and fractional position within it.
fn lattice(t: f64) -> (usize, f64) {
    let f = t.floor();
    ((f as i64 & 255) as usize, t - f)
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/draw/noise.rs"]
mod tests;
