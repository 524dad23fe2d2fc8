use crate::foundation::error::{WeaveError, WeaveResult};

pub use kurbo::{Affine, Point};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply alpha by `opacity` (clamped to 0..1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn premultiplied(self) -> [u8; 4] {
        let af = u16::from(self.a) + 1;
        let premul = |c: u8| -> u8 { ((u16::from(c) * af) >> 8) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// Logical drawing surface dimensions plus device pixel density.
///
/// Word positions are normalized, so the same snapshot maps onto any
/// surface by multiplying with `width`/`height` at render time. The backing
/// pixel buffer is `width·dpr × height·dpr`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    #[serde(default = "one")]
    pub device_pixel_ratio: f64,
}

fn one() -> f64 {
    1.0
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_device_pixel_ratio(self, device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            ..self
        }
    }

    pub fn validate(&self) -> WeaveResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(WeaveError::validation(
                "surface width/height must be finite and > 0",
            ));
        }
        if !ok(self.device_pixel_ratio) {
            return Err(WeaveError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Backing buffer size in device pixels.
    pub fn pixel_dims(&self) -> WeaveResult<(u16, u16)> {
        self.validate()?;
        let to_px = |v: f64, what: &str| -> WeaveResult<u16> {
            let px = (v * self.device_pixel_ratio).round();
            if px < 1.0 || px > f64::from(u16::MAX) {
                return Err(WeaveError::render(format!(
                    "surface {what} of {px} device pixels is out of range"
                )));
            }
            Ok(px as u16)
        };
        Ok((to_px(self.width, "width")?, to_px(self.height, "height")?))
    }

    /// Map a normalized `[0,1)` position onto logical surface units.
    pub fn project(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.width, y * self.height)
    }

    /// Logical-to-device transform.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
