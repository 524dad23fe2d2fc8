use std::fmt;

use crate::foundation::{
    core::Rgba8,
    error::{WeaveError, WeaveResult},
};

/// Hue/saturation/lightness color as carried on the wire.
///
/// `h` is in degrees, `s` and `l` in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        hsla_to_rgba8(self.h, self.s / 100.0, self.l / 100.0, 1.0)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Parse the CSS color forms a snapshot may carry: `hsl()`, `hsla()`,
/// `#RRGGBB` and `#RRGGBBAA`.
pub fn parse_css_color(s: &str) -> WeaveResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let body = lower
        .strip_prefix("hsla(")
        .or_else(|| lower.strip_prefix("hsl("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| WeaveError::validation(format!("unsupported color \"{s}\"")))?;

    let parts: Vec<&str> = body
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(WeaveError::validation(format!(
            "hsl color needs 3 or 4 components, got \"{s}\""
        )));
    }

    let num = |p: &str| -> WeaveResult<f64> {
        p.trim_end_matches("deg")
            .trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| WeaveError::validation(format!("invalid color component \"{p}\"")))
    };

    let h = num(parts[0])?;
    let sat = num(parts[1])? / 100.0;
    let l = num(parts[2])? / 100.0;
    let a = match parts.get(3) {
        Some(p) if p.ends_with('%') => num(p)? / 100.0,
        Some(p) => num(p)?,
        None => 1.0,
    };
    Ok(hsla_to_rgba8(h, sat, l, a))
}

fn parse_hex(s: &str) -> WeaveResult<Rgba8> {
    fn hex_byte(pair: &str) -> WeaveResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| WeaveError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(WeaveError::validation("hex color must be ASCII"));
    }
    match s.len() {
        6 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(WeaveError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn hsla_to_rgba8(h: f64, s: f64, l: f64, a: f64) -> Rgba8 {
    // Standard HSL -> RGB conversion, normalized 0..1 inputs.
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        return Rgba8::new(to_u8(l), to_u8(l), to_u8(l), to_u8(a));
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        to_u8(a),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/color/css.rs"]
mod tests;
