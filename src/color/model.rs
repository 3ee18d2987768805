use std::fmt;

use crate::{
    color::names::name_to_hex,
    foundation::error::{RemnantError, RemnantResult},
};

/// Canonical color: hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

/// Result of normalizing color text. `Transparent` survives normalization untouched and
/// means "draw nothing" wherever it is used as a paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorValue {
    /// The `transparent` keyword.
    Transparent,
    /// Any other color.
    Hsl(Hsl),
}

impl Hsl {
    /// `hsl(0, 0%, 0%)`; stands in for colors that cannot be resolved.
    pub const BLACK: Hsl = Hsl {
        h: 0.0,
        s: 0.0,
        l: 0.0,
    };

    /// Build from raw components; nothing is clamped.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Same hue and saturation, lightness moved by `delta` percentage points and clamped to
    /// `[0, 100]`.
    pub fn with_lightness_offset(self, delta: f64) -> Self {
        Self {
            l: (self.l + delta).clamp(0.0, 100.0),
            ..self
        }
    }

    /// Standard max/min/delta conversion from 8-bit sRGB channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let delta = cmax - cmin;

        let h = if delta == 0.0 {
            0.0
        } else if cmax == r {
            ((g - b) / delta) % 6.0
        } else if cmax == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        let mut h = (h * 60.0).round();
        if h < 0.0 {
            h += 360.0;
        }
        if h >= 360.0 {
            h -= 360.0;
        }

        let l = (cmax + cmin) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        Self {
            h,
            s: round1(s * 100.0),
            l: round1(l * 100.0),
        }
    }

    /// Straight RGBA8 for rasterization. Out-of-range components are clamped here, never
    /// while the color is still canonical.
    pub fn to_rgba8(self) -> [u8; 4] {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        if s == 0.0 {
            let v = to_u8(l);
            return [v, v, v, 255];
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
        [
            to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_rgb(p, q, h)),
            to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
            255,
        ]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({},{}%,{}%)", self.h, self.s, self.l)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Hsl(c) => c.fmt(f),
        }
    }
}

impl ColorValue {
    /// `true` for the `transparent` keyword.
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// The color to paint with, `None` when transparent.
    pub fn hsl(self) -> Option<Hsl> {
        match self {
            Self::Transparent => None,
            Self::Hsl(c) => Some(c),
        }
    }

    /// Lightness offset that leaves `Transparent` alone.
    pub fn with_lightness_offset(self, delta: f64) -> Self {
        match self {
            Self::Transparent => Self::Transparent,
            Self::Hsl(c) => Self::Hsl(c.with_lightness_offset(delta)),
        }
    }
}

/// Normalize color text (hex, `rgb(...)`, `hsl(...)`, CSS name or `transparent`) into its
/// canonical form.
pub fn normalize(text: &str) -> RemnantResult<ColorValue> {
    let s = text.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Ok(ColorValue::Transparent);
    }
    if s.starts_with('#') {
        let [r, g, b] = parse_hex(s)?;
        return Ok(ColorValue::Hsl(Hsl::from_rgb8(r, g, b)));
    }
    if let Some(args) = function_args(s, "rgb") {
        let [r, g, b] = parse_rgb_args(args)?;
        return Ok(ColorValue::Hsl(Hsl::from_rgb8(r, g, b)));
    }
    if let Some(args) = function_args(s, "hsl") {
        return parse_hsl_args(args).map(ColorValue::Hsl);
    }
    if let Some(hex) = name_to_hex(s) {
        let [r, g, b] = parse_hex(hex)?;
        return Ok(ColorValue::Hsl(Hsl::from_rgb8(r, g, b)));
    }
    Err(RemnantError::color(format!("unrecognized color \"{text}\"")))
}

/// `#rgb` or `#rrggbb`, case-insensitive.
pub fn parse_hex(s: &str) -> RemnantResult<[u8; 3]> {
    let digits = s
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| RemnantError::color(format!("hex color must start with '#': \"{s}\"")))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RemnantError::color(format!("invalid hex color \"{s}\"")));
    }

    let nibble = |c: u8| -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => c - b'A' + 10,
        }
    };
    let bytes = digits.as_bytes();
    match bytes.len() {
        3 => Ok([
            nibble(bytes[0]) * 17,
            nibble(bytes[1]) * 17,
            nibble(bytes[2]) * 17,
        ]),
        6 => Ok([
            nibble(bytes[0]) * 16 + nibble(bytes[1]),
            nibble(bytes[2]) * 16 + nibble(bytes[3]),
            nibble(bytes[4]) * 16 + nibble(bytes[5]),
        ]),
        _ => Err(RemnantError::color(format!(
            "hex color must be #rgb or #rrggbb: \"{s}\""
        ))),
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .trim_end()
        .strip_suffix(')')
}

fn split_args(args: &str) -> Vec<&str> {
    let sep = if args.contains(',') { ',' } else { ' ' };
    args.split(sep)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

fn parse_component(arg: &str) -> RemnantResult<(f64, bool)> {
    let (num, pct) = match arg.strip_suffix('%') {
        Some(n) => (n.trim_end(), true),
        None => (arg, false),
    };
    let v: f64 = num
        .parse()
        .map_err(|_| RemnantError::color(format!("invalid color component \"{arg}\"")))?;
    if !v.is_finite() {
        return Err(RemnantError::color(format!(
            "color component must be finite: \"{arg}\""
        )));
    }
    Ok((v, pct))
}

fn parse_rgb_args(args: &str) -> RemnantResult<[u8; 3]> {
    let parts = split_args(args);
    if parts.len() != 3 {
        return Err(RemnantError::color(format!(
            "rgb() expects 3 components, got {}",
            parts.len()
        )));
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(parts) {
        let (v, pct) = parse_component(part)?;
        let v = if pct { (v / 100.0 * 255.0).round() } else { v };
        if !(0.0..=255.0).contains(&v) {
            return Err(RemnantError::color(format!(
                "rgb() component out of range: \"{part}\""
            )));
        }
        *slot = v.round() as u8;
    }
    Ok(out)
}

fn parse_hsl_args(args: &str) -> RemnantResult<Hsl> {
    let parts = split_args(args);
    if parts.len() != 3 {
        return Err(RemnantError::color(format!(
            "hsl() expects 3 components, got {}",
            parts.len()
        )));
    }
    let h = parts[0].strip_suffix("deg").unwrap_or(parts[0]);
    let (h, _) = parse_component(h)?;
    let (s, _) = parse_component(parts[1])?;
    let (l, _) = parse_component(parts[2])?;
    for (part, v) in [(parts[1], s), (parts[2], l)] {
        if !(0.0..=100.0).contains(&v) {
            return Err(RemnantError::color(format!(
                "hsl() saturation and lightness must be in 0..=100: \"{part}\""
            )));
        }
    }
    Ok(Hsl::new(h.rem_euclid(360.0), s, l))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "../../tests/unit/color/model.rs"]
mod tests;
