//! CSS color parsing.
//!
//! Scene objects keep their paints as the CSS strings the UI hands in
//! (`"rgba(0,0,0,1)"`, `"#3b82f6"`, `"white"`), so the document round-trips
//! exactly. Export back ends parse them into [`Color`] on demand.

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any supported CSS color: hex, `rgb()`, `rgba()`, or a small set
    /// of named colors.
    pub fn parse(css: &str) -> Option<Self> {
        let css = css.trim();
        if css.starts_with('#') {
            return Self::from_hex(css);
        }
        if let Some(args) = css
            .strip_prefix("rgba(")
            .or_else(|| css.strip_prefix("rgb("))
        {
            return Self::from_rgb_args(args.strip_suffix(')')?);
        }
        Self::named(css)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| f32::from(v * 17) / 255.0);
        let long =
            |i: usize| Some(f32::from(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) / 255.0);

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    fn from_rgb_args(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<f32> {
            let v: f32 = s.parse().ok()?;
            Some((v / 255.0).clamp(0.0, 1.0))
        };
        let alpha = match parts.get(3) {
            Some(a) => a.parse::<f32>().ok()?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    fn named(name: &str) -> Option<Self> {
        let hex = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "white" => "#FFFFFF",
            "black" => "#000000",
            "red" => "#FF0000",
            "green" => "#008000",
            "blue" => "#0000FF",
            "yellow" => "#FFFF00",
            "gray" | "grey" => "#808080",
            "orange" => "#FFA500",
            "purple" => "#800080",
            _ => return None,
        };
        Self::from_hex(hex)
    }

    /// Convert to straight-alpha 8-bit channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#000000"), Some(Color::BLACK));
        assert_eq!(Color::parse("#3B82F6").unwrap().to_hex(), "#3B82F6");
        assert_eq!(Color::parse("#FF000080").unwrap().to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn parse_rgb_functions() {
        assert_eq!(Color::parse("rgba(0,0,0,1)"), Some(Color::BLACK));
        assert_eq!(
            Color::parse("rgb(255, 0, 0)").unwrap().to_rgba8(),
            [255, 0, 0, 255]
        );
        assert_eq!(
            Color::parse("rgba(0, 0, 0, 0.8)").unwrap().to_rgba8(),
            [0, 0, 0, 204]
        );
    }

    #[test]
    fn parse_named_colors() {
        assert_eq!(Color::parse("white"), Some(Color::WHITE));
        assert_eq!(Color::parse("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::parse("chartreuse-ish"), None);
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("rgba(1,2)"), None);
        assert_eq!(Color::parse("rgb(a,b,c)"), None);
    }
}
