//! HSL sampling and hex conversion for the theme generator.

use rand::Rng;

/// Hue is sampled over the full wheel; saturation stays high so the
/// generated pairs read as vivid rather than washed out.
const HUE_RANGE: std::ops::Range<u16> = 0..360;
const SATURATION_RANGE: std::ops::Range<u16> = 70..100;

/// Lightness band for generated backgrounds (dark).
const BACKGROUND_LIGHTNESS: std::ops::Range<u16> = 15..45;

/// Lightness band for generated text colors (light, contrasts the background).
const TEXT_LIGHTNESS: std::ops::Range<u16> = 80..100;

/// Convert an HSL triple (h in degrees, s and l in percent) to a `#rrggbb` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let f = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", f(0.0), f(8.0), f(4.0))
}

/// Sample an HSL triple for a background or text color.
pub fn random_hsl(is_background: bool) -> (u16, u16, u16) {
    let mut rng = rand::thread_rng();
    let h = rng.gen_range(HUE_RANGE);
    let s = rng.gen_range(SATURATION_RANGE);
    let l = if is_background {
        rng.gen_range(BACKGROUND_LIGHTNESS)
    } else {
        rng.gen_range(TEXT_LIGHTNESS)
    };
    (h, s, l)
}

pub fn random_color(is_background: bool) -> String {
    let (h, s, l) = random_hsl(is_background);
    hsl_to_hex(h as f64, s as f64, l as f64)
}

/// Generate a contrasting (background, text) pair.
pub fn random_theme() -> (String, String) {
    (random_color(true), random_color(false))
}

/// Parse a `#RRGGBB` string into RGB components. Returns `None` for anything
/// that is not exactly seven characters of `#` plus hex digits.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let rest = hex.strip_prefix('#')?;
    if rest.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&rest[0..2], 16).ok()?;
    let g = u8::from_str_radix(&rest[2..4], 16).ok()?;
    let b = u8::from_str_radix(&rest[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_to_hex_primaries() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
    }

    #[test]
    fn test_hsl_to_hex_extremes() {
        assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
    }

    #[test]
    fn test_hsl_to_hex_shape() {
        for h in (0..360).step_by(17) {
            for (s, l) in [(0, 0), (70, 15), (99, 44), (85, 80), (100, 99)] {
                let hex = hsl_to_hex(h as f64, s as f64, l as f64);
                assert_eq!(hex.len(), 7, "bad length for h={h} s={s} l={l}: {hex}");
                assert!(hex.starts_with('#'));
                assert!(parse_hex(&hex).is_some(), "not parseable: {hex}");
            }
        }
    }

    #[test]
    fn test_random_hsl_ranges() {
        for _ in 0..200 {
            let (h, s, l) = random_hsl(true);
            assert!(h < 360);
            assert!((70..100).contains(&s));
            assert!((15..45).contains(&l), "background lightness out of band: {l}");

            let (_, _, l) = random_hsl(false);
            assert!((80..100).contains(&l), "text lightness out of band: {l}");
        }
    }

    #[test]
    fn test_random_theme_is_wellformed() {
        for _ in 0..50 {
            let (bg, text) = random_theme();
            assert!(parse_hex(&bg).is_some());
            assert!(parse_hex(&text).is_some());
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#1F1F1F"), Some([0x1f, 0x1f, 0x1f]));
        assert_eq!(parse_hex("#dfdfdf"), Some([0xdf, 0xdf, 0xdf]));
        assert_eq!(parse_hex("1F1F1F"), None);
        assert_eq!(parse_hex("#1F1F"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_to_hex_round_trip() {
        assert_eq!(to_hex([31, 31, 31]), "#1f1f1f");
        assert_eq!(parse_hex(&to_hex([200, 10, 0])), Some([200, 10, 0]));
    }
}
