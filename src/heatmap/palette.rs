use serde::{Deserialize, Serialize};

use super::assemble::SizeClass;
use super::classify::ChangeBucket;

/// RGBA colour in 0..1 floats, easy to hand to any render shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a lighter version (hover highlight).
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).min(1.0),
            g: (self.g + amount).min(1.0),
            b: (self.b + amount).min(1.0),
            a: self.a,
        }
    }

    /// Create a darker version (tile border).
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }

    /// `#rrggbb`, alpha ignored.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Relative luminance (sRGB weights, no gamma correction).
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl ChangeBucket {
    pub fn css_class(self) -> &'static str {
        match self {
            ChangeBucket::StrongPositive => "pct-strong-pos",
            ChangeBucket::Positive => "pct-pos",
            ChangeBucket::Neutral => "pct-neutral",
            ChangeBucket::Negative => "pct-neg",
            ChangeBucket::StrongNegative => "pct-strong-neg",
        }
    }
}

impl SizeClass {
    pub fn css_class(self) -> &'static str {
        match self {
            SizeClass::Large => "size-large",
            SizeClass::Medium => "size-medium",
            SizeClass::Small => "size-small",
        }
    }
}

/// Fill colour for a bucket: saturated green/red for strong moves, muted for
/// mild ones, slate grey for neutral.
pub fn bucket_color(bucket: ChangeBucket) -> AppColor {
    match bucket {
        ChangeBucket::StrongPositive => hsv_to_rgb(140.0 / 360.0, 0.78, 0.72),
        ChangeBucket::Positive => hsv_to_rgb(140.0 / 360.0, 0.55, 0.50),
        ChangeBucket::Neutral => AppColor::new(0.26, 0.28, 0.33),
        ChangeBucket::Negative => hsv_to_rgb(0.0, 0.58, 0.55),
        ChangeBucket::StrongNegative => hsv_to_rgb(0.0, 0.80, 0.78),
    }
}

/// Fill, outline, hover and text colours for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileColors {
    pub fill: AppColor,
    pub border: AppColor,
    pub hover: AppColor,
    pub label: AppColor,
}

impl TileColors {
    pub fn for_bucket(bucket: ChangeBucket) -> Self {
        let fill = bucket_color(bucket);
        Self {
            fill,
            border: fill.darken(0.12),
            hover: fill.lighten(0.08),
            label: label_color(fill),
        }
    }
}

/// Text colour that stays readable on `background`.
pub fn label_color(background: AppColor) -> AppColor {
    if background.luminance() > 0.55 {
        AppColor::new(0.08, 0.08, 0.10)
    } else {
        AppColor::new(0.96, 0.96, 0.97)
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b, a: 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_buckets_are_green_and_negative_red() {
        let up = bucket_color(ChangeBucket::StrongPositive);
        assert!(up.g > up.r && up.g > up.b);
        let down = bucket_color(ChangeBucket::StrongNegative);
        assert!(down.r > down.g && down.r > down.b);
    }

    #[test]
    fn strong_moves_are_brighter_than_mild_ones() {
        let strong = bucket_color(ChangeBucket::StrongPositive);
        let mild = bucket_color(ChangeBucket::Positive);
        assert!(strong.g > mild.g);
    }

    #[test]
    fn hex_encoding() {
        assert_eq!(AppColor::new(1.0, 0.0, 0.5).to_hex(), "#ff0080");
        assert_eq!(AppColor::new(2.0, -1.0, 0.0).to_hex(), "#ff0000");
    }

    #[test]
    fn css_classes_match_bucket_names() {
        assert_eq!(ChangeBucket::StrongNegative.css_class(), "pct-strong-neg");
        assert_eq!(SizeClass::Medium.css_class(), "size-medium");
    }

    #[test]
    fn labels_contrast_with_background() {
        let dark = label_color(bucket_color(ChangeBucket::Neutral));
        assert!(dark.luminance() > 0.9);
        let light = label_color(AppColor::new(0.95, 0.95, 0.9));
        assert!(light.luminance() < 0.2);
    }

    #[test]
    fn tile_colors_derive_from_fill() {
        for bucket in [
            ChangeBucket::StrongPositive,
            ChangeBucket::Positive,
            ChangeBucket::Neutral,
            ChangeBucket::Negative,
            ChangeBucket::StrongNegative,
        ] {
            let colors = TileColors::for_bucket(bucket);
            assert_eq!(colors.fill, bucket_color(bucket));
            assert!(colors.border.luminance() < colors.fill.luminance());
            assert!(colors.hover.luminance() > colors.fill.luminance());
            assert_eq!(colors.label, label_color(colors.fill));
        }
    }

    #[test]
    fn lighten_and_darken_saturate() {
        let white = AppColor::new(0.95, 0.95, 0.95).lighten(0.2);
        assert_eq!((white.r, white.g, white.b), (1.0, 1.0, 1.0));
        let black = AppColor::new(0.05, 0.05, 0.05).darken(0.2);
        assert_eq!((black.r, black.g, black.b), (0.0, 0.0, 0.0));
    }
}
