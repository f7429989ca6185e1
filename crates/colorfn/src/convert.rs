//! Projection of hue-based channels into 8-bit sRGB.
//!
//! Inputs are normalized channel values: hue in degrees and the other two
//! channels in percent.

use palette::{FromColor, Hsl, Hwb, Srgb};

/// Convert hue, saturation and lightness into 8-bit RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let hsl = Hsl::new_srgb(hue.rem_euclid(360.0), unit(saturation), unit(lightness));
    bytes(Srgb::from_color(hsl))
}

/// Convert hue, whiteness and blackness into 8-bit RGB.
///
/// Whiteness and blackness that add up to 100% or more yield a gray.
pub fn hwb_to_rgb(hue: f64, whiteness: f64, blackness: f64) -> [u8; 3] {
    let (w, b) = (unit(whiteness), unit(blackness));
    if w + b >= 1.0 {
        let gray = w / (w + b);
        return bytes(Srgb::new(gray, gray, gray));
    }

    let hwb = Hwb::new_srgb(hue.rem_euclid(360.0), w, b);
    bytes(Srgb::from_color(hwb))
}

/// Map a percentage into `0.0..=1.0`.
fn unit(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

fn bytes(rgb: Srgb<f64>) -> [u8; 3] {
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    [r, g, b]
}
