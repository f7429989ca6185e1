use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use colorfn_syntax::diag::bail;
use colorfn_syntax::{ErrorKind, Family, ParseError, ParseResult, RawFunction, Scheme};
use ecow::EcoString;
use once_cell::sync::OnceCell;

use crate::convert::{hsl_to_rgb, hwb_to_rgb};
use crate::normalize::{Domain, normalize, normalize_opacity};
use crate::validate::validate;

/// A parsed and normalized color function.
///
/// The channels are in their canonical domains: red, green and blue in
/// `0..=255`; hue in degrees; saturation, lightness, whiteness and blackness
/// in percent. The opacity is in `0.0..=1.0`.
#[derive(Clone)]
pub struct ColorFunction {
    scheme: Scheme,
    channels: [f64; 3],
    alpha: Option<f64>,
    source: EcoString,
    /// The projection into 8-bit RGB, computed on first use.
    rgb: OnceCell<[u8; 3]>,
}

/// A color with 8-bit RGB channels and an opacity in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.
    pub a: f64,
}

impl ColorFunction {
    /// Validate the units of raw parameters and normalize them.
    pub fn from_raw(raw: &RawFunction) -> ParseResult<Self> {
        validate(raw)?;

        let domains = Domain::of(raw.scheme.family());
        let mut channels = [0.0; 3];
        for ((slot, param), domain) in channels.iter_mut().zip(raw.channels()).zip(domains)
        {
            let value = normalize(param.value, param.unit, domain);
            if !value.is_finite() {
                bail!(
                    ParseError::new(
                        ErrorKind::Structure,
                        raw.source.clone(),
                        param.range.start,
                        "number is out of range",
                    );
                    hint: "the value does not fit into a 64-bit float once converted"
                );
            }
            *slot = value;
        }

        Ok(Self {
            scheme: raw.scheme,
            channels,
            alpha: raw.opacity().map(normalize_opacity),
            source: raw.source.clone(),
            rgb: OnceCell::new(),
        })
    }

    /// The function keyword as written, lowercased.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The grammar family of the function.
    pub fn family(&self) -> Family {
        self.scheme.family()
    }

    /// The three normalized channels.
    pub fn channels(&self) -> [f64; 3] {
        self.channels
    }

    /// The normalized parameters: the three channels, followed by the
    /// opacity if one was given.
    pub fn to_a(&self) -> Vec<f64> {
        let mut values = self.channels.to_vec();
        values.extend(self.alpha);
        values
    }

    /// The opacity. Defaults to `1.0` if none was given.
    pub fn opacity(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.opacity() == 1.0
    }

    /// The text this value was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The color as 8-bit RGB.
    ///
    /// For `rgb`, these are the rounded channels. For `hsl` and `hwb`, the
    /// channels are converted.
    pub fn rgb(&self) -> [u8; 3] {
        *self.rgb.get_or_init(|| {
            let [a, b, c] = self.channels;
            match self.family() {
                Family::Rgb => [byte(a), byte(b), byte(c)],
                Family::Hsl => hsl_to_rgb(a, b, c),
                Family::Hwb => hwb_to_rgb(a, b, c),
            }
        })
    }

    /// The color as 8-bit RGB with its opacity.
    pub fn rgba(&self) -> Rgba {
        let [r, g, b] = self.rgb();
        Rgba { r, g, b, a: self.opacity() }
    }
}

/// Round a channel into `0..=255`.
fn byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl PartialEq for ColorFunction {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.channels == other.channels
            && self.alpha == other.alpha
            && self.source == other.source
    }
}

impl Debug for ColorFunction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ColorFunction")
            .field("scheme", &self.scheme)
            .field("channels", &self.channels)
            .field("opacity", &self.opacity())
            .field("source", &self.source)
            .finish()
    }
}

/// Renders the value in the space-separated syntax with canonical units:
/// `hsl(60deg 100% 50% / 0.5)`.
///
/// Channels are printed in full, so parsing the output yields the same
/// channels and opacity.
impl Display for ColorFunction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let [a, b, c] = self.channels;
        match self.family() {
            Family::Rgb => write!(f, "rgb({a} {b} {c}")?,
            family => write!(f, "{family}({a}deg {b}% {c}%")?,
        }
        if let Some(alpha) = self.alpha {
            write!(f, " / {alpha}")?;
        }
        f.write_str(")")
    }
}

impl FromStr for ColorFunction {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        crate::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[track_caller]
    fn ok(text: &str) -> ColorFunction {
        match parse(text) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse {text:?}:\n{err}"),
        }
    }

    #[test]
    fn test_rgb_channels_are_exact() {
        for r in 0..=255 {
            let (g, b) = (255 - r, r / 2);
            let value = ok(&format!("rgb({r}, {g}, {b})"));
            assert_eq!(value.channels(), [r as f64, g as f64, b as f64]);
            assert_eq!(value.rgb(), [r as u8, g as u8, b as u8]);
            assert_eq!(value.opacity(), 1.0);
        }
    }

    #[test]
    fn test_rgb_value() {
        let value = ok("rgb(255, 255, 0)");
        assert_eq!(value.scheme(), Scheme::Rgb);
        assert_eq!(value.channels(), [255.0, 255.0, 0.0]);
        assert_eq!(value.to_a(), [255.0, 255.0, 0.0]);
        assert!(value.is_opaque());
        assert_eq!(value.source(), "rgb(255, 255, 0)");

        let value = ok("rgb(100%, 50%, 0%)");
        assert_eq!(value.channels(), [255.0, 128.0, 0.0]);
        assert_eq!(value.to_string(), "rgb(255 128 0)");
    }

    #[test]
    fn test_cross_scheme_equivalence() {
        assert_eq!(ok("hsl(60deg, 100%, 50%)").rgb(), [255, 255, 0]);
        assert_eq!(ok("rgb(255, 255, 0)").rgb(), [255, 255, 0]);
        assert_eq!(ok("hsl(0.1666667turn 100% 50%)").rgb(), [255, 255, 0]);
        assert_eq!(ok("hwb(60 0% 0%)").rgb(), [255, 255, 0]);
    }

    #[test]
    fn test_hwb_value() {
        let value = ok("hwb(210 30% 20% / 50%)");
        assert_eq!(value.scheme(), Scheme::Hwb);
        assert_eq!(value.family(), Family::Hwb);
        assert_eq!(value.channels(), [210.0, 30.0, 20.0]);
        assert_eq!(value.opacity(), 0.5);
        assert!(!value.is_opaque());
        assert_eq!(value.to_a(), [210.0, 30.0, 20.0, 0.5]);
        assert_eq!(value.to_string(), "hwb(210deg 30% 20% / 0.5)");
    }

    #[test]
    fn test_hue_units() {
        assert_eq!(ok("hsl(200grad 100% 50%)").channels(), [180.0, 100.0, 50.0]);
        assert_eq!(ok("hsl(0.5turn, 10%, 20%)").channels(), [180.0, 10.0, 20.0]);
        assert_eq!(ok("hsl(60deg, 100%, 50%)").to_string(), "hsl(60deg 100% 50%)");
    }

    #[test]
    fn test_legacy_opacity() {
        let value = ok("rgba(255, 0, 0, 0.25)");
        assert_eq!(value.scheme(), Scheme::Rgba);
        assert_eq!(value.opacity(), 0.25);
        assert_eq!(value.rgba(), Rgba { r: 255, g: 0, b: 0, a: 0.25 });

        assert_eq!(ok("hsla(0, 100%, 50%, 50%)").opacity(), 0.5);
        assert_eq!(ok("rgb(0 0 0 / 150%)").opacity(), 1.0);
        assert_eq!(ok("rgba(0 0 0)").opacity(), 1.0);
    }

    #[test]
    fn test_reparse_source_is_stable() {
        for text in [
            "rgb(255, 255, 0)",
            "rgba(10%, 20%, 30%, 0.4)",
            "hsl(1.5rad 40% 60% / 25%)",
            "hwb(210 30% 20% / 50%)",
            "HSLA( 120 , 50% , 50% , .3 )",
        ] {
            let first = ok(text);
            let second = ok(first.source());
            assert_eq!(first.channels(), second.channels());
            assert_eq!(first.opacity(), second.opacity());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_display_reparses() {
        for text in [
            "rgb(1, 2, 3)",
            "hsl(90, 50%, 25%, 0.5)",
            "hwb(10grad 5% 5%)",
            "hsl(1rad 50% 50%)",
            "rgb(0.123456 0 0 / 0.333333)",
            "hsl(0.1666667turn 12.345678% 50%)",
        ] {
            let value = ok(text);
            let again = ok(&value.to_string());
            assert_eq!(value.channels(), again.channels(), "{value}");
            assert_eq!(value.to_a(), again.to_a(), "{value}");
        }
    }

    #[test]
    fn test_display_prints_full_precision() {
        let value = ok("hsl(1rad 50% 50%)");
        assert_eq!(value.channels()[0], 1f64.to_degrees());
        assert_eq!(value.to_string(), format!("hsl({}deg 50% 50%)", 1f64.to_degrees()));
        assert_eq!(
            ok("rgb(0.123456 0 0 / 0.333333)").to_string(),
            "rgb(0.123456 0 0 / 0.333333)",
        );
    }

    #[test]
    fn test_overflowing_conversion() {
        // Finite as written, infinite once a turn is converted into degrees.
        let text = format!("hsl({}turn 50% 50%)", "9".repeat(306));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert_eq!(err.cursor(), 4);
    }

    #[test]
    fn test_from_str() {
        let value: ColorFunction = "rgb(1 2 3)".parse().unwrap();
        assert_eq!(value.rgb(), [1, 2, 3]);
        assert!("rgb(1 2, 3)".parse::<ColorFunction>().is_err());
    }
}
