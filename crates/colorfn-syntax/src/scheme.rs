use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A color function keyword.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Scheme {
    /// `rgb(..)`.
    Rgb,
    /// `rgba(..)`, an alias of `rgb`.
    Rgba,
    /// `hsl(..)`.
    Hsl,
    /// `hsla(..)`, an alias of `hsl`.
    Hsla,
    /// `hwb(..)`.
    Hwb,
}

/// The grammar family a [`Scheme`] belongs to.
///
/// Aliases share their family's grammar and unit table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Family {
    /// Red, green and blue channels.
    Rgb,
    /// Hue, saturation and lightness channels.
    Hsl,
    /// Hue, whiteness and blackness channels.
    Hwb,
}

impl Scheme {
    /// All known schemes.
    pub const ALL: [Self; 5] = [Self::Rgb, Self::Rgba, Self::Hsl, Self::Hsla, Self::Hwb];

    /// Look up a scheme by its keyword, ignoring ASCII case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.keyword().eq_ignore_ascii_case(keyword))
    }

    /// The lowercase keyword of the scheme.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Hwb => "hwb",
        }
    }

    /// The grammar family of the scheme.
    pub fn family(self) -> Family {
        match self {
            Self::Rgb | Self::Rgba => Family::Rgb,
            Self::Hsl | Self::Hsla => Family::Hsl,
            Self::Hwb => Family::Hwb,
        }
    }

    /// Whether the comma-separated legacy syntax is accepted in addition to
    /// the space-and-slash syntax.
    pub fn supports_legacy_commas(self) -> bool {
        self.family() != Family::Hwb
    }
}

impl Family {
    /// The keyword of the family's base scheme.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
        }
    }
}

impl FromStr for Scheme {
    type Err = &'static str;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(keyword).ok_or("unknown color function")
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.keyword())
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_from_keyword() {
        assert_eq!(Scheme::from_keyword("rgb"), Some(Scheme::Rgb));
        assert_eq!(Scheme::from_keyword("HSLA"), Some(Scheme::Hsla));
        assert_eq!(Scheme::from_keyword("Hwb"), Some(Scheme::Hwb));
        assert_eq!(Scheme::from_keyword("hsv"), None);
        assert_eq!(Scheme::from_keyword(""), None);
        assert_eq!("rgba".parse::<Scheme>().map(Scheme::family), Ok(Family::Rgb));
    }

    #[test]
    fn test_scheme_grammar_flags() {
        assert!(Scheme::Rgba.supports_legacy_commas());
        assert!(Scheme::Hsl.supports_legacy_commas());
        assert!(!Scheme::Hwb.supports_legacy_commas());
        assert_eq!(Scheme::Hsla.to_string(), "hsla");
        assert_eq!(Scheme::Hsla.family().to_string(), "hsl");
    }
}
