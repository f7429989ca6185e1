use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::set::alternatives;

/// The unit suffix of a parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Unit {
    /// A bare number: `255`.
    None,
    /// A percentage: `50%`.
    Percent,
    /// Degrees: `60deg`.
    Deg,
    /// Gradians: `100grad`.
    Grad,
    /// Radians: `3.14rad`.
    Rad,
    /// Turns: `0.5turn`.
    Turn,
}

impl Unit {
    /// Look up a unit by its suffix, ignoring ASCII case.
    ///
    /// The empty suffix is [`Unit::None`].
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix.to_ascii_lowercase().as_str() {
            "" => Self::None,
            "%" => Self::Percent,
            "deg" => Self::Deg,
            "grad" => Self::Grad,
            "rad" => Self::Rad,
            "turn" => Self::Turn,
            _ => return None,
        })
    }

    /// The canonical suffix of the unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Percent => "%",
            Self::Deg => "deg",
            Self::Grad => "grad",
            Self::Rad => "rad",
            Self::Turn => "turn",
        }
    }

    /// How the unit reads in a diagnostic: `unit `%``.
    pub fn describe(self) -> String {
        match self {
            Self::None => self.label(),
            unit => format!("unit {}", unit.label()),
        }
    }

    /// The unit's name in a list of units.
    fn label(self) -> String {
        match self {
            Self::None => "a number without a unit".into(),
            unit => format!("`{}`", unit.suffix()),
        }
    }

    const ALL: [Self; 6] =
        [Self::None, Self::Percent, Self::Deg, Self::Grad, Self::Rad, Self::Turn];
}

impl FromStr for Unit {
    type Err = &'static str;

    fn from_str(suffix: &str) -> Result<Self, Self::Err> {
        Self::from_suffix(suffix).ok_or("unknown unit")
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(self.suffix())
    }
}

/// A set of units.
///
/// The allowed-unit tables of each color function are made of these.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UnitSet(u8);

impl UnitSet {
    /// Create a new, empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a unit into the set.
    pub const fn add(self, unit: Unit) -> Self {
        Self(self.0 | 1 << (unit as u8))
    }

    /// Whether the set contains the given unit.
    pub const fn contains(&self, unit: Unit) -> bool {
        (self.0 & 1 << (unit as u8)) != 0
    }

    /// Iterate over the contained units in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Unit> {
        Unit::ALL.into_iter().filter(move |&unit| self.contains(unit))
    }
}

impl Debug for UnitSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the set for a hint: `a number without a unit or `%``.
impl Display for UnitSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let names: Vec<_> = self.iter().map(Unit::label).collect();
        f.write_str(&alternatives(&names))
    }
}
