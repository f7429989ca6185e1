use colorfn_syntax::{Family, RawParam, Unit};

/// The numeric domain a channel is normalized into.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Domain {
    /// An 8-bit channel in `0..=255`.
    Byte,
    /// An angle in degrees, nominally `0..360`.
    Degrees,
    /// A percentage in `0..=100`.
    Percent,
}

impl Domain {
    /// The domains of the three channels of a family.
    pub fn of(family: Family) -> [Self; 3] {
        match family {
            Family::Rgb => [Self::Byte; 3],
            Family::Hsl | Family::Hwb => [Self::Degrees, Self::Percent, Self::Percent],
        }
    }

    /// The upper bound of the domain.
    pub fn base(self) -> f64 {
        match self {
            Self::Byte => 255.0,
            Self::Degrees => 360.0,
            Self::Percent => 100.0,
        }
    }
}

/// Convert a number with a unit into a value of the given domain.
///
/// Assumes the unit was validated for the domain.
pub fn normalize(value: f64, unit: Unit, domain: Domain) -> f64 {
    match unit {
        Unit::None | Unit::Deg => value,
        Unit::Percent => match domain {
            Domain::Byte => (value * domain.base() / 100.0).round(),
            Domain::Degrees | Domain::Percent => value,
        },
        Unit::Grad => value * 9.0 / 10.0,
        Unit::Rad => value.to_degrees(),
        Unit::Turn => value * 360.0,
    }
}

/// Convert an opacity parameter into `0.0..=1.0`.
pub fn normalize_opacity(param: &RawParam) -> f64 {
    let value = match param.unit {
        Unit::Percent => param.value / 100.0,
        _ => param.value,
    };
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn test_normalize_angles() {
        assert_eq!(normalize(60.0, Unit::None, Domain::Degrees), 60.0);
        assert_eq!(normalize(60.0, Unit::Deg, Domain::Degrees), 60.0);
        assert_eq!(normalize(200.0, Unit::Grad, Domain::Degrees), 180.0);
        assert_eq!(normalize(0.5, Unit::Turn, Domain::Degrees), 180.0);
        assert!((normalize(PI, Unit::Rad, Domain::Degrees) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_percentages() {
        assert_eq!(normalize(100.0, Unit::Percent, Domain::Byte), 255.0);
        assert_eq!(normalize(50.0, Unit::Percent, Domain::Byte), 128.0);
        assert_eq!(normalize(0.0, Unit::Percent, Domain::Byte), 0.0);
        assert_eq!(normalize(40.0, Unit::Percent, Domain::Percent), 40.0);
        assert_eq!(normalize(12.5, Unit::None, Domain::Byte), 12.5);
    }

    #[test]
    fn test_normalize_opacity() {
        #[track_caller]
        fn test(value: f64, unit: Unit, expected: f64) {
            let param = RawParam { number: "0".into(), value, unit, range: 0..1 };
            assert_eq!(normalize_opacity(&param), expected);
        }

        test(50.0, Unit::Percent, 0.5);
        test(0.25, Unit::None, 0.25);
        test(150.0, Unit::Percent, 1.0);
        test(-1.0, Unit::None, 0.0);
    }

    #[test]
    fn test_domains() {
        assert_eq!(Domain::of(Family::Rgb), [Domain::Byte; 3]);
        assert_eq!(Domain::of(Family::Hwb)[0], Domain::Degrees);
        assert_eq!(Domain::Percent.base(), 100.0);
    }
}
