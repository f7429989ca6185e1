use colorfn_syntax::diag::bail;
use colorfn_syntax::{ErrorKind, Family, ParseError, ParseResult, RawFunction, Unit, UnitSet};
use ecow::{EcoString, eco_format};

/// A number without a unit or a percentage.
const PLAIN_OR_PERCENT: UnitSet = UnitSet::new().add(Unit::None).add(Unit::Percent);

/// A percentage only.
const PERCENT: UnitSet = UnitSet::new().add(Unit::Percent);

/// An angle, or a number of degrees.
const HUE: UnitSet = UnitSet::new()
    .add(Unit::None)
    .add(Unit::Deg)
    .add(Unit::Grad)
    .add(Unit::Rad)
    .add(Unit::Turn);

/// The allowed units of `rgb`: red, green, blue and opacity.
static RGB_UNITS: [UnitSet; 4] = [PLAIN_OR_PERCENT; 4];

/// The allowed units of `hsl`: hue, saturation, lightness and opacity.
static HSL_UNITS: [UnitSet; 4] = [HUE, PERCENT, PERCENT, PLAIN_OR_PERCENT];

/// The allowed units of `hwb`: hue, whiteness, blackness and opacity.
static HWB_UNITS: [UnitSet; 4] = [HUE, PERCENT, PERCENT, PLAIN_OR_PERCENT];

/// The allowed units per parameter position of a family.
pub fn units(family: Family) -> &'static [UnitSet; 4] {
    match family {
        Family::Rgb => &RGB_UNITS,
        Family::Hsl => &HSL_UNITS,
        Family::Hwb => &HWB_UNITS,
    }
}

/// Check each parameter's unit against its position in the family's table.
///
/// Stops at the first parameter with a unit that is not allowed.
pub fn validate(raw: &RawFunction) -> ParseResult<()> {
    let table = units(raw.scheme.family());
    for (i, (param, allowed)) in raw.params.iter().zip(table).enumerate() {
        if allowed.contains(param.unit) {
            continue;
        }

        let position = ordinal(i + 1);
        bail!(
            ParseError::new(
                ErrorKind::Unit,
                raw.source.clone(),
                param.range.start,
                eco_format!(
                    "{} is not allowed in the {position} parameter of `{}`",
                    param.unit.describe(),
                    raw.call(),
                ),
            );
            hint: "the {} parameter of {} accepts {}", position, raw.scheme, allowed
        );
    }
    Ok(())
}

/// Render a 1-based position as `1st`, `2nd`, `3rd`, `4th`, ...
pub fn ordinal(n: usize) -> EcoString {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    eco_format!("{n}{suffix}")
}
