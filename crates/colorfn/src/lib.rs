//! Validated, unit-normalized values from CSS-style color functions.
//!
//! ```
//! let value = colorfn::parse("hsl(60deg 100% 50% / 50%)").unwrap();
//! assert_eq!(value.rgb(), [255, 255, 0]);
//! assert_eq!(value.opacity(), 0.5);
//! ```
//!
//! Failures carry a diagnostic that echoes the input with a caret under the
//! problem:
//!
//! ```
//! let err = colorfn::parse("rgb(255 255, 0)").unwrap_err();
//! assert_eq!(
//!     err.report(),
//!     "\"rgb(255 255, 0)\" is not a valid code. Expected space, found comma.\n\
//!      rgb(255 255, 0)\n\
//!      \x20          ^",
//! );
//! ```

pub mod convert;

mod normalize;
mod validate;
mod value;

pub use colorfn_syntax as syntax;
pub use colorfn_syntax::{ErrorKind, Family, ParseError, ParseResult, Scheme, Unit};

pub use self::normalize::{Domain, normalize, normalize_opacity};
pub use self::validate::{ordinal, units, validate};
pub use self::value::{ColorFunction, Rgba};

/// Parse a color function such as `rgb(255, 255, 0)` or
/// `hwb(210 30% 20% / 50%)`.
///
/// Grammar errors are reported before unit errors: units are only checked
/// once the whole parameter list was read.
pub fn parse(text: &str) -> ParseResult<ColorFunction> {
    let result =
        colorfn_syntax::parse(text).and_then(|raw| ColorFunction::from_raw(&raw));
    match &result {
        Ok(value) => log::trace!("parsed {text:?} as {value}"),
        Err(err) => log::debug!(
            "rejected {text:?} ({:?} at byte {}): {}",
            err.kind(),
            err.cursor(),
            err.message(),
        ),
    }
    result
}

/// Parse a color function and project it into 8-bit RGB.
pub fn to_rgb(text: &str) -> ParseResult<[u8; 3]> {
    parse(text).map(|value| value.rgb())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb() {
        assert_eq!(to_rgb("hsl(60deg, 100%, 50%)"), Ok([255, 255, 0]));
        assert_eq!(to_rgb("rgb(255 255 0 / 50%)"), Ok([255, 255, 0]));
        assert_eq!(to_rgb("hwb(0 100% 0%)"), Ok([255, 255, 255]));
    }

    #[test]
    fn test_grammar_errors_come_first() {
        // The hue unit is invalid too, but the grammar fails earlier.
        let err = parse("hsl(60%, 100% 50%)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Separator);

        let err = parse("hsl(60%, 100%, 50%)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unit);
    }

    #[test]
    fn test_truncated_input_diagnostic() {
        let err = parse("rgb(255, 255, 0").unwrap_err();
        let report = err.report();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "rgb(255, 255, 0");
        assert_eq!(lines[2].len() - 1, "rgb(255, 255, 0".len());
        assert!(lines[2].ends_with('^'));
    }

    #[test]
    fn test_error_kinds() {
        #[track_caller]
        fn test(text: &str, kind: ErrorKind) {
            match parse(text) {
                Ok(value) => panic!("unexpectedly parsed {text:?} into {value:?}"),
                Err(err) => assert_eq!(err.kind(), kind, "{err}"),
            }
        }

        test("cmyk(1, 2, 3)", ErrorKind::UnknownScheme);
        test("", ErrorKind::UnknownScheme);
        test("rgb(1, 2, 3", ErrorKind::Structure);
        test("rgb(1, 2, 3,)", ErrorKind::Structure);
        test("rgb(1 2 3, 4)", ErrorKind::Separator);
        test("hwb(1, 2%, 3%)", ErrorKind::Separator);
        test("hsl(1, 2, 3%)", ErrorKind::Unit);
    }
}
