//! Scanner and parser for CSS-style color functions.
//!
//! Reads `rgb(..)`, `rgba(..)`, `hsl(..)`, `hsla(..)` and `hwb(..)` in both
//! the comma-separated legacy syntax and the space-separated syntax with a
//! slash before the opacity. The result is a [`RawFunction`]: the numbers and
//! units as written, checked against the grammar but not yet normalized.

pub mod diag;

mod parser;
mod scanner;
mod scheme;
mod set;
mod unit;

pub use self::diag::{ErrorKind, ParseError, ParseResult};
pub use self::parser::{RawFunction, RawParam, SeparatorMode, parse};
pub use self::scanner::Scanner;
pub use self::scheme::{Family, Scheme};
pub use self::set::{TokenKind, TokenSet};
pub use self::unit::{Unit, UnitSet};
