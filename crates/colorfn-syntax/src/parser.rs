use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use ecow::{EcoString, eco_format};

use crate::diag::{ErrorKind, ParseError, ParseResult, bail};
use crate::scanner::Scanner;
use crate::scheme::Scheme;
use crate::set::{self, TokenKind, TokenSet};
use crate::unit::Unit;

/// Parse the text of a color function into its raw parameters.
///
/// This checks the grammar only: that the parens, numbers and separators are
/// where they belong. Whether each unit is allowed at its position is left
/// to the caller.
pub fn parse(text: &str) -> ParseResult<RawFunction> {
    let mut s = Scanner::new(text);
    s.skip_whitespace();
    let scheme = scheme(&mut s)?;

    let mut p = Parser { s, scheme, mode: None, params: Vec::with_capacity(4) };
    p.expect(TokenKind::LeftParen, set::OPEN)?;
    p.s.skip_whitespace();
    p.param()?;
    p.first_separator()?;
    p.param()?;
    p.separator()?;
    p.param()?;
    p.opacity()?;
    p.close()?;

    Ok(p.finish())
}

/// A color function whose grammar was accepted, before unit validation and
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFunction {
    /// The function keyword.
    pub scheme: Scheme,
    /// Three channels, optionally followed by an opacity.
    pub params: Vec<RawParam>,
    /// How the channels were separated.
    pub mode: SeparatorMode,
    /// The text that was parsed.
    pub source: EcoString,
}

impl RawFunction {
    /// The three channel parameters.
    pub fn channels(&self) -> &[RawParam] {
        &self.params[..3]
    }

    /// The opacity parameter, if any.
    pub fn opacity(&self) -> Option<&RawParam> {
        self.params.get(3)
    }

    /// Rebuild the call in the syntax it was written in, with units in their
    /// canonical spelling: `hsl(60deg, 100%, 50%)`.
    pub fn call(&self) -> EcoString {
        let mut out = eco_format!("{}(", self.scheme);
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(match (self.mode, i) {
                    (SeparatorMode::Comma, _) => ", ",
                    (SeparatorMode::Space, 3) => " / ",
                    (SeparatorMode::Space, _) => " ",
                });
            }
            out.push_str(&param.to_string());
        }
        out.push(')');
        out
    }
}

/// A parameter as written: a number and its unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RawParam {
    /// The numeric literal as written, including its sign.
    pub number: EcoString,
    /// The value of the literal.
    pub value: f64,
    /// The unit suffix.
    pub unit: Unit,
    /// The byte range of the parameter in the source.
    pub range: Range<usize>,
}

impl Display for RawParam {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit)
    }
}

/// How the channels of a color function are separated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SeparatorMode {
    /// The legacy syntax: `rgb(255, 255, 0, 0.5)`.
    Comma,
    /// The modern syntax: `rgb(255 255 0 / 50%)`.
    Space,
}

impl SeparatorMode {
    /// The separator's token.
    pub fn token(self) -> TokenKind {
        match self {
            Self::Comma => TokenKind::Comma,
            Self::Space => TokenKind::Space,
        }
    }

    /// The token that introduces the opacity.
    pub fn opacity_token(self) -> TokenKind {
        match self {
            Self::Comma => TokenKind::Comma,
            Self::Space => TokenKind::Slash,
        }
    }
}

/// Read the function keyword.
fn scheme(s: &mut Scanner) -> ParseResult<Scheme> {
    let text = s.string();
    let Some(keyword) = s.eat(TokenKind::Keyword) else {
        bail!(
            ParseError::new(
                ErrorKind::UnknownScheme,
                text,
                0,
                eco_format!("expected {}, found {}", TokenKind::Keyword.name(), s.found()),
            );
            hint: "color functions start with rgb, rgba, hsl, hsla or hwb"
        );
    };

    match Scheme::from_keyword(keyword) {
        Some(scheme) => Ok(scheme),
        None => bail!(
            ParseError::new(
                ErrorKind::UnknownScheme,
                text,
                0,
                eco_format!("unknown color function `{keyword}`"),
            );
            hint: "expected one of rgb, rgba, hsl, hsla or hwb"
        ),
    }
}

/// The state of one parse: the cursor, the scheme and what was read so far.
struct Parser<'s> {
    s: Scanner<'s>,
    scheme: Scheme,
    mode: Option<SeparatorMode>,
    params: Vec<RawParam>,
}

impl Parser<'_> {
    /// Read a number and its optional unit.
    fn param(&mut self) -> ParseResult<()> {
        let start = self.s.cursor();
        let Some(number) = self.s.eat(TokenKind::Number) else {
            return Err(self.expected(set::PARAM));
        };

        let unit_start = self.s.cursor();
        let unit = match self.s.eat(TokenKind::Unit) {
            None => Unit::None,
            Some(suffix) => match Unit::from_suffix(suffix) {
                Some(unit) => unit,
                None => bail!(
                    self.error_at(
                        ErrorKind::Structure,
                        unit_start,
                        eco_format!("unknown unit `{suffix}`"),
                    );
                    hint: "valid units are `%`, `deg`, `grad`, `rad` and `turn`"
                ),
            },
        };

        let value = match number.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            Ok(_) => bail!(
                self.error_at(ErrorKind::Structure, start, "number is out of range");
                hint: "numbers must fit into a 64-bit float"
            ),
            Err(_) => bail!(self.error_at(
                ErrorKind::Structure,
                start,
                eco_format!("invalid number `{number}`"),
            )),
        };

        self.params.push(RawParam {
            number: number.into(),
            value,
            unit,
            range: start..self.s.cursor(),
        });

        Ok(())
    }

    /// Read the separator after the first channel. It fixes the separator
    /// mode for the rest of the parse.
    fn first_separator(&mut self) -> ParseResult<()> {
        let spaced = self.s.skip_whitespace();
        if self.s.at(TokenKind::Comma) {
            if !self.scheme.supports_legacy_commas() {
                bail!(
                    self.error(ErrorKind::Separator, "expected space, found comma");
                    hint: "{} does not support comma-separated parameters", self.scheme
                );
            }
            self.s.eat(TokenKind::Comma);
            self.s.skip_whitespace();
            self.mode = Some(SeparatorMode::Comma);
        } else if spaced && self.s.at(TokenKind::Number) {
            self.mode = Some(SeparatorMode::Space);
        } else if self.scheme.supports_legacy_commas() {
            return Err(self.expected(set::CHANNEL_SEP));
        } else {
            return Err(self.expected(TokenSet::new().add(TokenKind::Space)));
        }
        Ok(())
    }

    /// Read the separator between the second and third channel, which must
    /// match the established mode.
    fn separator(&mut self) -> ParseResult<()> {
        let start = self.s.cursor();
        let spaced = self.s.skip_whitespace();
        match self.mode() {
            SeparatorMode::Comma => {
                if self.s.eat(TokenKind::Comma).is_some() {
                    self.s.skip_whitespace();
                } else if spaced && self.s.at(TokenKind::Number) {
                    bail!(
                        self.error_at(
                            ErrorKind::Separator,
                            start,
                            "expected comma, found space",
                        );
                        hint: "do not mix commas and spaces between the parameters of {}",
                            self.scheme
                    );
                } else {
                    return Err(self.expected(TokenSet::new().add(TokenKind::Comma)));
                }
            }
            SeparatorMode::Space => {
                if self.s.at(TokenKind::Comma) {
                    bail!(
                        self.error(ErrorKind::Separator, "expected space, found comma");
                        hint: "do not mix commas and spaces between the parameters of {}",
                            self.scheme
                    );
                } else if !(spaced && self.s.at(TokenKind::Number)) {
                    return Err(self.expected(TokenSet::new().add(TokenKind::Space)));
                }
            }
        }
        Ok(())
    }

    /// Read the optional fourth parameter along with its separator.
    fn opacity(&mut self) -> ParseResult<()> {
        self.s.skip_whitespace();
        let mode = self.mode();

        let found = if self.s.at(TokenKind::Slash) {
            TokenKind::Slash
        } else if self.s.at(TokenKind::Comma) {
            TokenKind::Comma
        } else {
            return Ok(());
        };

        let expected = mode.opacity_token();
        if found != expected {
            bail!(
                self.error(
                    ErrorKind::Separator,
                    eco_format!(
                        "expected {} before the opacity of {}, found {}",
                        expected.name(),
                        self.scheme,
                        found.name(),
                    ),
                );
                hint: "use `{}` to separate the opacity from {}-separated parameters",
                    if mode == SeparatorMode::Comma { "," } else { "/" },
                    mode.token().name()
            );
        }

        self.s.eat(found);
        self.s.skip_whitespace();
        self.param()
    }

    /// Read the closing paren and make sure nothing but whitespace follows.
    fn close(&mut self) -> ParseResult<()> {
        self.s.skip_whitespace();
        let expected = match (self.params.len(), self.mode()) {
            (3, SeparatorMode::Comma) => set::COMMA_TAIL,
            (3, SeparatorMode::Space) => set::SPACE_TAIL,
            _ => set::CLOSE,
        };
        self.expect(TokenKind::RightParen, expected)?;

        self.s.skip_whitespace();
        if !self.s.done() {
            bail!(
                self.error(
                    ErrorKind::Structure,
                    eco_format!("expected {}, found {}", set::END, self.s.found()),
                );
                hint: "a color function ends with its closing paren"
            );
        }
        Ok(())
    }

    fn finish(self) -> RawFunction {
        RawFunction {
            scheme: self.scheme,
            mode: self.mode(),
            params: self.params,
            source: self.s.string().into(),
        }
    }

    /// The separator mode. Only valid after the first separator was read.
    fn mode(&self) -> SeparatorMode {
        self.mode.unwrap_or(SeparatorMode::Space)
    }

    /// Eat a token of the given kind or fail, describing `expected` as what
    /// would have been valid here.
    fn expect(&mut self, kind: TokenKind, expected: TokenSet) -> ParseResult<()> {
        match self.s.eat(kind) {
            Some(_) => Ok(()),
            None => Err(self.expected(expected)),
        }
    }

    fn expected(&self, expected: TokenSet) -> ParseError {
        self.error(
            ErrorKind::Structure,
            eco_format!("expected {expected}, found {}", self.s.found()),
        )
    }

    fn error(&self, kind: ErrorKind, message: impl Into<EcoString>) -> ParseError {
        self.error_at(kind, self.s.cursor(), message)
    }

    fn error_at(
        &self,
        kind: ErrorKind,
        cursor: usize,
        message: impl Into<EcoString>,
    ) -> ParseError {
        ParseError::new(kind, self.s.string(), cursor, message)
    }
}
