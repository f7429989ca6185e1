//! Diagnostics.

use std::fmt::{self, Display, Formatter, Write};

use ecow::{EcoVec, eco_vec};

/// A result type for color function parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Early-return with a [`ParseError`].
///
/// ```ignore
/// bail!(ParseError::new(kind, text, cursor, "message"));
/// bail!(self.error(ErrorKind::Separator, "message"); hint: "a hint");
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    ($error:expr $(; hint: $hint:literal $(, $hint_arg:expr)*)* $(,)?) => {
        return Err($error $(.with_hint($crate::diag::eco_format!($hint $(, $hint_arg)*)))*)
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    ecow::{eco_format, EcoString},
};

/// How many characters of the source a diagnostic echoes.
pub const MAX_ECHO_CHARS: usize = 120;

/// How many consecutive escaped characters a diagnostic echoes before it
/// elides the rest of the run.
pub const MAX_ESCAPED_RUN: usize = 8;

/// The category of a parse failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The leading token is not a known color function name.
    UnknownScheme,
    /// A paren, number or separator is missing or out of place.
    Structure,
    /// Commas and spaces are mixed, or the opacity is introduced by the
    /// wrong separator.
    Separator,
    /// A parameter's unit is not allowed at its position.
    Unit,
}

/// A failure to parse a color function.
///
/// Carries the source text and the byte index at which parsing stopped, so
/// that it can render a diagnostic pointing at the problem.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ParseError {
    kind: ErrorKind,
    source: EcoString,
    cursor: usize,
    message: EcoString,
    hints: EcoVec<EcoString>,
}

impl ParseError {
    /// Create a new error at the given byte index of `source`.
    pub fn new(
        kind: ErrorKind,
        source: impl Into<EcoString>,
        cursor: usize,
        message: impl Into<EcoString>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            cursor,
            message: message.into(),
            hints: eco_vec![],
        }
    }

    /// Adds a single hint to the error.
    pub fn hint(&mut self, hint: impl Into<EcoString>) {
        self.hints.push(hint.into());
    }

    /// Adds a single hint to the error.
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint(hint);
        self
    }

    /// The category of the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The byte index in the source at which parsing stopped.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The message describing the problem.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Additional hints to the user, indicating how this error could be
    /// avoided.
    pub fn hints(&self) -> &[EcoString] {
        &self.hints
    }

    /// Render the three-line diagnostic: the message, the echoed source and
    /// a caret under the failure column.
    pub fn report(&self) -> EcoString {
        let echo = Echo::new(&self.source, self.cursor);
        let mut out = EcoString::new();
        write!(out, "\"{}\" is not a valid code. ", echo.text).ok();
        let mut chars = self.message.chars();
        if let Some(first) = chars.next() {
            for c in first.to_uppercase() {
                out.push(c);
            }
            out.push_str(chars.as_str());
        }
        out.push_str(".\n");
        out.push_str(&echo.text);
        out.push('\n');
        for _ in 0..echo.column {
            out.push(' ');
        }
        out.push('^');
        out
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.report())?;
        for hint in &self.hints {
            write!(f, "\nhint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The source as echoed in a diagnostic, along with the caret column.
struct Echo {
    text: EcoString,
    column: usize,
}

impl Echo {
    /// Sanitize the source for printing.
    ///
    /// Printable ASCII is kept. Every other character is escaped, and runs
    /// of escaped characters longer than [`MAX_ESCAPED_RUN`] are elided
    /// with `...`. Beyond [`MAX_ECHO_CHARS`] characters the rest of the
    /// source is elided too. The output is pure ASCII, so its byte length
    /// is its display width.
    fn new(source: &str, cursor: usize) -> Self {
        let mut text = EcoString::new();
        let mut column = None;
        let mut run = 0;

        for (i, (index, c)) in source.char_indices().enumerate() {
            if i == MAX_ECHO_CHARS {
                column.get_or_insert(text.len());
                text.push_str("...");
                break;
            }

            let printable = c == ' ' || c.is_ascii_graphic();
            run = if printable { 0 } else { run + 1 };

            if index >= cursor && column.is_none() {
                // Inside an elided run, the caret sits on the ellipsis.
                let elided = run > MAX_ESCAPED_RUN + 1;
                column = Some(if elided { text.len() - 3 } else { text.len() });
            }

            if printable {
                text.push(c);
            } else if run <= MAX_ESCAPED_RUN {
                write!(text, "{}", c.escape_default()).ok();
            } else if run == MAX_ESCAPED_RUN + 1 {
                text.push_str("...");
            }
        }

        let column = column.unwrap_or(text.len());
        Self { text, column }
    }
}
