// Acknowledgement:
// Based on rust-analyzer's `TokenSet`.
// https://github.com/rust-lang/rust-analyzer/blob/master/crates/parser/src/token_set.rs

use std::fmt::{self, Debug, Display, Formatter};

/// The lexical shapes that make up a color function.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// The function name: `rgb`, `hsla`, ...
    Keyword,
    /// An opening parenthesis: `(`.
    LeftParen,
    /// A closing parenthesis: `)`.
    RightParen,
    /// A numeric literal: `255`, `-.5`, `+12.75`.
    Number,
    /// A unit suffix directly attached to a number: `%`, `deg`, `turn`.
    Unit,
    /// A comma: `,`.
    Comma,
    /// A slash: `/`.
    Slash,
    /// One or more whitespace characters.
    Space,
    /// The end of the input.
    End,
}

impl TokenKind {
    /// A human-readable name for the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Keyword => "color function name",
            Self::LeftParen => "opening paren",
            Self::RightParen => "closing paren",
            Self::Number => "number",
            Self::Unit => "unit",
            Self::Comma => "comma",
            Self::Slash => "slash",
            Self::Space => "space",
            Self::End => "end of input",
        }
    }

    const ALL: [Self; 9] = [
        Self::Keyword,
        Self::LeftParen,
        Self::RightParen,
        Self::Number,
        Self::Unit,
        Self::Comma,
        Self::Slash,
        Self::Space,
        Self::End,
    ];
}

/// A set of token kinds.
///
/// Used to describe what the parser expected when it fails.
#[derive(Default, Copy, Clone, Eq, PartialEq)]
pub struct TokenSet(u16);

impl TokenSet {
    /// Create a new, empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a token kind into the set.
    pub const fn add(self, kind: TokenKind) -> Self {
        Self(self.0 | bit(kind))
    }

    /// Whether the set contains the given token kind.
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & bit(kind)) != 0
    }

    /// Iterate over the contained kinds in declaration order.
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }
}

const fn bit(kind: TokenKind) -> u16 {
    1 << (kind as u16)
}

impl Debug for TokenSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the set as an alternative list: `closing paren, comma or slash`.
impl Display for TokenSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let names: Vec<_> = self.iter().map(TokenKind::name).collect();
        f.write_str(&alternatives(&names))
    }
}

/// Join names as `a`, `a or b`, `a, b or c`.
pub(crate) fn alternatives<S: AsRef<str>>(names: &[S]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(if i + 1 == names.len() { " or " } else { ", " });
        }
        out.push_str(name.as_ref());
    }
    out
}

/// Just build a token set of the given kinds. Only used in this crate.
///
/// Example: `const SET: TokenSet = make_set!(Comma, Slash);`
macro_rules! make_set {
    ( $($kind:ident),* $(,)? ) => {
        TokenSet::new()
        $(.add(TokenKind::$kind))*
    }
}

/// What may open the parameter list.
pub const OPEN: TokenSet = make_set!(LeftParen);

/// What may start a parameter.
pub const PARAM: TokenSet = make_set!(Number);

/// Separators between the first channels of a legacy-capable function.
pub const CHANNEL_SEP: TokenSet = make_set!(Comma, Space);

/// What may follow the third channel of a comma-separated function.
pub const COMMA_TAIL: TokenSet = make_set!(RightParen, Comma);

/// What may follow the third channel of a space-separated function.
pub const SPACE_TAIL: TokenSet = make_set!(RightParen, Slash);

/// What may close the parameter list.
pub const CLOSE: TokenSet = make_set!(RightParen);

/// What may follow the closing paren.
pub const END: TokenSet = make_set!(End);
