use ecow::{EcoString, eco_format};

use crate::set::TokenKind;

/// A cursor over a color function's text that matches tokens on demand.
///
/// Nothing is skipped implicitly: whitespace is significant in the
/// space-separated syntax, so callers decide when to skip it.
#[derive(Clone)]
pub struct Scanner<'s> {
    /// The underlying string and the location of the cursor.
    s: unscanny::Scanner<'s>,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner at the start of the text.
    pub fn new(text: &'s str) -> Self {
        Self { s: unscanny::Scanner::new(text) }
    }

    /// The full text.
    pub fn string(&self) -> &'s str {
        self.s.string()
    }

    /// The byte index at which the next token starts.
    pub fn cursor(&self) -> usize {
        self.s.cursor()
    }

    /// Whether the end of the text is reached.
    pub fn done(&self) -> bool {
        self.s.done()
    }

    /// Skip whitespace. Returns whether any was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        !self.s.eat_while(is_space).is_empty()
    }

    /// Match a token of the given kind at the cursor.
    ///
    /// On success, moves past it and returns its text. On failure, the
    /// cursor is left untouched.
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'s str> {
        let start = self.s.cursor();
        let mut s = self.s;
        let matched = match kind {
            TokenKind::Keyword => !s.eat_while(is_letter).is_empty(),
            TokenKind::LeftParen => s.eat_if('('),
            TokenKind::RightParen => s.eat_if(')'),
            TokenKind::Number => number(&mut s),
            TokenKind::Unit => {
                s.eat_if('%') || !s.eat_while(is_letter).is_empty()
            }
            TokenKind::Comma => s.eat_if(','),
            TokenKind::Slash => s.eat_if('/'),
            TokenKind::Space => !s.eat_while(is_space).is_empty(),
            TokenKind::End => s.done(),
        };

        if !matched {
            return None;
        }

        self.s = s;
        Some(self.s.from(start))
    }

    /// Whether a token of the given kind is at the cursor. Never moves the
    /// cursor.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.clone().eat(kind).is_some()
    }

    /// Describe what is at the cursor, for an "expected .., found .."
    /// diagnostic.
    pub fn found(&self) -> EcoString {
        const NAMED: [TokenKind; 7] = [
            TokenKind::End,
            TokenKind::Space,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Comma,
            TokenKind::Slash,
            TokenKind::Number,
        ];

        if let Some(kind) = NAMED.into_iter().find(|&kind| self.at(kind)) {
            return kind.name().into();
        }

        match self.s.peek() {
            Some(c) => eco_format!("`{}`", c.escape_default()),
            None => TokenKind::End.name().into(),
        }
    }
}

/// Eat a number: an optional sign, then digits with an optional fraction or
/// a fraction alone.
fn number(s: &mut unscanny::Scanner) -> bool {
    let mut t = *s;
    t.eat_if(['+', '-']);
    let int = t.eat_while(|c: char| c.is_ascii_digit());

    // Make sure not to take a trailing dot without digits.
    let mut fraction = false;
    let mut u = t;
    if u.eat_if('.') && !u.eat_while(|c: char| c.is_ascii_digit()).is_empty() {
        t = u;
        fraction = true;
    }

    if int.is_empty() && !fraction {
        return false;
    }

    *s = t;
    true
}

#[inline]
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Whether a character separates tokens.
#[inline]
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_eat() {
        let mut s = Scanner::new("rgb(255 -.5%, +1.25turn)");
        assert_eq!(s.eat(TokenKind::Keyword), Some("rgb"));
        assert_eq!(s.eat(TokenKind::Number), None);
        assert_eq!(s.cursor(), 3);
        assert_eq!(s.eat(TokenKind::LeftParen), Some("("));
        assert_eq!(s.eat(TokenKind::Number), Some("255"));
        assert_eq!(s.eat(TokenKind::Unit), None);
        assert!(s.skip_whitespace());
        assert!(!s.skip_whitespace());
        assert_eq!(s.eat(TokenKind::Number), Some("-.5"));
        assert_eq!(s.eat(TokenKind::Unit), Some("%"));
        assert_eq!(s.eat(TokenKind::Comma), Some(","));
        assert_eq!(s.eat(TokenKind::Space), Some(" "));
        assert_eq!(s.eat(TokenKind::Number), Some("+1.25"));
        assert_eq!(s.eat(TokenKind::Unit), Some("turn"));
        assert_eq!(s.eat(TokenKind::End), None);
        assert_eq!(s.eat(TokenKind::RightParen), Some(")"));
        assert!(s.done());
        assert_eq!(s.eat(TokenKind::End), Some(""));
    }

    #[test]
    fn test_scanner_number_shapes() {
        #[track_caller]
        fn test(text: &str, number: Option<&str>) {
            assert_eq!(Scanner::new(text).eat(TokenKind::Number), number);
        }

        test("12", Some("12"));
        test("12.5deg", Some("12.5"));
        test(".5", Some(".5"));
        test("1.", Some("1"));
        test("-0", Some("-0"));
        test("+", None);
        test("-.", None);
        test(".", None);
        test("abc", None);
    }

    #[test]
    fn test_scanner_at_does_not_move() {
        let s = Scanner::new("  1");
        assert!(s.at(TokenKind::Space));
        assert!(!s.at(TokenKind::Number));
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_scanner_found() {
        #[track_caller]
        fn test(text: &str, found: &str) {
            assert_eq!(Scanner::new(text).found(), found);
        }

        test("", "end of input");
        test(" 1", "space");
        test(")", "closing paren");
        test(",", "comma");
        test("/", "slash");
        test("3", "number");
        test("x", "`x`");
        test("\u{7}", "`\\u{7}`");
    }
}
