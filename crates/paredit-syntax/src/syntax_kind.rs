//! SyntaxKind enum for all tokens and nodes in the s-expression CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the s-expression CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs, commas)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Line comment starting with `;`
    COMMENT,
    /// `(`
    LPAREN,
    /// `)`
    RPAREN,
    /// `[`
    LBRACKET,
    /// `]`
    RBRACKET,
    /// `{`
    LBRACE,
    /// `}`
    RBRACE,
    /// Complete string literal
    STRING,
    /// String literal missing its closing quote
    UNTERMINATED_STRING,
    /// Character literal such as `\a` or `\newline`
    CHAR,
    /// Reader prefix: quote, syntax-quote, unquote, deref, metadata, dispatch
    PREFIX,
    /// Symbol, keyword or number
    SYMBOL,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// `( ... )`
    LIST,
    /// `[ ... ]`
    VECTOR,
    /// `{ ... }`
    MAP,
    /// A single atom (symbol, string or character)
    ATOM,
    /// A reader prefix applied to the following form, e.g. `'(a b)`
    PREFIXED,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, newlines, comments).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Returns true for delimited collection nodes.
    pub fn is_list(self) -> bool {
        matches!(self, Self::LIST | Self::VECTOR | Self::MAP)
    }

    /// Returns true for tokens that open a collection.
    pub fn is_opener(self) -> bool {
        matches!(self, Self::LPAREN | Self::LBRACKET | Self::LBRACE)
    }

    /// Returns true for tokens that close a collection.
    pub fn is_closer(self) -> bool {
        matches!(self, Self::RPAREN | Self::RBRACKET | Self::RBRACE)
    }

    /// The closing token matching an opener.
    pub fn closer(self) -> Option<SyntaxKind> {
        match self {
            Self::LPAREN => Some(Self::RPAREN),
            Self::LBRACKET => Some(Self::RBRACKET),
            Self::LBRACE => Some(Self::RBRACE),
            _ => None,
        }
    }

    /// The node kind produced by an opener.
    pub fn list_kind(self) -> Option<SyntaxKind> {
        match self {
            Self::LPAREN => Some(Self::LIST),
            Self::LBRACKET => Some(Self::VECTOR),
            Self::LBRACE => Some(Self::MAP),
            _ => None,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SexpLang {}

impl rowan::Language for SexpLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<SexpLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<SexpLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<SexpLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::SYMBOL.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::LIST.is_node());
        assert!(SyntaxKind::PREFIXED.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(SyntaxKind::COMMENT.is_trivia());
        assert!(!SyntaxKind::SYMBOL.is_trivia());
    }

    #[test]
    fn openers_pair_with_closers() {
        assert_eq!(SyntaxKind::LPAREN.closer(), Some(SyntaxKind::RPAREN));
        assert_eq!(SyntaxKind::LBRACKET.list_kind(), Some(SyntaxKind::VECTOR));
        assert_eq!(SyntaxKind::LBRACE.list_kind(), Some(SyntaxKind::MAP));
        assert_eq!(SyntaxKind::SYMBOL.closer(), None);
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::VECTOR;
        let raw: rowan::SyntaxKind = kind.into();
        let back = SexpLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
