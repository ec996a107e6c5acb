//! Token model shared by the lexer and the parser.

use std::fmt;

use crate::lexer::span::Span;

/// Token classification.
///
/// Payload-carrying kinds (`Identifier`, literals, `AddOp`, `MulOp`,
/// `Compare`) store their data in [`TokenValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `begin`
    Begin,
    /// `end`
    End,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `fi`
    Fi,
    /// `while`
    While,
    /// `do`
    Do,
    /// `od`
    Od,
    /// `write`
    Write,
    /// `read`
    Read,
    /// `int` type keyword.
    Int,
    /// `float` type keyword.
    Float,
    /// Variable name.
    Identifier,
    /// Integer literal.
    IntLiteral,
    /// Float literal.
    FloatLiteral,
    /// `+` or `-`.
    AddOp,
    /// `*` or `/`.
    MulOp,
    /// One of the six comparison operators.
    Compare,
    /// `:=`
    Assign,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `;`
    Semicolon,
    /// Character sequence that is not part of the language.
    Illegal,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Maps a word to its keyword kind.
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "begin" => Self::Begin,
            "end" => Self::End,
            "if" => Self::If,
            "then" => Self::Then,
            "else" => Self::Else,
            "fi" => Self::Fi,
            "while" => Self::While,
            "do" => Self::Do,
            "od" => Self::Od,
            "write" => Self::Write,
            "read" => Self::Read,
            "int" => Self::Int,
            "float" => Self::Float,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for `+ - * /` and comparison operators.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::AddOp | Self::MulOp | Self::Compare)
    }

    /// Returns `true` for keywords that close a statement list.
    pub fn closes_block(self) -> bool {
        matches!(self, Self::End | Self::Od | Self::Else | Self::Fi)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Begin => "'begin'",
            Self::End => "'end'",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::Fi => "'fi'",
            Self::While => "'while'",
            Self::Do => "'do'",
            Self::Od => "'od'",
            Self::Write => "'write'",
            Self::Read => "'read'",
            Self::Int => "'int'",
            Self::Float => "'float'",
            Self::Identifier => "identifier",
            Self::IntLiteral => "integer number",
            Self::FloatLiteral => "float number",
            Self::AddOp => "'+' or '-'",
            Self::MulOp => "'*' or '/'",
            Self::Compare => "comparison operator",
            Self::Assign => "':='",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Semicolon => "';'",
            Self::Illegal => "illegal token",
            Self::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Subtype of an `AddOp` or `MulOp` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

/// Subtype of a `Compare` token.
///
/// The discriminants are the operand of the VM `COMPARE` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComparisonOp {
    /// `=`
    Equal = 0,
    /// `!=`
    NotEqual = 1,
    /// `<`
    Less = 2,
    /// `>`
    Greater = 3,
    /// `<=`
    LessOrEqual = 4,
    /// `>=`
    GreaterOrEqual = 5,
}

impl ComparisonOp {
    /// Returns the numeric comparison kind used by `COMPARE`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Self::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Equal),
            1 => Some(Self::NotEqual),
            2 => Some(Self::Less),
            3 => Some(Self::Greater),
            4 => Some(Self::LessOrEqual),
            5 => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }
}

/// Payload attached to a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Token carries no payload.
    None,
    /// Integer literal value.
    Integer(i64),
    /// Float literal value.
    Float(f64),
    /// Identifier text.
    Name(String),
    /// Arithmetic operator subtype.
    Arithmetic(ArithmeticOp),
    /// Comparison operator subtype.
    Comparison(ComparisonOp),
}

/// A lexical token with classification, payload and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Attached payload.
    pub value: TokenValue,
    /// Token text preserved as scanned.
    pub lexeme: String,
    /// Source span.
    pub span: Span,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, value: TokenValue, lexeme: String, span: Span) -> Self {
        Self {
            kind,
            value,
            lexeme,
            span,
        }
    }

    /// Returns the 1-based line this token starts on.
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Returns the identifier text, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the integer literal value, if any.
    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the float literal value, if any.
    pub fn float(&self) -> Option<f64> {
        match self.value {
            TokenValue::Float(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the arithmetic subtype, if any.
    pub fn arithmetic(&self) -> Option<ArithmeticOp> {
        match self.value {
            TokenValue::Arithmetic(op) => Some(op),
            _ => None,
        }
    }

    /// Returns the comparison subtype, if any.
    pub fn comparison(&self) -> Option<ComparisonOp> {
        match self.value {
            TokenValue::Comparison(op) => Some(op),
            _ => None,
        }
    }
}
