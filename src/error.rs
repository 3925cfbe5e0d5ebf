use thiserror::Error;

/// Location of a diagnostic: the 1-indexed source line it refers to.
///
/// Unlike a full lexer span this format has no sub-line cursor — every
/// error and listing entry is anchored to a whole logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
}

impl Span {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("duplicate symbol '{0}'")]
    DuplicateSymbol(String),
    #[error("unknown opcode or directive '{0}'")]
    UnknownOpcode(String),
    #[error("invalid {directive} operand: {text}")]
    InvalidDirectiveOperand { directive: String, text: String },
    #[error("invalid register '{0}'")]
    InvalidRegister(String),
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),
    #[error("invalid operand syntax: {0}")]
    InvalidOperandSyntax(String),
}

/// A fatal assembly error. Raised with the source line number and
/// propagated with `?`; the assembler aborts on the first one.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("ERROR (line {}): {kind}", span.line)]
pub struct AsmError {
    pub kind: ErrorKind,
    pub span: Span,
}

impl AsmError {
    pub fn new(kind: ErrorKind, line: usize) -> Self {
        Self {
            kind,
            span: Span::new(line),
        }
    }

    pub fn duplicate_symbol(name: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::DuplicateSymbol(name.into()), line)
    }

    pub fn unknown_opcode(token: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::UnknownOpcode(token.into()), line)
    }

    pub fn invalid_directive_operand(
        directive: impl Into<String>,
        text: impl Into<String>,
        line: usize,
    ) -> Self {
        Self::new(
            ErrorKind::InvalidDirectiveOperand {
                directive: directive.into(),
                text: text.into(),
            },
            line,
        )
    }

    pub fn invalid_register(name: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::InvalidRegister(name.into()), line)
    }

    pub fn undefined_symbol(name: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::UndefinedSymbol(name.into()), line)
    }

    pub fn invalid_operand_syntax(text: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::InvalidOperandSyntax(text.into()), line)
    }
}

/// A non-fatal diagnostic: format-3 displacement selection fell through
/// to a direct-addressing fallback. Assembly continues; the warning is
/// logged and returned alongside the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub span: Span,
}

impl Warning {
    pub fn displacement_out_of_range(symbol: &str, line: usize) -> Self {
        Self {
            message: format!(
                "displacement to '{symbol}' fits neither PC-relative nor base-relative; \
                 falling back to direct addressing with no modification record"
            ),
            span: Span::new(line),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WARNING (line {}): {}", self.span.line, self.message)
    }
}
