use std::fmt;

use itertools::Itertools;
use lalrpop_util::ParseError as LalrpopError;
use log::debug;

use crate::frontend::ast::Type;
use crate::meta::{LocationMeta, Meta, SourceLocation};

#[derive(Debug, PartialEq, Clone)]
pub enum FrontendErrorKind {
    ParseError {
        message: String,
    },
    WrongArgument {
        operation: String,
        expected: String,
        actual: Vec<Type>,
    },
    UndeclaredVariable {
        ident: String,
    },
    DuplicateDeclaration {
        ident: String,
    },
    SystemError {
        message: String,
    },
}

impl FrontendErrorKind {
    /// fatal errors prevent building the syntax tree at all
    pub fn is_fatal(&self) -> bool {
        match self {
            FrontendErrorKind::ParseError { .. } | FrontendErrorKind::SystemError { .. } => true,
            _ => false,
        }
    }

    fn summary(&self) -> String {
        match self {
            FrontendErrorKind::ParseError { .. } => String::from("Syntax error"),
            FrontendErrorKind::WrongArgument { operation, .. } => {
                format!("Wrong argument in {}", operation)
            }
            FrontendErrorKind::UndeclaredVariable { ident } => {
                format!("Undeclared variable {}", ident)
            }
            FrontendErrorKind::DuplicateDeclaration { ident } => {
                format!("Variable {} is already declared", ident)
            }
            FrontendErrorKind::SystemError { message } => message.clone(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            FrontendErrorKind::ParseError { message } => Some(message.clone()),
            FrontendErrorKind::WrongArgument { operation: _, expected, actual } => {
                Some(format!("Expected {} - got {}.", expected, actual.iter().join(" and ")))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FrontendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.details() {
            Some(details) => write!(f, "{}. {}", self.summary(), details),
            None => write!(f, "{}.", self.summary()),
        }
    }
}

/// standardized type to remember all frontend errors
pub type FrontendError<LocationT> = Meta<FrontendErrorKind, LocationT>;

impl fmt::Display for FrontendError<SourceLocation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let FrontendErrorKind::SystemError { message } = &self.item {
            return write!(f, "{}", message);
        }
        write!(f, "{} at line: {}.", self.item.summary(), self.get_meta().line)?;
        if let Some(details) = self.item.details() {
            write!(f, " {}", details)?;
        }
        Ok(())
    }
}

/// raised by grammar actions when literal text cannot be represented
#[derive(Debug, PartialEq, Clone)]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

impl<T: fmt::Display> From<LalrpopError<usize, T, LiteralError>> for FrontendError<LocationMeta> {
    fn from(err: LalrpopError<usize, T, LiteralError>) -> Self {
        let (location, message) = match err {
            LalrpopError::InvalidToken { location } => {
                (location, String::from("Invalid token"))
            }
            LalrpopError::UnrecognizedEof { location, expected } => {
                (location, format!("Unexpected end of file, expected one of: {}", expected.join(", ")))
            }
            LalrpopError::UnrecognizedToken { token: (location, token, _), expected } => {
                (location, format!("Unexpected `{}`, expected one of: {}", token, expected.join(", ")))
            }
            LalrpopError::ExtraToken { token: (location, token, _) } => {
                (location, format!("Unexpected `{}` after end of program", token))
            }
            LalrpopError::User { error } => (error.offset, error.message),
        };
        FrontendError::new(FrontendErrorKind::ParseError { message }, LocationMeta::from(location))
    }
}

/// accumulates semantic errors, analysis continues after each of them
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<FrontendError<LocationMeta>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// record an error, the same error reported twice for the same node is counted once
    pub fn report(&mut self, kind: FrontendErrorKind, location: LocationMeta) {
        let err = FrontendError::new(kind, location);
        if !self.errors.contains(&err) {
            debug!("error at offset {}: {}", location.offset, err.item);
            self.errors.push(err);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FrontendError<LocationMeta>] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_line(kind: FrontendErrorKind, line: usize) -> String {
        let location = SourceLocation { file: String::from("test.mini"), line, column: 1 };
        FrontendError::new(kind, location).to_string()
    }

    #[test]
    fn wrong_argument_message() {
        let kind = FrontendErrorKind::WrongArgument {
            operation: String::from("addition"),
            expected: String::from("int or double"),
            actual: vec![Type::Bool, Type::Int],
        };
        assert_eq!(
            at_line(kind, 3),
            "Wrong argument in addition at line: 3. Expected int or double - got bool and int."
        );
    }

    #[test]
    fn undeclared_variable_message() {
        let kind = FrontendErrorKind::UndeclaredVariable { ident: String::from("y") };
        assert_eq!(at_line(kind, 1), "Undeclared variable y at line: 1.");
    }

    #[test]
    fn repeated_report_is_counted_once() {
        let mut diagnostics = Diagnostics::new();
        let kind = FrontendErrorKind::DuplicateDeclaration { ident: String::from("x") };
        diagnostics.report(kind.clone(), LocationMeta::from(10));
        diagnostics.report(kind.clone(), LocationMeta::from(10));
        assert_eq!(diagnostics.error_count(), 1);
        diagnostics.report(kind, LocationMeta::from(20));
        assert_eq!(diagnostics.error_count(), 2);
    }

    #[test]
    fn literal_error_keeps_location() {
        let err: LalrpopError<usize, String, LiteralError> = LalrpopError::User {
            error: LiteralError { offset: 7, message: String::from("too big") },
        };
        let err = FrontendError::from(err);
        assert_eq!(err.get_meta().offset, 7);
        assert!(err.item.is_fatal());
    }
}
