use crate::frontend::ast::Type;
use crate::frontend::error::{Diagnostics, FrontendErrorKind};
use crate::meta::{LocationMeta, Meta};
use crate::util::env::{Env, UniqueEnv};

/// symbol table and error sink for a single compilation unit,
/// the language has a single flat scope so one environment is enough
pub struct TypeChecker {
    env: Env<Meta<Type, LocationMeta>>,
    diagnostics: Diagnostics,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self { env: Env::new(), diagnostics: Diagnostics::new() }
    }

    #[cfg(test)]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// add variable to the environment, reporting duplicates
    pub fn declare_variable(&mut self, ident: &str, t: Type, loc: LocationMeta) {
        let decl = Meta::new(t, loc);
        if let Err(kind) = self.env.insert_unique(String::from(ident), decl) {
            self.diagnostics.report(kind, loc);
        }
    }

    /// get type of a declared variable,
    /// undeclared variables are reported and typed as void so that dependent checks stay quiet
    pub fn get_variable(&mut self, ident: &str, loc: LocationMeta) -> Type {
        match self.env.get(ident) {
            Some(decl) => decl.item,
            None => {
                let kind = FrontendErrorKind::UndeclaredVariable { ident: String::from(ident) };
                self.diagnostics.report(kind, loc);
                Type::Void
            }
        }
    }

    /// report a wrong argument unless it is void (the cause was already reported)
    pub fn expect(&mut self, valid: bool, operation: &str, expected: &str, actual: Vec<Type>, loc: LocationMeta) {
        if !valid && !actual.contains(&Type::Void) {
            let kind = FrontendErrorKind::WrongArgument {
                operation: String::from(operation),
                expected: String::from(expected),
                actual,
            };
            self.diagnostics.report(kind, loc);
        }
    }
}
