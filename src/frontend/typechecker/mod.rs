use log::debug;

use crate::frontend::ast::Program;
use crate::frontend::error::Diagnostics;
use crate::frontend::parser::ParsedProgram;
use crate::meta::TypeMeta;
use crate::util::mapper::AstMapper;

use self::typechecker::TypeChecker;

mod mapper;
mod typechecker;


/// main typechecker function: attaches result type to every node of the program,
/// collecting all semantic errors instead of stopping at the first one
pub fn check_types(program: &ParsedProgram) -> (Program<TypeMeta>, Diagnostics) {
    let mut typechecker = TypeChecker::new();
    let checked_program = typechecker.map_program(program);
    let diagnostics = typechecker.into_diagnostics();
    debug!(
        "checked {} top-level statements, {} errors",
        checked_program.stmts.len(), diagnostics.error_count()
    );
    (checked_program, diagnostics)
}
