use itertools::Itertools;
use log::info;

use crate::frontend::CheckedProgram;

use self::compiler::ProgramCompiler;

mod compiler;
mod context;
mod ir;

/// compiles the given program, assuming it meets all the necessary criteria (is checked by frontend)
/// into a string containing its LLVM intermediate representation
pub fn compile(program: &CheckedProgram) -> String {
    info!("generating code for {}", program.source.name());
    let mut compiler = ProgramCompiler::new();
    compiler.compile_program(program).iter()
        .map(|llvm| llvm.to_string())
        .join("\n")
}
