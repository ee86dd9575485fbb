use log::{debug, trace};

use crate::backend::compiler::function::FunctionCompiler;
use crate::backend::context::GlobalContext;
use crate::backend::ir::{FunctionDef, LLVM, ValueType};
use crate::frontend::CheckedProgram;

/// compiles the whole program, which is a single main function with its global declarations
pub struct ProgramCompiler {
    global_context: GlobalContext,
}

impl ProgramCompiler {
    pub fn new() -> Self {
        Self { global_context: GlobalContext::new() }
    }

    pub fn compile_program(&mut self, program: &CheckedProgram) -> Vec<LLVM> {
        let mut function_compiler = FunctionCompiler::new(program, &mut self.global_context);
        for stmt in program.program.stmts.iter() {
            trace!("compiling {:?}", stmt.item);
            function_compiler.compile_statement(stmt);
        }
        let body = function_compiler.conclude();
        debug!("main function compiled into {} basic blocks", body.len());

        let main = FunctionDef { name: String::from("main"), ret_type: ValueType::I32, body };
        let header = LLVM::Comment { text: format!("compiled from {}", program.source.name()) };

        let mut compiled = vec![header];
        compiled.extend(self.global_context.get_declarations());
        compiled.push(LLVM::Function { def: main });
        compiled
    }
}
