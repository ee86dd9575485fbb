pub use self::program::ProgramCompiler;

mod function;
mod program;
