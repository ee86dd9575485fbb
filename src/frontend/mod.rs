use std::fmt;
use std::fs;
use std::ops::Add;
use std::sync::Arc;

use codemap::{CodeMap, File, Pos};
use log::{debug, info};

use crate::meta::{LocationMeta, MetaMapper, SourceLocation, TypeMeta};

use self::error::{FrontendError, FrontendErrorKind};
pub use self::parser::ast;
use self::parser::parse_program;
use self::preprocessor::clean_comments;
use self::typechecker::check_types;

mod parser;
mod preprocessor;
mod typechecker;

pub mod error;


pub type Error = FrontendError<SourceLocation>;

/// program that passed all frontend checks, together with its source file
/// (the backend annotates generated code with source lines)
#[derive(Clone)]
pub struct CheckedProgram {
    pub program: ast::Program<TypeMeta>,
    pub source: Arc<File>,
}

impl fmt::Debug for CheckedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedProgram")
            .field("program", &self.program)
            .field("source", &self.source.name())
            .finish()
    }
}

impl CheckedProgram {
    /// 1-based line number of the given location
    pub fn line_number(&self, loc: &LocationMeta) -> usize {
        self.source.find_line(self.source.map_meta(loc)) + 1
    }

    /// text of the 1-based line in the source file, without trailing newline
    pub fn line_text(&self, line: usize) -> &str {
        self.source.source_line(line - 1).trim_end()
    }
}

/// load file from path and process it as a source code
pub fn process_file(path: &str) -> Result<CheckedProgram, Vec<Error>> {
    let source_code = match fs::read_to_string(path) {
        Ok(source_code) => source_code,
        Err(e) => {
            let err = FrontendError::new(
                FrontendErrorKind::SystemError { message: format!("Failed to read file {}: {}", path, e) },
                SourceLocation { file: String::from(path), line: 0, column: 0 },
            );
            return Err(vec![err]);
        }
    };
    process_code(path, &source_code)
}

/// process source code of the file given by name
pub fn process_code(file_name: &str, source_code: &str) -> Result<CheckedProgram, Vec<Error>> {
    // setup codemap for mapping byte offset to (file, line, column)
    let mut codemap = CodeMap::new();
    let codemap_file = codemap.add_file(String::from(file_name), String::from(source_code));
    let clean_code = clean_comments(source_code);

    info!("parsing {}", file_name);
    let parsed_program = match parse_program(&clean_code) {
        Ok(program) => program,
        Err(errors) => {
            return Err(locate_errors(&errors, &codemap_file, &codemap));
        }
    };

    debug!("type checking {}", file_name);
    let (program, diagnostics) = check_types(&parsed_program);
    if diagnostics.is_empty() {
        Ok(CheckedProgram { program, source: codemap_file })
    } else {
        Err(locate_errors(diagnostics.errors(), &codemap_file, &codemap))
    }
}

/// necessary for mapping source file location
impl MetaMapper<LocationMeta, Pos> for Arc<File> {
    fn map_meta(&self, from: &LocationMeta) -> Pos {
        self.span.low().add(from.offset as u64)
    }
}

/// necessary for mapping source file location
impl MetaMapper<Pos, SourceLocation> for CodeMap {
    fn map_meta(&self, from: &Pos) -> SourceLocation {
        let loc = self.look_up_pos(*from);
        SourceLocation {
            file: String::from(loc.file.name()),
            line: loc.position.line + 1,
            column: loc.position.column + 1,
        }
    }
}

/// translate location from LocationMeta (byte offset in file with removed comments,
/// which is the same as in the original file) to its location in the source code file
fn locate_errors(
    errors: &[FrontendError<LocationMeta>], file: &Arc<File>, code_map: &CodeMap,
) -> Vec<Error> {
    errors.iter()
        .map(|e| e.map_meta::<Pos>(file).map_meta::<SourceLocation>(code_map))
        .collect()
}
