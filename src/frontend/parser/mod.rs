use lalrpop_util::lalrpop_mod;

use crate::frontend::error::FrontendError;
use crate::meta::LocationMeta;

use self::ast::Program;
use self::mini::ProgramParser;

lalrpop_mod!(#[allow(clippy::all)] mini, "/frontend/parser/mini.rs");

pub mod ast;
pub mod literal;


pub type ParsedProgram = Program<LocationMeta>;
pub type ParserErrors = Vec<FrontendError<LocationMeta>>;


/// build the syntax tree, any syntax error is fatal
pub fn parse_program(source_code: &str) -> Result<ParsedProgram, ParserErrors> {
    let parser = ProgramParser::new();
    parser.parse(source_code)
        .map_err(|e| vec![FrontendError::from(e)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::*;

    fn parse(source_code: &str) -> ParsedProgram {
        parse_program(source_code).unwrap()
    }

    #[test]
    fn empty_program_fails() {
        let errors = parse_program("").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].get_meta().offset, 0usize);
    }

    #[test]
    fn declarations_come_first() {
        let program = parse("program { int a, b; double c; a = 1; }");
        assert_eq!(program.stmts.len(), 4);
        assert_eq!(program.stmts[1].item, StatementKind::Decl { t: Type::Int, ident: String::from("b") });
        assert_eq!(program.stmts[2].item, StatementKind::Decl { t: Type::Double, ident: String::from("c") });
        assert_eq!(program.stmts[1].get_meta().offset, 17);
    }

    #[test]
    fn declaration_after_statement_fails() {
        assert!(parse_program("program { int a; a = 1; int b; }").is_err());
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let program = parse("program { bool a; if (a) if (a) write 1; else write 2; }");
        match &program.stmts[1].item {
            StatementKind::Cond { expr: _, stmt } => {
                assert!(matches!(stmt.item, StatementKind::CondElse { .. }), "{:?}", stmt)
            }
            s => panic!("expected if without else, got {:?}", s),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse("program { int a; a = 1 + 2 * 3; }");
        if let StatementKind::Expr { expr } = &program.stmts[1].item {
            if let ExpressionKind::Assign { ident: _, expr } = &expr.item {
                if let ExpressionKind::Binary { left: _, op, right } = &expr.item {
                    assert_eq!(*op, BinaryOperator::Plus);
                    if let ExpressionKind::Binary { op, .. } = &right.item {
                        assert_eq!(*op, BinaryOperator::Times);
                        return;
                    }
                }
            }
        }
        panic!("unexpected tree: {:?}", program)
    }

    #[test]
    fn hex_literal_is_parsed_as_int() {
        let program = parse("program { int a; a = 0x1A; }");
        let hex_program = parse("program { int a; a = 26; }");
        let value = |p: &ParsedProgram| match &p.stmts[1].item {
            StatementKind::Expr { expr } => match &expr.item {
                ExpressionKind::Assign { ident: _, expr } => expr.item.clone(),
                e => panic!("unexpected expression {:?}", e),
            },
            s => panic!("unexpected statement {:?}", s),
        };
        assert_eq!(value(&program), value(&hex_program));
    }

    #[test]
    fn literal_overflow_is_a_parse_error() {
        let errors = parse_program("program { int a; a = 99999999999; }").unwrap_err();
        assert_eq!(errors[0].get_meta().offset, 21);
    }

    #[test]
    fn conversions_and_io() {
        let source_code = "program { int a; double d; read a, hex; d = (double) a; write d, hex; write \"x\\n\"; return; }";
        let program = parse(source_code);
        assert_eq!(program.stmts[2].item, StatementKind::ReadHex { ident: String::from("a") });
        assert_eq!(program.stmts[5].item, StatementKind::WriteString { val: String::from("x\\0A") });
        assert_eq!(program.stmts[6].item, StatementKind::Return);
    }
}
