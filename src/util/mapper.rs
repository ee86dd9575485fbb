use crate::frontend::ast::{Expression, Program, Statement};


pub trait AstMapper<FromMeta, ToMeta> {
    fn map_expression(&mut self, expr: &Expression<FromMeta>) -> Expression<ToMeta>;
    fn map_statement(&mut self, stmt: &Statement<FromMeta>) -> Statement<ToMeta>;

    /// main ast mapper function, maps statements in the order of appearance
    fn map_program(&mut self, program: &Program<FromMeta>) -> Program<ToMeta> {
        let stmts = program.stmts.iter()
            .map(|stmt| self.map_statement(stmt))
            .collect();
        Program { stmts }
    }
}
