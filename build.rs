extern crate lalrpop;

/// generates the parser (mini.rs) from src/frontend/parser/mini.lalrpop into OUT_DIR,
/// where lalrpop_mod! expects to find it
fn main() {
    lalrpop::Configuration::new()
        .use_cargo_dir_conventions()
        .process()
        .unwrap();
}
