pub use self::ir::*;

mod display;
mod ir;
