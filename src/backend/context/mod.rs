pub use self::block::BlockContext;
pub use self::function::{FunctionContext, LabelKind};
pub use self::global::GlobalContext;

mod block;
mod function;
mod global;
