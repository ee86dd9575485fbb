use crate::frontend::ast::Type;
use crate::meta::{GetLocation, LocationMeta, Meta};

/// metadata attached by the typechecker: result type and original location of the node
#[derive(Debug, PartialEq, Clone)]
pub struct TypeMeta {
    pub t: Type,
    pub location: LocationMeta,
}

pub trait GetType {
    fn get_type(&self) -> Type;
}

impl<ItemT> GetType for Meta<ItemT, TypeMeta> {
    fn get_type(&self) -> Type {
        self.get_meta().t.clone()
    }
}

impl<ItemT> GetLocation for Meta<ItemT, TypeMeta> {
    fn get_location(&self) -> LocationMeta {
        self.get_meta().location
    }
}
