use std::collections::HashMap;

use crate::frontend::error::FrontendErrorKind;
use crate::meta::Meta;

/// alias, we use String as key everywhere in the project
pub type Env<T> = HashMap<String, T>;

pub trait UniqueEnv<ItemT, LocationT> {
    /// associates k with v unless k is already present, in which case the first value is kept;
    /// inserting a value equal to the present one (same item, same location) is not an error
    fn insert_unique(&mut self, k: String, v: Meta<ItemT, LocationT>) -> Result<(), FrontendErrorKind>;
}

impl<ItemT: PartialEq, LocationT: PartialEq> UniqueEnv<ItemT, LocationT> for Env<Meta<ItemT, LocationT>> {
    fn insert_unique(&mut self, k: String, v: Meta<ItemT, LocationT>) -> Result<(), FrontendErrorKind> {
        match self.get(&k) {
            Some(previous_val) if *previous_val == v => Ok(()),
            Some(_) => Err(FrontendErrorKind::DuplicateDeclaration { ident: k }),
            None => {
                self.insert(k, v);
                Ok(())
            }
        }
    }
}
