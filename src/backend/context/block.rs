use crate::backend::ir::Entity;
use crate::util::env::Env;

/// variables visible in the compiled code, the language has a single flat scope
#[derive(Debug, Clone)]
pub struct BlockContext {
    env: Env<Entity>,
}

impl BlockContext {
    pub fn new() -> Self {
        Self { env: Env::new() }
    }

    /// get entity representing a pointer to a variable with given identifier
    pub fn get_variable(&self, ident: &str) -> Entity {
        match self.env.get(ident) {
            Some(ent) => ent.clone(),
            None => panic!("Identifier not found: {}", ident),
        }
    }

    /// set pointer to a new variable in environment
    pub fn set_new_variable(&mut self, ident: &str, ent: Entity) {
        self.env.insert(String::from(ident), ent);
    }
}
