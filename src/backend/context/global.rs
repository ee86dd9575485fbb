use crate::backend::ir::{Format, LLVM, StringDecl};

#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// string constants in order of first use
    string_declarations: Vec<StringDecl>,

    /// LLVM IR String representation of function declarations
    function_declarations: Vec<String>,

    /// number for next available global constant
    available_const: usize,
}

impl GlobalContext {
    pub fn new() -> Self {
        Self {
            string_declarations: vec![],
            function_declarations: vec![
                String::from("declare i32 @printf(i8*, ...)"),
                String::from("declare i32 @scanf(i8*, ...)"),
            ],
            available_const: 1,
        }
    }

    /// add new constant string to declarations, get the declared constant,
    /// declaring the same string again returns the existing constant
    pub fn declare_string(&mut self, val: &str) -> StringDecl {
        if let Some(existing_decl) = self.string_declarations.iter().find(|decl| decl.val == val) {
            existing_decl.clone()
        } else {
            let new_decl = StringDecl::new(self.new_const_name(), String::from(val));
            self.string_declarations.push(new_decl.clone());
            new_decl
        }
    }

    /// get new unique name for a global constant
    fn new_const_name(&mut self) -> String {
        let ord = self.available_const;
        self.available_const += 1;
        format!(".str.{}", ord)  // same convention as clang uses for C strings
    }

    /// get all global declarations: user strings, format strings, external functions
    pub fn get_declarations(&self) -> Vec<LLVM> {
        let llvm_str_decl = self.string_declarations.iter()
            .cloned()
            .chain(Format::ALL.iter().map(Format::decl))
            .map(|decl| LLVM::DeclString { decl });
        let llvm_func_decl = self.function_declarations.iter()
            .map(|decl| LLVM::DeclFunction { decl: decl.clone() });
        llvm_str_decl.chain(llvm_func_decl).collect()
    }
}
