use crate::backend::ir::{BasicBlock, Entity, Instruction, ValueType};

/// kinds of structural labels, each numbered independently
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LabelKind {
    Entry,
    True,
    False,
    Out,
}

impl LabelKind {
    fn prefix(&self) -> &'static str {
        match self {
            LabelKind::Entry => "entry",
            LabelKind::True => "true",
            LabelKind::False => "false",
            LabelKind::Out => "out",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone)]
pub struct FunctionContext {
    /// basic block to which we're actively writing instructions
    current_block: Option<BasicBlock>,

    /// number of next available value register
    available_register: usize,

    /// number of next available pointer (temporary storage or logic slot)
    available_pointer: usize,

    /// number of next available label, for every LabelKind
    available_labels: [usize; 4],

    /// temporary storage and short-circuit slots, allocated at function entry
    /// so that statements inside loops do not grow the stack
    entry_storage: Vec<Entity>,

    /// already compiled basic blocks
    compiled_blocks: Vec<BasicBlock>,
}

impl FunctionContext {
    pub fn new() -> Self {
        Self {
            current_block: Some(BasicBlock { label: None, instructions: vec![] }),
            available_register: 1,
            available_pointer: 1,
            available_labels: [1; 4],
            entry_storage: vec![],
            compiled_blocks: vec![],
        }
    }

    /// get new numbered register holding a value of the given type
    pub fn new_register(&mut self, t: ValueType) -> Entity {
        let n = self.available_register;
        self.available_register += 1;
        Entity::Register { n, t }
    }

    /// get new numbered pointer to a storage of the given type, allocated at function entry
    pub fn new_pointer(&mut self, t: ValueType) -> Entity {
        let n = self.available_pointer;
        self.available_pointer += 1;
        let ptr = Entity::Pointer { n, t };
        self.entry_storage.push(ptr.clone());
        ptr
    }

    /// get new boolean storage, remembered so that it can be allocated at function entry
    pub fn new_logic_slot(&mut self) -> Entity {
        let n = self.available_pointer;
        self.available_pointer += 1;
        let slot = Entity::LogicSlot { n };
        self.entry_storage.push(slot.clone());
        slot
    }

    /// all storage that has to be allocated in the entry block, in order of creation
    pub fn get_entry_storage(&self) -> &[Entity] {
        &self.entry_storage
    }

    /// get new unique label of the given kind
    pub fn new_label(&mut self, kind: LabelKind) -> String {
        let n = self.available_labels[kind.index()];
        self.available_labels[kind.index()] += 1;
        format!("{}_{}", kind.prefix(), n)
    }

    /// add new instruction to the current basic block
    pub fn push_instruction(&mut self, instr: Instruction) {
        match &mut self.current_block {
            Some(block) => block.instructions.push(instr),
            None => panic!("Cannot push instruction: function is already concluded"),
        }
    }

    /// concludes the current block and creates a new one, with specified label
    pub fn next_block(&mut self, label: String) {
        if let Some(block) = self.current_block.take() {
            self.compiled_blocks.push(block);
            self.current_block = Some(BasicBlock { label: Some(label), instructions: vec![] });
        } else {
            panic!("Cannot conclude current block: it doesn't exist")
        }
    }

    /// concludes the current block and returns all compiled blocks
    pub fn conclude(&mut self) -> Vec<BasicBlock> {
        if let Some(block) = self.current_block.take() {
            self.compiled_blocks.push(block);
        } else {
            panic!("Cannot conclude current block: it doesn't exist")
        }
        self.compiled_blocks.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ir::InstructionKind;

    #[test]
    fn counters_are_independent() {
        let mut context = FunctionContext::new();
        assert_eq!(context.new_register(ValueType::I32).to_string(), "%tmp_1");
        assert_eq!(context.new_pointer(ValueType::I32).to_string(), "%ptr_1");
        assert_eq!(context.new_logic_slot().to_string(), "%logic_2");
        assert_eq!(context.new_register(ValueType::I1).to_string(), "%tmp_2");
        assert_eq!(context.new_label(LabelKind::Entry), "entry_1");
        assert_eq!(context.new_label(LabelKind::Entry), "entry_2");
        assert_eq!(context.new_label(LabelKind::Out), "out_1");
        assert_eq!(context.get_entry_storage().len(), 2);
    }

    #[test]
    fn blocks_are_concluded_in_order() {
        let mut context = FunctionContext::new();
        context.push_instruction(InstructionKind::Jump { label: String::from("entry_1") }.without_result());
        context.next_block(String::from("entry_1"));
        context.push_instruction(InstructionKind::Ret { val: Entity::from(0) }.without_result());
        let blocks = context.conclude();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].label, None);
        assert_eq!(blocks[1].label, Some(String::from("entry_1")));
    }
}
