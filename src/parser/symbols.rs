//! Flat symbol table mapping variable names to storage slots.

use std::collections::HashMap;

use crate::ir::Slot;

/// Declared numeric kind of a variable, also used for cast directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    /// `int`
    Int,
    /// `float`
    Float,
}

/// Storage binding of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Storage slot.
    pub slot: Slot,
    /// Declared kind.
    pub kind: NumericKind,
}

/// Symbol table failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolError {
    /// The name is already declared; carries the existing binding.
    DuplicateDeclaration(Binding),
    /// The name was never declared.
    UndeclaredVariable,
}

/// Single-scope table of declared variables.
///
/// Slots are handed out in declaration order starting at 0 with no gaps.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Binding>,
    last_declared: Option<NumericKind>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name`, returning its new slot.
    pub fn declare(&mut self, name: &str, kind: NumericKind) -> Result<Slot, SymbolError> {
        if let Some(existing) = self.bindings.get(name) {
            return Err(SymbolError::DuplicateDeclaration(*existing));
        }

        let slot = Slot::new(self.bindings.len() as u32);
        self.bindings
            .insert(name.to_string(), Binding { slot, kind });
        self.last_declared = Some(kind);
        Ok(slot)
    }

    /// Looks up the binding of `name`.
    pub fn resolve(&self, name: &str) -> Result<Binding, SymbolError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or(SymbolError::UndeclaredVariable)
    }

    /// Kind of the most recently declared variable in the unit.
    pub fn last_declared_kind(&self) -> Option<NumericKind> {
        self.last_declared
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns `(name, binding)` pairs ordered by slot.
    pub fn bindings(&self) -> Vec<(&str, Binding)> {
        let mut entries = self
            .bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), *binding))
            .collect::<Vec<_>>();
        entries.sort_by_key(|(_, binding)| binding.slot);
        entries
    }
}
