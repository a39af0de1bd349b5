//! Storage contents component.
//!
//! A [`Storage`] holds a list of item stacks. Stacks of the same def are
//! merged, and a stack that drops to zero is removed, so `len() == 0` exactly
//! when nothing is held.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub def: String,
    pub count: u32,
}

impl ItemStack {
    pub fn new(def: impl Into<String>, count: u32) -> Self {
        ItemStack {
            def: def.into(),
            count,
        }
    }
}

/// Storage building contents.
#[derive(Component, Debug, Clone, Default)]
pub struct Storage {
    /// Display name used in logs and saves.
    pub label: String,
    held: Vec<ItemStack>,
}

impl Storage {
    pub fn new(label: impl Into<String>) -> Self {
        Storage {
            label: label.into(),
            held: Vec::new(),
        }
    }

    /// Build a storage already holding `stacks`. Empty stacks are dropped.
    pub fn with_stacks(label: impl Into<String>, stacks: Vec<ItemStack>) -> Self {
        let mut storage = Storage::new(label);
        for stack in stacks {
            storage.add(stack.def, stack.count);
        }
        storage
    }

    /// Add `count` items of `def`, merging into an existing stack if present.
    pub fn add(&mut self, def: impl Into<String>, count: u32) {
        if count == 0 {
            return;
        }
        let def = def.into();
        match self.held.iter_mut().find(|s| s.def == def) {
            Some(stack) => stack.count = stack.count.saturating_add(count),
            None => self.held.push(ItemStack { def, count }),
        }
    }

    /// Remove up to `count` items of `def`. Returns how many were removed.
    pub fn remove(&mut self, def: &str, count: u32) -> u32 {
        let Some(index) = self.held.iter().position(|s| s.def == def) else {
            return 0;
        };
        self.take_from(index, count)
    }

    /// Remove up to `count` items from the first stack, whatever its def.
    pub fn remove_any(&mut self, count: u32) -> u32 {
        if self.held.is_empty() {
            return 0;
        }
        self.take_from(0, count)
    }

    fn take_from(&mut self, index: usize, count: u32) -> u32 {
        let stack = &mut self.held[index];
        let taken = stack.count.min(count);
        stack.count -= taken;
        if stack.count == 0 {
            self.held.remove(index);
        }
        taken
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Number of held stacks.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Total item count across stacks.
    pub fn total_count(&self) -> u32 {
        self.held.iter().map(|s| s.count).sum()
    }

    pub fn count(&self, def: &str) -> u32 {
        self.held
            .iter()
            .find(|s| s.def == def)
            .map_or(0, |s| s.count)
    }

    pub fn held(&self) -> &[ItemStack] {
        &self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_same_def() {
        let mut storage = Storage::new("bowl");
        storage.add("kibble", 3);
        storage.add("kibble", 2);
        storage.add("meat", 1);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.count("kibble"), 5);
        assert_eq!(storage.total_count(), 6);
    }

    #[test]
    fn add_zero_keeps_storage_empty() {
        let mut storage = Storage::new("bowl");
        storage.add("kibble", 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn remove_drops_exhausted_stack() {
        let mut storage = Storage::with_stacks("bowl", vec![ItemStack::new("kibble", 2)]);
        assert_eq!(storage.remove("kibble", 5), 2);
        assert!(storage.is_empty());
        assert_eq!(storage.remove("kibble", 1), 0);
    }

    #[test]
    fn remove_any_takes_from_first_stack() {
        let mut storage = Storage::with_stacks(
            "bowl",
            vec![ItemStack::new("kibble", 1), ItemStack::new("meat", 4)],
        );
        assert_eq!(storage.remove_any(1), 1);
        assert_eq!(storage.held(), &[ItemStack::new("meat", 4)]);
    }

    #[test]
    fn with_stacks_skips_empty_stacks() {
        let storage = Storage::with_stacks("bowl", vec![ItemStack::new("kibble", 0)]);
        assert!(storage.is_empty());
    }
}
