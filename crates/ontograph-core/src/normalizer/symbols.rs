//! Class and relation symbol tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Growable bijection between names and dense integer ids.
///
/// Ids are handed out in first-seen order starting at 0 and are never
/// reassigned. Serializes as the list of names in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, inserting it with the next id if unseen.
    pub fn id_or_insert(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i, n.as_str()))
    }
}

impl From<Vec<String>> for SymbolTable {
    fn from(names: Vec<String>) -> Self {
        let mut table = SymbolTable::new();
        for name in &names {
            table.id_or_insert(name);
        }
        table
    }
}

impl From<SymbolTable> for Vec<String> {
    fn from(table: SymbolTable) -> Self {
        table.names
    }
}

/// The class and relation tables of one normalization session.
///
/// Carry a value from one session into the next to keep ids consistent
/// across train/validation/test splits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTables {
    pub classes: SymbolTable,
    pub relations: SymbolTable,
}

/// Where the ids of a merged session ended up.
///
/// `classes[old_id]` is the id in the merged table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRemap {
    pub classes: Vec<usize>,
    pub relations: Vec<usize>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `other` into `self`.
    ///
    /// Names already present keep their ids; new names are appended in
    /// `other`'s id order. Returns the remapping for `other`'s ids.
    pub fn merge_from(&mut self, other: &SymbolTables) -> SymbolRemap {
        SymbolRemap {
            classes: other
                .classes
                .names()
                .iter()
                .map(|n| self.classes.id_or_insert(n))
                .collect(),
            relations: other
                .relations
                .names()
                .iter()
                .map(|n| self.relations.id_or_insert(n))
                .collect(),
        }
    }
}
