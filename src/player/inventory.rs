use serde::{Deserialize, Serialize};

use crate::shared::*;

/// Unordered bag of resource tokens. Duplicates allowed; only counts matter
/// for crafting, but insertion order decides what `pop` hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<ItemKind>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, kind: ItemKind) {
        self.items.push(kind);
    }

    /// Removes the most recently added token.
    pub fn pop(&mut self) -> Option<ItemKind> {
        self.items.pop()
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|k| **k == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemKind> + '_ {
        self.items.iter().copied()
    }

    /// Whether every `(kind, amount)` in `costs` is covered.
    pub fn covers(&self, costs: &[(ItemKind, usize)]) -> bool {
        costs.iter().all(|&(kind, amount)| self.count(kind) >= amount)
    }

    /// Deducts all of `costs` or nothing. Returns whether it paid.
    pub fn try_consume(&mut self, costs: &[(ItemKind, usize)]) -> bool {
        if !self.covers(costs) {
            return false;
        }
        for &(kind, amount) in costs {
            for _ in 0..amount {
                if let Some(i) = self.items.iter().rposition(|k| *k == kind) {
                    self.items.remove(i);
                }
            }
        }
        true
    }

    /// `(kind, count)` for every kind held, in `ItemKind` order.
    pub fn tally(&self) -> Vec<(ItemKind, usize)> {
        ItemKind::ALL
            .into_iter()
            .map(|kind| (kind, self.count(kind)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<ItemKind> for Inventory {
    fn from_iter<I: IntoIterator<Item = ItemKind>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ItemKind>> for Inventory {
    fn from(items: Vec<ItemKind>) -> Self {
        Self { items }
    }
}
