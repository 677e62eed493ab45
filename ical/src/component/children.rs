// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered children of a component.

use crate::component::Component;
use crate::property::Property;

/// Stable identity of a child within one [`Children`] list.
///
/// Ids survive insertions and removals of other children, and are copied
/// along with the list when a component is cloned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildId(u32);

/// A property or a nested component.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Property line
    Property(Property),
    /// Nested `BEGIN`/`END` block
    Component(Component),
}

impl Child {
    /// The property, if this child is one.
    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Child::Property(p) => Some(p),
            Child::Component(_) => None,
        }
    }

    /// The component, if this child is one.
    #[must_use]
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Child::Component(c) => Some(c),
            Child::Property(_) => None,
        }
    }
}

impl From<Property> for Child {
    fn from(p: Property) -> Self {
        Child::Property(p)
    }
}

impl From<Component> for Child {
    fn from(c: Component) -> Self {
        Child::Component(c)
    }
}

/// Properties and sub-components in output order.
///
/// Every mutation goes through this list, so the order written out is
/// always the order of the list and nothing can be left behind.
#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: Vec<(ChildId, Child)>,
    next_id: u32,
}

impl Children {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a child.
    pub fn push(&mut self, child: impl Into<Child>) -> ChildId {
        let id = self.allocate();
        self.entries.push((id, child.into()));
        id
    }

    /// Insert a child at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, child: impl Into<Child>) -> ChildId {
        let id = self.allocate();
        let index = index.min(self.entries.len());
        self.entries.insert(index, (id, child.into()));
        id
    }

    /// Position of the child in the list.
    #[must_use]
    pub fn position(&self, id: ChildId) -> Option<usize> {
        self.entries.iter().position(|(i, _)| *i == id)
    }

    /// The child with the given id.
    #[must_use]
    pub fn get(&self, id: ChildId) -> Option<&Child> {
        self.entries
            .iter()
            .find_map(|(i, c)| (*i == id).then_some(c))
    }

    /// The child with the given id, mutably.
    pub fn get_mut(&mut self, id: ChildId) -> Option<&mut Child> {
        self.entries
            .iter_mut()
            .find_map(|(i, c)| (*i == id).then_some(c))
    }

    /// Replace the child in place, keeping its position and id, or remove it
    /// when `child` is `None`. Returns the previous child.
    pub fn replace(&mut self, id: ChildId, child: Option<Child>) -> Option<Child> {
        let index = self.position(id)?;
        match child {
            Some(child) => {
                let slot = self.entries.get_mut(index)?;
                Some(std::mem::replace(&mut slot.1, child))
            }
            None => Some(self.entries.remove(index).1),
        }
    }

    /// Remove the child with the given id.
    pub fn remove(&mut self, id: ChildId) -> Option<Child> {
        self.replace(id, None)
    }

    /// Keep only the children for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&Child) -> bool) {
        self.entries.retain(|(_, c)| keep(c));
    }

    /// Children with their ids, in order.
    pub fn iter(&self) -> impl Iterator<Item = (ChildId, &Child)> {
        self.entries.iter().map(|(i, c)| (*i, c))
    }

    /// Children with their ids, in order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChildId, &mut Child)> {
        self.entries.iter_mut().map(|(i, c)| (*i, c))
    }

    fn allocate(&mut self) -> ChildId {
        let id = ChildId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl PartialEq for Children {
    /// Two lists are equal when their children are, in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((_, a), (_, b))| a == b)
    }
}
