// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Stable identifier of a row inside a [`Rows`] list.
///
/// Ids are never reused within one list, so an id captured before an
/// asynchronous operation still addresses the same row (or nothing) when the
/// operation completes, no matter how the list changed in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered list whose entries are addressed by [`RowId`] instead of position.
#[derive(Debug, Clone)]
pub struct Rows<T> {
    next: u32,
    items: Vec<(RowId, T)>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            next: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Rows<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value and returns its id.
    pub fn push(&mut self, value: T) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        self.items.push((id, value));
        id
    }

    /// Removes the row with the given id, returning its value if it existed.
    pub fn remove(&mut self, id: RowId) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index).1)
    }

    pub fn get(&self, id: RowId) -> Option<&T> {
        self.items.iter().find(|(a, _)| *a == id).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut T> {
        self.items.iter_mut().find(|(a, _)| *a == id).map(|(_, v)| v)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.position(id).is_some()
    }

    /// Position of the row in display order.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.items.iter().position(|(a, _)| *a == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.items.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowId, &T)> {
        self.items.iter().map(|(id, v)| (*id, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RowId, &mut T)> {
        self.items.iter_mut().map(|(id, v)| (*id, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(_, v)| v)
    }

    /// Keeps only the rows for which the predicate returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.items.retain(|(_, v)| f(v));
    }
}

impl<T> FromIterator<T> for Rows<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut rows = Rows::new();
        for value in iter {
            rows.push(value);
        }
        rows
    }
}
