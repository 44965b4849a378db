//! Selection state for a gallery.
//!
//! `SelectionSurface` owns the entries in render order and an explicit
//! `number -> selected` map. Every change goes through [`SelectionSurface::apply`]
//! (or the helpers it dispatches to) and yields a freshly projected
//! [`Summary`], so callers never read state back out of rendered output.

use std::collections::HashMap;

use crate::catalog::{Catalog, ImageEntry};
use crate::error::{Error, Result};
use crate::summary::Summary;

/// A user intent against the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle(u32),
    Clear,
    SelectAll,
}

#[derive(Debug, Clone)]
pub struct SelectionSurface {
    entries: Vec<ImageEntry>,
    selected: HashMap<u32, bool>,
}

impl SelectionSurface {
    /// Start with every entry of `catalog` unselected.
    pub fn new(catalog: &Catalog) -> Self {
        Self::from_entries(catalog.entries().to_vec())
    }

    fn from_entries(entries: Vec<ImageEntry>) -> Self {
        let selected = entries.iter().map(|e| (e.number, false)).collect();
        Self { entries, selected }
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Flip the entry numbered `number` and return its new state.
    pub fn toggle(&mut self, number: u32) -> Result<bool> {
        let flag = self
            .selected
            .get_mut(&number)
            .ok_or(Error::UnknownEntry(number))?;
        *flag = !*flag;
        log::debug!("toggled #{} -> {}", number, *flag);
        Ok(*flag)
    }

    pub fn is_selected(&self, number: u32) -> bool {
        self.selected.get(&number).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.values().filter(|s| **s).count()
    }

    pub fn clear(&mut self) {
        self.selected.values_mut().for_each(|s| *s = false);
    }

    pub fn select_all(&mut self) {
        self.selected.values_mut().for_each(|s| *s = true);
    }

    /// Selected entries in render order.
    pub fn selected_entries(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter().filter(|e| self.is_selected(e.number))
    }

    /// Apply `action` and return the recomputed summary.
    ///
    /// On error (unknown number) the state is left untouched.
    pub fn apply(&mut self, action: Action) -> Result<Summary> {
        match action {
            Action::Toggle(number) => {
                self.toggle(number)?;
            }
            Action::Clear => self.clear(),
            Action::SelectAll => self.select_all(),
        }
        Ok(Summary::project(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SelectionSurface {
        SelectionSurface::from_entries(vec![
            ImageEntry::new(1, "a.jpg"),
            ImageEntry::new(2, "b.jpg"),
            ImageEntry::new(3, "c.jpg"),
        ])
    }

    #[test]
    fn starts_unselected() {
        let s = surface();
        assert_eq!(s.selected_count(), 0);
        assert!(!s.is_selected(1));
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut s = surface();
        assert!(s.toggle(2).unwrap());
        assert!(s.is_selected(2));
        assert!(!s.toggle(2).unwrap());
        assert_eq!(s.selected_count(), 0);
    }

    #[test]
    fn unknown_number_is_rejected_without_change() {
        let mut s = surface();
        s.toggle(1).unwrap();
        let err = s.apply(Action::Toggle(9)).unwrap_err();
        assert!(matches!(err, Error::UnknownEntry(9)));
        assert_eq!(s.selected_count(), 1);
    }

    #[test]
    fn selected_entries_follow_render_order() {
        let mut s = SelectionSurface::from_entries(vec![
            ImageEntry::new(5, "e.jpg"),
            ImageEntry::new(2, "b.jpg"),
            ImageEntry::new(9, "i.jpg"),
        ]);
        s.toggle(9).unwrap();
        s.toggle(5).unwrap();
        let numbers: Vec<u32> = s.selected_entries().map(|e| e.number).collect();
        assert_eq!(numbers, vec![5, 9]);
    }

    #[test]
    fn select_all_and_clear() {
        let mut s = surface();
        let all = s.apply(Action::SelectAll).unwrap();
        assert_eq!(all.numbers, "1, 2, 3");
        let none = s.apply(Action::Clear).unwrap();
        assert!(none.is_empty());
        assert!(!none.export_visible());
    }
}
