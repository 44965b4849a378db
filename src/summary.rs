//! Derived view of the current selection.

use std::fmt;

use crate::selection::SelectionSurface;

/// Separator between numbers in the exported string.
pub const NUMBER_SEPARATOR: &str = ", ";

/// Human-readable lines and the machine-readable number string for the
/// selected entries, both in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: Vec<String>,
    pub numbers: String,
}

impl Summary {
    /// Rebuild the summary from scratch out of `surface`.
    pub fn project(surface: &SelectionSurface) -> Self {
        let mut lines = Vec::new();
        let mut numbers = Vec::new();
        for entry in surface.selected_entries() {
            lines.push(format!("#{}: {}", entry.number, entry.filename));
            numbers.push(entry.number.to_string());
        }
        Self {
            lines,
            numbers: numbers.join(NUMBER_SEPARATOR),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the copy affordance should be offered.
    pub fn export_visible(&self) -> bool {
        !self.is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Selected: (none)");
        }
        writeln!(f, "Selected ({}):", self.lines.len())?;
        for line in &self.lines {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "Numbers: {}", self.numbers)
    }
}
