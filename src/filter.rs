use crate::error::{AuditError, Result};
use crate::models::Columnar;

/// Progressive filter state for one view: a stack of result snapshots. The
/// active cache is always the top of the stack, so the two can never drift
/// apart. Empty stack means the view is unfiltered.
#[derive(Debug, Default)]
pub struct FilterState<T> {
    history: Vec<Vec<T>>,
}

impl<T: Columnar + Clone> FilterState<T> {
    pub fn new() -> Self {
        Self { history: Vec::new() }
    }

    pub fn is_filtered(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// The currently active result snapshot, if any filter has been applied.
    pub fn cache(&self) -> Option<&[T]> {
        self.history.last().map(|rows| rows.as_slice())
    }

    /// Push the result of a first (store-backed) filter step.
    pub fn push(&mut self, rows: Vec<T>) {
        self.history.push(rows);
    }

    /// Narrow the current cache in memory with another substring predicate.
    /// Only valid once a first filter has run.
    pub fn narrow(&mut self, view: &str, column: &str, needle: &str) -> Result<usize> {
        let idx = T::column_index(column).ok_or_else(|| AuditError::UnknownColumn {
            table: view.to_string(),
            column: column.to_string(),
        })?;
        let cache = self
            .history
            .last()
            .ok_or_else(|| AuditError::NoHistory(view.to_string()))?;
        let narrowed = contains_match(cache, idx, needle);
        let count = narrowed.len();
        self.history.push(narrowed);
        Ok(count)
    }

    /// Discard the most recent filter result and fall back to the one before
    /// it. At least one filtered snapshot always remains; undoing past depth
    /// 1 is an error and leaves the state untouched.
    pub fn undo(&mut self, view: &str) -> Result<&[T]> {
        if self.history.len() <= 1 {
            return Err(AuditError::NoHistory(view.to_string()));
        }
        self.history.pop();
        Ok(self.history.last().unwrap())
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

/// Case-insensitive substring match of `needle` against the text form of one
/// column, over an in-memory snapshot.
pub fn contains_match<T: Columnar + Clone>(rows: &[T], col_idx: usize, needle: &str) -> Vec<T> {
    let needle = needle.to_lowercase();
    rows.iter()
        .filter(|row| row.cell(col_idx).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
