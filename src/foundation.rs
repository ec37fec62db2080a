use alloc::vec::Vec;

use crate::card::N_RUNS;
use crate::column::Column;

/// Completed king-to-ace runs, most recent last
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Foundation {
    runs: Vec<Column>,
}

impl Foundation {
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn push(&mut self, run: Column) {
        self.runs.push(run);
    }

    pub fn pop(&mut self) -> Option<Column> {
        self.runs.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.runs.len() >= N_RUNS as usize
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Column> {
        self.runs.iter()
    }

    /// Suit of every removed run, in removal order
    pub fn suits(&self) -> impl Iterator<Item = u8> + '_ {
        self.runs
            .iter()
            .filter_map(|run| run.first_card().map(|c| c.suit()))
    }
}
