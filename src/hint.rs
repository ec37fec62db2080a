use alloc::collections::VecDeque;

use crate::column::Column;
use crate::engine::is_valid_placement;
use crate::stock::N_COLUMNS;

/// A legal relocation: the top `count` cards of `from` onto `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub from: u8,
    pub to: u8,
    pub count: u8,
}

/// Every legal relocation of the current table, served round-robin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintList {
    candidates: VecDeque<Candidate>,
}

impl HintList {
    #[must_use]
    pub fn new(columns: &[Column; N_COLUMNS as usize]) -> Self {
        let mut hints = Self::default();
        hints.recompute(columns);
        hints
    }

    /// Rebuild the list. Moves onto an empty column or onto a card of the
    /// moving suit come first, the others follow in discovery order.
    pub fn recompute(&mut self, columns: &[Column; N_COLUMNS as usize]) {
        self.candidates.clear();
        let mut other = VecDeque::new();

        for (i, src) in columns.iter().enumerate() {
            for (j, bottom) in src.iter().enumerate() {
                if !bottom.is_face_up() || !src.is_ordered(j) {
                    continue;
                }

                for (a, dst) in columns.iter().enumerate() {
                    let top = dst.top_card().copied();
                    if i == a || !is_valid_placement(top, *bottom) {
                        continue;
                    }

                    #[allow(clippy::cast_possible_truncation)]
                    let candidate = Candidate {
                        from: i as u8,
                        to: a as u8,
                        count: (src.len() - j) as u8,
                    };

                    if top.map_or(true, |c| c.suit() == bottom.suit()) {
                        self.candidates.push_back(candidate);
                    } else {
                        other.push_back(candidate);
                    }
                }
            }
        }

        self.candidates.append(&mut other);
        log::trace!("{} candidate moves", self.candidates.len());
    }

    /// Take the first candidate and rotate it to the back
    pub fn next(&mut self) -> Option<Candidate> {
        let c = self.candidates.pop_front()?;
        self.candidates.push_back(c);
        Some(c)
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Candidate> {
        self.candidates.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }
}
