use alloc::vec::Vec;

use crate::card::{Card, N_RANKS};

/// One tableau pile, bottom (first dealt) to top (last placed)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Column {
    cards: Vec<Card>,
}

impl From<Vec<Card>> for Column {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl Column {
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// A freshly dealt pile, with only the top card turned up
    #[must_use]
    pub fn dealt(cards: &[Card]) -> Self {
        let mut cards: Vec<Card> = cards.to_vec();
        for c in &mut cards {
            c.set_face_up(false);
        }
        let mut col = Self { cards };
        col.reveal_top();
        col
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn first_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Check the run from `index` to the top: same suit, descending by one.
    /// An empty range or a single card is ordered.
    #[must_use]
    pub fn is_ordered(&self, index: usize) -> bool {
        self.cards
            .get(index..)
            .map_or(true, |run| run.windows(2).all(|w| w[0].go_before(w[1])))
    }

    /// Copy (or take, when `remove` is set) the run from `index` to the top.
    /// Returns `None` when that run is not ordered.
    pub fn detach(&mut self, index: usize, remove: bool) -> Option<Self> {
        if index > self.len() || !self.is_ordered(index) {
            return None;
        }

        Some(if remove {
            self.split_off(index)
        } else {
            Self {
                cards: self.cards[index..].to_vec(),
            }
        })
    }

    // unchecked take, the caller already knows the run shape
    pub(crate) fn split_off(&mut self, index: usize) -> Self {
        Self {
            cards: self.cards.split_off(index),
        }
    }

    pub fn append(&mut self, mut other: Self) {
        self.cards.append(&mut other.cards);
    }

    /// Index of the card `offset` positions below the top (0 is the top card)
    #[must_use]
    pub fn card_index_from_offset(&self, offset: usize) -> Option<usize> {
        self.len().checked_sub(offset + 1)
    }

    /// Turn the top card up, returning whether it already was.
    /// An empty column reports `true`.
    pub fn reveal_top(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(c) => {
                let was_up = c.is_face_up();
                c.set_face_up(true);
                was_up
            }
            None => true,
        }
    }

    pub fn hide_top(&mut self) {
        if let Some(c) = self.cards.last_mut() {
            c.set_face_up(false);
        }
    }

    /// Start of a full king-to-ace run sitting on top, if there is one
    #[must_use]
    pub fn completed_run_start(&self) -> Option<usize> {
        let start = self.len().checked_sub(N_RANKS as usize)?;
        let king = self.cards[start];
        (king.is_king() && king.is_face_up() && self.is_ordered(start)).then_some(start)
    }

    pub(crate) fn set_highlighted(&mut self, from: usize, highlighted: bool) {
        for c in self.cards.iter_mut().skip(from) {
            c.set_highlighted(highlighted);
        }
    }
}
