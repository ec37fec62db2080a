use arrayvec::ArrayVec;

use crate::card::Card;

pub const N_COLUMNS: u8 = 10;
pub const N_STOCK_BATCHES: u8 = 5;
pub const N_STOCK_CARDS: u8 = N_STOCK_BATCHES * N_COLUMNS;

/// One card for every column
pub type Batch = [Card; N_COLUMNS as usize];

/// The undealt reserve. Batches are handed out front to back, the next one
/// to deal sits at the end of the inner vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Stock {
    batches: ArrayVec<Batch, { N_STOCK_BATCHES as usize }>,
}

impl Stock {
    /// Split the cards into batches of ten; `cards[..10]` is dealt first
    #[must_use]
    pub fn new(cards: &[Card; N_STOCK_CARDS as usize]) -> Self {
        let mut batches = ArrayVec::new();
        for chunk in cards.chunks_exact(N_COLUMNS as usize).rev() {
            let mut batch: Batch = core::array::from_fn(|i| chunk[i]);
            for c in &mut batch {
                c.set_face_up(false);
            }
            batches.push(batch);
        }
        Self { batches }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            batches: ArrayVec::new_const(),
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn remaining(&self) -> u8 {
        self.batches.len() as u8
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batches in dealing order
    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter().rev()
    }

    pub fn draw(&mut self) -> Option<Batch> {
        self.batches.pop()
    }

    /// Put a batch back so that it is the next one dealt
    ///
    /// # Panics
    ///
    /// When the stock already holds every batch
    pub fn undraw(&mut self, mut batch: Batch) {
        for c in &mut batch {
            c.set_face_up(false);
        }
        self.batches.push(batch);
    }
}
