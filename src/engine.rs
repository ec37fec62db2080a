use core::fmt;

use arrayvec::ArrayVec;
use log::{debug, info};
use static_assertions::const_assert_eq;

use crate::card::{Card, Suits, N_CARDS, N_KINDS, N_RANKS, N_RUNS};
use crate::column::Column;
use crate::foundation::Foundation;
use crate::hint::{Candidate, HintList};
use crate::moves::{Move, MoveLog};
use crate::shuffler::{default_shuffle, CardDeck};
use crate::stock::{Stock, N_COLUMNS, N_STOCK_CARDS};

// the first columns get one card more than the others
const N_LONG_COLUMNS: usize = 4;
const LONG_COLUMN: usize = 6;
const SHORT_COLUMN: usize = 5;

pub const N_TABLEAU_CARDS: u8 = 54;

const_assert_eq!(
    N_TABLEAU_CARDS as usize,
    N_LONG_COLUMNS * LONG_COLUMN + (N_COLUMNS as usize - N_LONG_COLUMNS) * SHORT_COLUMN
);
const_assert_eq!(N_TABLEAU_CARDS + N_STOCK_CARDS, N_CARDS);

pub const START_SCORE: i32 = 500;
pub const MOVE_COST: i32 = 1;
pub const RUN_BONUS: i32 = 100;

pub type Columns = [Column; N_COLUMNS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealBlocked {
    StockEmpty,
    EmptyColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// Dealing is not possible right now
    Blocked(DealBlocked),
    /// The destination top card is not one rank above the moving run
    BadPlacement,
    /// The cards to move are not a same-suit descending run
    NotOrdered,
    FaceDown,
    BadCount,
    SameColumn,
    NothingToUndo,
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked(DealBlocked::StockEmpty) => write!(f, "no cards left to deal"),
            Self::Blocked(DealBlocked::EmptyColumn) => {
                write!(f, "fill every empty column before dealing")
            }
            Self::BadPlacement => write!(f, "the run does not fit on that column"),
            Self::NotOrdered => write!(f, "only a same-suit descending run can be moved"),
            Self::FaceDown => write!(f, "face-down cards cannot be moved"),
            Self::BadCount => write!(f, "no such number of cards in that column"),
            Self::SameColumn => write!(f, "source and destination are the same column"),
            Self::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

pub type MoveResult<T> = core::result::Result<T, InvalidMove>;

/// A run whose bottom card is `bottom` may go onto `top`: an empty column
/// takes anything, otherwise the ranks have to step down by one. Suits are
/// not compared here.
#[must_use]
pub const fn is_valid_placement(top: Option<Card>, bottom: Card) -> bool {
    match top {
        None => true,
        Some(top) => top.rank() == bottom.rank() + 1,
    }
}

const fn pile_size(column: usize) -> usize {
    if column < N_LONG_COLUMNS {
        LONG_COLUMN
    } else {
        SHORT_COLUMN
    }
}

#[derive(Debug, Clone)]
pub struct SpiderEngine {
    suits: Suits,
    columns: Columns,
    stock: Stock,
    foundation: Foundation,
    score: i32,
    log: MoveLog,
    hints: HintList,
}

impl SpiderEngine {
    /// Lay out an already shuffled deck. The first 50 cards become the stock,
    /// the rest is dealt on the columns.
    #[must_use]
    pub fn new(suits: Suits, cards: &CardDeck) -> Self {
        let stock = Stock::new(&core::array::from_fn(|i| cards[i]));

        let mut start = N_STOCK_CARDS as usize;
        let columns: Columns = core::array::from_fn(|i| {
            let end = start + pile_size(i);
            let col = Column::dealt(&cards[start..end]);
            start = end;
            col
        });

        info!("new game with {} suits", suits.count());
        Self::from_parts(suits, columns, stock)
    }

    #[must_use]
    pub fn new_game(suits: Suits, seed: u64) -> Self {
        Self::new(suits, &default_shuffle(suits, seed))
    }

    /// Start over with a new shuffle, keeping the number of suits
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new_game(self.suits, seed);
    }

    /// Any position: fresh score, empty log and foundation
    #[must_use]
    pub fn from_parts(suits: Suits, columns: Columns, stock: Stock) -> Self {
        let hints = HintList::new(&columns);
        Self {
            suits,
            columns,
            stock,
            foundation: Foundation::new(),
            score: START_SCORE,
            log: MoveLog::new(),
            hints,
        }
    }

    #[must_use]
    pub const fn suits(&self) -> Suits {
        self.suits
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    /// # Panics
    ///
    /// When `index` is not a column
    #[must_use]
    pub fn column(&self, index: usize) -> &Column {
        assert_column(index);
        &self.columns[index]
    }

    #[must_use]
    pub const fn stock(&self) -> &Stock {
        &self.stock
    }

    #[must_use]
    pub fn stock_remaining(&self) -> u8 {
        self.stock.remaining()
    }

    #[must_use]
    pub const fn foundation(&self) -> &Foundation {
        &self.foundation
    }

    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub const fn log(&self) -> &MoveLog {
        &self.log
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub const fn candidates(&self) -> &HintList {
        &self.hints
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundation.is_full()
    }

    pub fn can_deal(&self) -> MoveResult<()> {
        if self.stock.is_empty() {
            Err(InvalidMove::Blocked(DealBlocked::StockEmpty))
        } else if self.columns.iter().any(Column::is_empty) {
            Err(InvalidMove::Blocked(DealBlocked::EmptyColumn))
        } else {
            Ok(())
        }
    }

    /// One face-up card from the stock onto every column
    pub fn deal(&mut self) -> MoveResult<()> {
        self.can_deal()?;
        let batch = self
            .stock
            .draw()
            .ok_or(InvalidMove::Blocked(DealBlocked::StockEmpty))?;

        for (col, card) in self.columns.iter_mut().zip(batch) {
            col.push(card.face_up());
        }
        self.score -= MOVE_COST;
        self.log.push(Move::Deal);
        debug!("dealt, {} batches left", self.stock.remaining());

        self.remove_completed_runs();
        self.refresh();
        Ok(())
    }

    /// Detach the run starting at `index` for dragging. The run must be
    /// handed back through [`Self::drop_on`], which either places it or puts
    /// it back where it came from.
    ///
    /// # Panics
    ///
    /// When `column` is not a column
    pub fn pick_up(&mut self, column: usize, index: usize) -> Option<Column> {
        assert_column(column);
        self.take_run(column, index).ok()
    }

    fn take_run(&mut self, column: usize, start: usize) -> MoveResult<Column> {
        let col = &mut self.columns[column];
        let Some(run) = col.cards().get(start..).filter(|run| !run.is_empty()) else {
            return Err(InvalidMove::BadCount);
        };
        if !run.iter().all(|c| c.is_face_up()) {
            return Err(InvalidMove::FaceDown);
        }
        col.detach(start, true).ok_or(InvalidMove::NotOrdered)
    }

    /// Finish a move started by [`Self::pick_up`] on `from`. On failure the
    /// run goes back on `from` and nothing else changes.
    ///
    /// # Panics
    ///
    /// When `from` or `to` is not a column
    pub fn drop_on(&mut self, from: usize, run: Column, to: usize) -> MoveResult<()> {
        assert_column(from);
        assert_column(to);

        let Some(&bottom) = run.first_card() else {
            return Err(InvalidMove::BadCount);
        };

        let checked = if from == to {
            Err(InvalidMove::SameColumn)
        } else if is_valid_placement(self.columns[to].top_card().copied(), bottom) {
            Ok(())
        } else {
            Err(InvalidMove::BadPlacement)
        };

        if let Err(e) = checked {
            self.columns[from].append(run);
            return Err(e);
        }

        #[allow(clippy::cast_possible_truncation)]
        let count = run.len() as u8;
        let was_visible = self.columns[from].reveal_top();
        self.columns[to].append(run);

        #[allow(clippy::cast_possible_truncation)]
        self.log.push(Move::Relocate {
            from: from as u8,
            to: to as u8,
            count,
            was_visible,
        });
        self.score -= MOVE_COST;
        debug!("moved {count} cards from {from} to {to}");

        self.remove_completed_runs();
        self.refresh();
        Ok(())
    }

    /// Move the top `count` cards of `from` onto `to`
    ///
    /// # Panics
    ///
    /// When `from` or `to` is not a column
    pub fn relocate(&mut self, from: usize, to: usize, count: usize) -> MoveResult<()> {
        assert_column(from);
        assert_column(to);
        if from == to {
            return Err(InvalidMove::SameColumn);
        }

        let start = self.columns[from]
            .len()
            .checked_sub(count)
            .filter(|_| count > 0)
            .ok_or(InvalidMove::BadCount)?;

        let run = self.take_run(from, start)?;
        self.drop_on(from, run, to)
    }

    /// Apply a candidate produced by the hint list
    pub fn play(&mut self, c: Candidate) -> MoveResult<()> {
        self.relocate(usize::from(c.from), usize::from(c.to), usize::from(c.count))
    }

    /// Send every finished king-to-ace run to the foundation, returning how
    /// many were removed
    pub fn remove_completed_runs(&mut self) -> usize {
        let mut removed = 0;

        for (i, col) in self.columns.iter_mut().enumerate() {
            while let Some(start) = col.completed_run_start() {
                let run = col.split_off(start);
                let was_visible = col.reveal_top();

                self.foundation.push(run);
                #[allow(clippy::cast_possible_truncation)]
                self.log.push(Move::AutoRemove {
                    column: i as u8,
                    was_visible,
                });
                self.score += RUN_BONUS;
                removed += 1;
                debug!("run completed on column {i}");
            }
        }

        if removed > 0 && self.is_won() {
            info!("game won with score {}", self.score);
        }
        removed
    }

    /// Revert the last player action, together with the runs it completed
    pub fn undo_last(&mut self) -> MoveResult<()> {
        let mut undone = false;

        while let Some(m) = self.log.pop() {
            undone = true;
            match m {
                Move::AutoRemove {
                    column,
                    was_visible,
                } => self.undo_auto_remove(usize::from(column), was_visible),
                Move::Deal => {
                    self.undo_deal();
                    break;
                }
                Move::Relocate {
                    from,
                    to,
                    count,
                    was_visible,
                } => {
                    self.undo_relocate(
                        usize::from(from),
                        usize::from(to),
                        usize::from(count),
                        was_visible,
                    );
                    break;
                }
            }
        }

        if !undone {
            return Err(InvalidMove::NothingToUndo);
        }
        self.refresh();
        Ok(())
    }

    fn undo_auto_remove(&mut self, column: usize, was_visible: bool) {
        let col = &mut self.columns[column];
        if !was_visible {
            col.hide_top();
        }
        if let Some(run) = self.foundation.pop() {
            col.append(run);
        }
        debug!("undo run removal on column {column}");
    }

    fn undo_deal(&mut self) {
        self.score -= MOVE_COST;

        // dealing never flips the card under the dealt one, so popping
        // leaves every column top as it was before the deal
        let mut batch = ArrayVec::<Card, { N_COLUMNS as usize }>::new();
        for col in &mut self.columns {
            if let Some(card) = col.pop() {
                batch.push(card);
            }
        }

        match batch.into_inner() {
            Ok(batch) => self.stock.undraw(batch),
            Err(partial) => {
                debug_assert!(false, "dealt batch is missing cards");
                log::error!("undo deal found only {} cards", partial.len());
            }
        }
        debug!("undo deal, {} batches left", self.stock.remaining());
    }

    fn undo_relocate(&mut self, from: usize, to: usize, count: usize, was_visible: bool) {
        self.score -= MOVE_COST;

        if !was_visible {
            self.columns[from].hide_top();
        }
        let start = self.columns[to].len().saturating_sub(count);
        debug_assert!(self.columns[to].is_ordered(start));
        let run = self.columns[to].split_off(start);
        self.columns[from].append(run);
        debug!("undo move of {count} cards from {from} to {to}");
    }

    /// Next suggested move, cycling through the candidates. The table is
    /// left untouched.
    pub fn hint(&mut self) -> Option<Candidate> {
        self.hints.next()
    }

    /// Highlight the run a hint would move and the card it would land on
    ///
    /// # Panics
    ///
    /// When the candidate names a column that does not exist
    pub fn mark_hint(&mut self, c: &Candidate) {
        self.clear_marks();

        let from = usize::from(c.from);
        let to = usize::from(c.to);
        assert_column(from);
        assert_column(to);

        let start = self.columns[from].len().saturating_sub(usize::from(c.count));
        self.columns[from].set_highlighted(start, true);
        let dst = &mut self.columns[to];
        dst.set_highlighted(dst.len().saturating_sub(1), true);
    }

    pub fn clear_marks(&mut self) {
        for col in &mut self.columns {
            col.set_highlighted(0, false);
        }
    }

    fn refresh(&mut self) {
        self.hints.recompute(&self.columns);
    }

    /// Every card of the combined deck is accounted for exactly once and the
    /// foundation only holds finished runs
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let mut counts = [0u8; N_KINDS as usize];
        let mut total = 0usize;

        let cards = self
            .columns
            .iter()
            .flat_map(Column::iter)
            .chain(self.stock.iter().flatten())
            .chain(self.foundation.iter().flat_map(Column::iter));

        for c in cards {
            counts[usize::from(c.key())] += 1;
            total += 1;
        }

        let runs_ok = self.foundation.len() <= N_RUNS as usize
            && self.foundation.iter().all(|run| {
                run.len() == N_RANKS as usize
                    && run.first_card().is_some_and(|c| c.is_king())
                    && run.is_ordered(0)
            });

        let counts_ok = counts.iter().enumerate().all(|(key, &n)| {
            #[allow(clippy::cast_possible_truncation)]
            let suit = key as u8 / N_RANKS;
            let expected = if suit < self.suits.count() {
                self.suits.packs()
            } else {
                0
            };
            n == expected
        });

        total == N_CARDS as usize && runs_ok && counts_ok
    }
}

fn assert_column(index: usize) {
    assert!(
        index < N_COLUMNS as usize,
        "column {index} out of range (0..{N_COLUMNS})"
    );
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use rand::prelude::*;

    use super::*;
    use crate::card::{ACE_RANK, KING_RANK};

    fn run(suit: u8, from: u8, to: u8) -> Vec<Card> {
        (to..=from).rev().map(|r| Card::new(r, suit).face_up()).collect()
    }

    fn table(piles: Vec<Vec<Card>>) -> Columns {
        let mut piles = piles.into_iter();
        core::array::from_fn(|_| piles.next().map(Column::from).unwrap_or_default())
    }

    #[test]
    fn test_new_game_layout() {
        for suits in [Suits::One, Suits::Two, Suits::Four] {
            let game = SpiderEngine::new_game(suits, 7);
            assert!(game.is_valid());
            assert_eq!(game.stock_remaining(), 5);
            assert_eq!(game.score(), START_SCORE);
            assert_eq!(game.move_count(), 0);
            assert!(game.foundation().is_empty());

            for (i, col) in game.columns().iter().enumerate() {
                assert_eq!(col.len(), if i < 4 { 6 } else { 5 });
                let (top, rest) = col.cards().split_last().unwrap();
                assert!(top.is_face_up());
                assert!(rest.iter().all(|c| !c.is_face_up()));
            }

            let on_table: usize = game.columns().iter().map(Column::len).sum();
            assert_eq!(on_table, N_TABLEAU_CARDS as usize);
        }
    }

    #[test]
    fn test_valid_placement() {
        let nine = Card::new(9, 0);
        assert!(is_valid_placement(None, nine));
        assert!(is_valid_placement(Some(Card::new(10, 3)), nine));
        assert!(is_valid_placement(Some(Card::new(10, 0)), nine));
        assert!(!is_valid_placement(Some(Card::new(9, 0)), nine));
        assert!(!is_valid_placement(Some(Card::new(8, 0)), nine));
        assert!(!is_valid_placement(Some(Card::new(ACE_RANK, 0)), Card::new(KING_RANK, 0)));
    }

    #[test]
    fn test_relocate_and_undo() {
        let mut cols = table(vec![
            vec![Card::new(2, 1), Card::new(7, 0).face_up(), Card::new(6, 0).face_up()],
            vec![Card::new(8, 2).face_up()],
        ]);
        cols[2].push(Card::new(3, 3).face_up());
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());
        let before = game.columns().clone();

        game.relocate(0, 1, 2).unwrap();
        assert_eq!(game.column(0).len(), 1);
        assert!(game.column(0).top_card().unwrap().is_face_up());
        assert_eq!(game.column(1).len(), 3);
        assert_eq!(game.score(), START_SCORE - 1);
        assert_eq!(
            game.log().last(),
            Some(&Move::Relocate {
                from: 0,
                to: 1,
                count: 2,
                was_visible: false
            })
        );

        game.undo_last().unwrap();
        assert_eq!(game.columns(), &before);
        assert_eq!(game.score(), START_SCORE - 2);
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_rejected_moves_change_nothing() {
        let cols = table(vec![
            vec![Card::new(5, 0), Card::new(7, 0).face_up(), Card::new(6, 1).face_up()],
            vec![Card::new(9, 2).face_up()],
            vec![Card::new(12, 2)],
        ]);
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());
        let before = game.columns().clone();

        assert_eq!(game.relocate(0, 1, 1), Err(InvalidMove::BadPlacement));
        assert_eq!(game.relocate(0, 1, 2), Err(InvalidMove::NotOrdered));
        assert_eq!(game.relocate(0, 1, 3), Err(InvalidMove::FaceDown));
        assert_eq!(game.relocate(0, 1, 4), Err(InvalidMove::BadCount));
        assert_eq!(game.relocate(0, 1, 0), Err(InvalidMove::BadCount));
        assert_eq!(game.relocate(0, 0, 1), Err(InvalidMove::SameColumn));
        assert_eq!(game.relocate(2, 3, 1), Err(InvalidMove::FaceDown));
        assert_eq!(game.relocate(3, 4, 1), Err(InvalidMove::BadCount));

        assert_eq!(game.columns(), &before);
        assert_eq!(game.score(), START_SCORE);
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_pick_up_and_put_back() {
        let cols = table(vec![
            vec![Card::new(3, 0), Card::new(7, 0).face_up(), Card::new(6, 0).face_up()],
            vec![Card::new(4, 2).face_up()],
        ]);
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());
        let before = game.columns().clone();

        let run = game.pick_up(0, 1).unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(game.column(0).len(), 1);

        assert_eq!(game.drop_on(0, run, 1), Err(InvalidMove::BadPlacement));
        assert_eq!(game.columns(), &before);
        assert_eq!(game.score(), START_SCORE);

        assert!(game.pick_up(0, 0).is_none());
        assert_eq!(game.columns(), &before);

        let run = game.pick_up(0, 2).unwrap();
        game.drop_on(0, run, 5).unwrap();
        assert_eq!(game.column(5).len(), 1);
        assert_eq!(game.score(), START_SCORE - 1);
    }

    #[test]
    #[should_panic]
    fn test_bad_column_panics() {
        let mut game = SpiderEngine::new_game(Suits::One, 0);
        let _ = game.relocate(0, 10, 1);
    }

    #[test]
    fn test_completion_reveals_and_scores() {
        let mut pile = vec![Card::new(4, 1)];
        pile.extend(run(0, KING_RANK, 2));
        let cols = table(vec![
            pile,
            vec![Card::new(2, 2).face_up(), Card::new(ACE_RANK, 0).face_up()],
        ]);
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());

        game.relocate(1, 0, 1).unwrap();

        assert_eq!(game.foundation().len(), 1);
        assert_eq!(game.column(0).len(), 1);
        assert!(game.column(0).top_card().unwrap().is_face_up());
        assert_eq!(game.score(), START_SCORE - 1 + RUN_BONUS);
        assert_eq!(game.move_count(), 2);
        assert_eq!(
            game.log().last(),
            Some(&Move::AutoRemove {
                column: 0,
                was_visible: false
            })
        );

        // undo walks through the removal and the move that caused it
        game.undo_last().unwrap();
        assert!(game.foundation().is_empty());
        assert_eq!(game.column(0).len(), 13);
        assert!(!game.column(0).first_card().unwrap().is_face_up());
        assert_eq!(game.column(1).len(), 2);
        assert_eq!(game.score(), START_SCORE - 2 + RUN_BONUS);
        assert!(game.log().is_empty());
        assert_eq!(game.undo_last(), Err(InvalidMove::NothingToUndo));
    }

    #[test]
    fn test_completion_scans_every_column() {
        let cols = table(vec![run(0, KING_RANK, ACE_RANK), vec![], run(1, KING_RANK, ACE_RANK)]);
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());

        assert_eq!(game.remove_completed_runs(), 2);
        assert_eq!(game.foundation().len(), 2);
        assert_eq!(game.score(), START_SCORE + 2 * RUN_BONUS);
        assert_eq!(game.foundation().suits().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(game.remove_completed_runs(), 0);
    }

    #[test]
    fn test_deal_and_undo() {
        let mut game = SpiderEngine::new_game(Suits::Two, 3);
        let columns = game.columns().clone();
        let stock = game.stock().clone();

        game.deal().unwrap();
        assert_eq!(game.stock_remaining(), 4);
        assert_eq!(game.score(), START_SCORE - 1);
        for (old, new) in columns.iter().zip(game.columns()) {
            assert_eq!(new.len(), old.len() + 1);
            assert!(new.top_card().unwrap().is_face_up());
        }

        game.undo_last().unwrap();
        assert_eq!(game.columns(), &columns);
        assert_eq!(game.stock(), &stock);
        assert_eq!(game.score(), START_SCORE - 2);
        assert!(game.is_valid());
    }

    #[test]
    fn test_deal_completing_two_runs_and_undo() {
        // spades over a face-down card on column 0, hearts alone on column 7
        let mut cols: Columns = core::array::from_fn(|_| vec![Card::new(5, 2).face_up()].into());
        cols[0] = vec![Card::new(4, 1)].into();
        cols[0].append(run(0, KING_RANK, 2).into());
        cols[7] = run(1, KING_RANK, 2).into();

        let stock_cards = core::array::from_fn(|i| match i {
            0 => Card::new(ACE_RANK, 0),
            7 => Card::new(ACE_RANK, 1),
            _ => Card::new(9, 3),
        });
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::new(&stock_cards));
        let columns = game.columns().clone();
        let stock = game.stock().clone();

        game.deal().unwrap();
        assert_eq!(game.foundation().len(), 2);
        assert_eq!(game.score(), START_SCORE - MOVE_COST + 2 * RUN_BONUS);
        assert!(game.column(0).top_card().unwrap().is_face_up());
        assert!(game.column(7).is_empty());
        assert_eq!(
            game.log().iter().copied().collect::<Vec<_>>(),
            vec![
                Move::Deal,
                Move::AutoRemove {
                    column: 0,
                    was_visible: false
                },
                Move::AutoRemove {
                    column: 7,
                    was_visible: true
                },
            ]
        );

        game.undo_last().unwrap();
        assert_eq!(game.columns(), &columns);
        assert_eq!(game.stock(), &stock);
        assert!(game.foundation().is_empty());
        assert!(game.log().is_empty());
        assert_eq!(game.score(), START_SCORE - 2 * MOVE_COST + 2 * RUN_BONUS);
    }

    #[test]
    fn test_undo_deal_keeps_face_down_tops() {
        let cols: Columns = core::array::from_fn(|i| {
            let card = Card::new(ACE_RANK, 0);
            vec![if i % 2 == 0 { card } else { card.face_up() }].into()
        });
        let fresh = SpiderEngine::new_game(Suits::One, 6);
        let mut game = SpiderEngine::from_parts(Suits::One, cols, fresh.stock().clone());
        let columns = game.columns().clone();

        game.deal().unwrap();
        game.undo_last().unwrap();

        assert_eq!(game.columns(), &columns);
        assert!(!game.column(0).top_card().unwrap().is_face_up());
        assert!(game.column(1).top_card().unwrap().is_face_up());
        assert_eq!(game.stock(), fresh.stock());
    }

    #[test]
    fn test_deal_blocked() {
        let mut game = SpiderEngine::new_game(Suits::One, 11);
        for _ in 0..5 {
            game.deal().unwrap();
        }
        let columns = game.columns().clone();
        let score = game.score();

        assert_eq!(game.deal(), Err(InvalidMove::Blocked(DealBlocked::StockEmpty)));
        assert_eq!(game.columns(), &columns);
        assert_eq!(game.score(), score);

        let fresh = SpiderEngine::new_game(Suits::One, 4);
        let mut cols = fresh.columns().clone();
        let hole = core::mem::take(&mut cols[3]);
        cols[4].append(hole);
        let mut holey = SpiderEngine::from_parts(Suits::One, cols, fresh.stock().clone());
        assert_eq!(holey.deal(), Err(InvalidMove::Blocked(DealBlocked::EmptyColumn)));
        assert_eq!(holey.stock_remaining(), 5);
        assert!(holey.log().is_empty());
    }

    #[test]
    fn test_hint_does_not_touch_table() {
        let mut game = SpiderEngine::new_game(Suits::Four, 21);
        let columns = game.columns().clone();
        let all: Vec<Candidate> = game.candidates().iter().copied().collect();

        let mut seen = Vec::new();
        for _ in 0..all.len() {
            seen.push(game.hint().unwrap());
        }
        assert_eq!(seen, all);
        assert_eq!(game.columns(), &columns);
        assert_eq!(game.score(), START_SCORE);
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_mark_hint() {
        let cols = table(vec![
            vec![Card::new(6, 0).face_up(), Card::new(5, 0).face_up()],
            vec![Card::new(7, 1).face_up()],
        ]);
        let mut game = SpiderEngine::from_parts(Suits::Four, cols, Stock::empty());
        let c = Candidate {
            from: 0,
            to: 1,
            count: 2,
        };
        game.mark_hint(&c);
        assert!(game.column(0).iter().all(|c| c.is_highlighted()));
        assert!(game.column(1).top_card().unwrap().is_highlighted());

        game.clear_marks();
        assert!(game
            .columns()
            .iter()
            .flat_map(Column::iter)
            .all(|c| !c.is_highlighted()));
    }

    #[test]
    fn test_random_play_stays_valid() {
        let mut rng = StdRng::seed_from_u64(14);

        for seed in 0..20 {
            let mut game = SpiderEngine::new_game(Suits::Two, seed);
            for _ in 0..200 {
                let moves: Vec<Candidate> = game.candidates().iter().copied().collect();
                let res = match moves.choose(&mut rng) {
                    Some(&c) if rng.gen_ratio(9, 10) => game.play(c),
                    _ => game.deal(),
                };
                if res.is_err() && game.undo_last().is_err() {
                    break;
                }
                assert!(game.is_valid());
            }
        }
    }
}
