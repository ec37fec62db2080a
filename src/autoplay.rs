use hashbrown::HashSet;
use log::{debug, trace};

use crate::engine::{Columns, SpiderEngine};

/// What a greedy run achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayStats {
    pub moves: usize,
    pub deals: usize,
    pub won: bool,
}

type Position = (Columns, u8);

fn position(game: &SpiderEngine) -> Position {
    (game.columns().clone(), game.stock_remaining())
}

/// Keeps track of the positions a game has already been through
#[derive(Debug, Default)]
pub struct Visited {
    seen: HashSet<Position>,
}

impl Visited {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the position was seen before
    pub fn insert(&mut self, game: &SpiderEngine) -> bool {
        self.seen.insert(position(game))
    }

    #[must_use]
    pub fn contains(&self, game: &SpiderEngine) -> bool {
        self.seen.contains(&position(game))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Play the first candidate leading to an unseen position, dealing when
/// there is none. Stops on a win, when nothing is left to do, or after
/// `max_moves` actions.
pub fn greedy_play(game: &mut SpiderEngine, max_moves: usize) -> PlayStats {
    let mut stats = PlayStats::default();
    let mut visited = Visited::new();
    visited.insert(game);

    while stats.moves + stats.deals < max_moves && !game.is_won() {
        let next = game.candidates().iter().find_map(|&c| {
            let mut probe = game.clone();
            probe.play(c).ok()?;
            (!visited.contains(&probe)).then_some(probe)
        });

        if let Some(next) = next {
            *game = next;
            stats.moves += 1;
        } else if game.deal().is_ok() {
            stats.deals += 1;
        } else {
            trace!("no fresh move and no deal");
            break;
        }
        visited.insert(game);
    }

    stats.won = game.is_won();
    debug!(
        "greedy play: {} moves, {} deals, won {}",
        stats.moves, stats.deals, stats.won
    );
    stats
}
