use alloc::vec::Vec;

/// A reversible change of the table, as kept in the move log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// One stock batch was dealt onto the columns
    Deal,
    /// `count` cards went from column `from` to column `to`. `was_visible` is
    /// the state of the card exposed under them before the move.
    Relocate {
        from: u8,
        to: u8,
        count: u8,
        was_visible: bool,
    },
    /// A completed run left `column` for the foundation
    AutoRemove { column: u8, was_visible: bool },
}

impl Move {
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::AutoRemove { .. })
    }
}

/// Append-only record of applied moves, consumed from the back by undo
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveLog {
    records: Vec<Move>,
}

impl MoveLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, m: Move) {
        self.records.push(m);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.records.pop()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Move> {
        self.records.iter()
    }

    /// Moves the player made, leaving out the automatic removals
    #[must_use]
    pub fn player_moves(&self) -> usize {
        self.records.iter().filter(|m| !m.is_auto()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log() {
        let mut log = MoveLog::new();
        assert_eq!(log.pop(), None);

        log.push(Move::Deal);
        log.push(Move::Relocate {
            from: 1,
            to: 2,
            count: 3,
            was_visible: false,
        });
        log.push(Move::AutoRemove {
            column: 2,
            was_visible: true,
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.player_moves(), 2);
        assert!(log.last().unwrap().is_auto());

        assert!(log.pop().unwrap().is_auto());
        assert!(matches!(log.pop(), Some(Move::Relocate { count: 3, .. })));
        assert_eq!(log.pop(), Some(Move::Deal));
        assert!(log.is_empty());
    }
}
