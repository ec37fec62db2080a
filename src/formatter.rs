use core::fmt;

use crate::card::{Card, N_RANKS, N_SUITS};
use crate::column::Column;
use crate::engine::SpiderEngine;
use crate::hint::Candidate;
use crate::moves::Move;

pub const SYMBOLS: [&str; N_SUITS as usize] = ["♠", "♥", "♣", "♦"];
pub const LETTERS: [char; N_SUITS as usize] = ['S', 'H', 'C', 'D'];
pub const NUMBERS: [&str; N_RANKS as usize] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rank, suit) = self.split();
        write!(
            f,
            "{}{}",
            NUMBERS[usize::from(rank - 1)],
            SYMBOLS[usize::from(suit)]
        )
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x {}▸{}", self.count, self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Deal => write!(f, "deal"),
            Self::Relocate {
                from, to, count, ..
            } => write!(f, "{count}x {from}▸{to}"),
            Self::AutoRemove { column, .. } => write!(f, "run off {column}"),
        }
    }
}

/// Quoted card code such as `"10H"`, lowercase when the card is face down
pub struct JsonCard(pub Card);

impl fmt::Display for JsonCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rank, suit) = self.0.split();
        let s = LETTERS[usize::from(suit)];
        write!(
            f,
            r#""{}{}""#,
            NUMBERS[usize::from(rank - 1)],
            if self.0.is_face_up() {
                s
            } else {
                s.to_ascii_lowercase()
            }
        )
    }
}

fn write_cards<'a>(
    f: &mut fmt::Formatter<'_>,
    cards: impl Iterator<Item = &'a Card>,
) -> fmt::Result {
    write!(f, "[")?;
    for (idx, c) in cards.enumerate() {
        if idx != 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", JsonCard(*c))?;
    }
    write!(f, "]")
}

fn write_columns<'a>(
    f: &mut fmt::Formatter<'_>,
    columns: impl Iterator<Item = &'a Column>,
) -> fmt::Result {
    write!(f, "[")?;
    for (idx, col) in columns.enumerate() {
        if idx != 0 {
            write!(f, ",")?;
        }
        write_cards(f, col.iter())?;
    }
    write!(f, "]")
}

/// The whole table as a JSON object, for saving and for other tools
pub struct JsonSnapshot<'a>(pub &'a SpiderEngine);

impl fmt::Display for JsonSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.0;
        writeln!(
            f,
            r#"{{"suits": {}, "score": {}, "moves": {},"#,
            game.suits().count(),
            game.score(),
            game.move_count()
        )?;

        write!(f, r#""stock": ["#)?;
        for (idx, batch) in game.stock().iter().enumerate() {
            if idx != 0 {
                write!(f, ",")?;
            }
            write_cards(f, batch.iter())?;
        }
        writeln!(f, "],")?;

        write!(f, r#""foundation": "#)?;
        write_columns(f, game.foundation().iter())?;
        writeln!(f, ",")?;

        write!(f, r#""tableau": "#)?;
        write_columns(f, game.columns().iter())?;
        write!(f, "}}")
    }
}
