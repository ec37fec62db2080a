use core::fmt;

use static_assertions::const_assert_eq;

pub const N_SUITS: u8 = 4;
pub const N_RANKS: u8 = 13;
pub const ACE_RANK: u8 = 1;
pub const KING_RANK: u8 = N_RANKS;

// every game is played with 104 cards, whatever the number of suits
pub const N_RUNS: u8 = 8;
pub const N_CARDS: u8 = N_RUNS * N_RANKS;

// number of distinct (suit, rank) pairs
pub const N_KINDS: u8 = N_SUITS * N_RANKS;

const_assert_eq!(N_CARDS, 104);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: u8,
    suit: u8,
    face_up: bool,
    highlighted: bool,
}

impl Card {
    #[must_use]
    pub const fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank >= ACE_RANK && rank <= KING_RANK && suit < N_SUITS);
        Self {
            rank,
            suit,
            face_up: false,
            highlighted: false,
        }
    }

    #[must_use]
    pub const fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn suit(self) -> u8 {
        self.suit
    }

    #[must_use]
    pub const fn split(self) -> (u8, u8) {
        (self.rank, self.suit)
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        self.rank == KING_RANK
    }

    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.rank == ACE_RANK
    }

    #[must_use]
    pub const fn is_face_up(self) -> bool {
        self.face_up
    }

    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    #[must_use]
    pub const fn is_highlighted(self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Dense index in `0..N_KINDS`, equal for every copy of the same card
    #[must_use]
    pub const fn key(self) -> u8 {
        self.suit * N_RANKS + self.rank - 1
    }

    /// Same suit and rank, regardless of the face and highlight flags
    #[must_use]
    pub const fn same_kind(self, other: Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }

    /// `other` can sit right on top of `self` inside a movable run
    #[must_use]
    pub const fn go_before(self, other: Self) -> bool {
        self.suit == other.suit && self.rank == other.rank + 1
    }
}

/// Number of suits a game is dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suits {
    One,
    #[default]
    Two,
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSuits(pub u8);

impl fmt::Display for InvalidSuits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} suits is not a playable game (use 1, 2 or 4)", self.0)
    }
}

impl Suits {
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    /// How many copies of every card the combined deck holds
    #[must_use]
    pub const fn packs(self) -> u8 {
        N_RUNS / self.count()
    }
}

impl TryFrom<u8> for Suits {
    type Error = InvalidSuits;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(InvalidSuits(other)),
        }
    }
}
