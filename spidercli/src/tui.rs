use std::sync::OnceLock;

use colored::{Color, ColoredString, Colorize};
use spiderbot::card::{Card, N_KINDS, N_RANKS, N_SUITS};
use spiderbot::column::Column;
use spiderbot::engine::SpiderEngine;
use spiderbot::formatter::{NUMBERS, SYMBOLS};

pub(crate) const COLOR: [Color; N_SUITS as usize] =
    [Color::Black, Color::Red, Color::Black, Color::Red];

/// Card faces, their highlighted variants and the card back, rendered once
/// per process
pub(crate) struct Assets {
    faces: Vec<String>,
    marked: Vec<String>,
    back: String,
}

static ASSETS: OnceLock<Assets> = OnceLock::new();

fn labels() -> impl Iterator<Item = (String, usize)> {
    (0..N_SUITS as usize).flat_map(|suit| {
        (0..N_RANKS as usize)
            .map(move |rank| (format!("{:>2}{}", NUMBERS[rank], SYMBOLS[suit]), suit))
    })
}

impl Assets {
    fn build() -> Self {
        log::debug!("rendering {N_KINDS} card faces");
        let faces = labels()
            .map(|(label, suit)| label.on_white().color(COLOR[suit]).to_string())
            .collect();
        let marked = labels()
            .map(|(label, _)| label.black().on_yellow().to_string())
            .collect();
        Self {
            faces,
            marked,
            back: "###".on_blue().to_string(),
        }
    }

    pub(crate) fn face(&self, card: Card) -> &str {
        let set = if card.is_highlighted() {
            &self.marked
        } else {
            &self.faces
        };
        &set[usize::from(card.key())]
    }

    pub(crate) fn back(&self) -> &str {
        &self.back
    }
}

/// Build the card faces on first use; later calls hand back the same set
pub(crate) fn load_assets() -> &'static Assets {
    ASSETS.get_or_init(Assets::build)
}

fn cell(card: &Card) -> &'static str {
    let assets = load_assets();
    if card.is_face_up() {
        assets.face(*card)
    } else {
        assets.back()
    }
}

fn status(game: &SpiderEngine) -> ColoredString {
    format!(
        "score {}  moves {} ({} played)  stock {}  runs {}",
        game.score(),
        game.move_count(),
        game.log().player_moves(),
        game.stock_remaining(),
        game.foundation().len()
    )
    .bold()
}

pub(crate) fn print_columns(columns: &[Column]) {
    for i in 0..columns.len() {
        print!("{i:>3}\t");
    }
    println!();

    let height = columns.iter().map(Column::len).max().unwrap_or(0);
    for row in 0..height {
        for col in columns {
            match col.get(row) {
                Some(c) => print!("{}\t", cell(c)),
                None => print!("   \t"),
            }
        }
        println!();
    }
}

pub(crate) fn print_game(game: &SpiderEngine) {
    println!("{}", status(game));

    // removed runs, by the suit of their king
    for run in game.foundation().iter() {
        if let Some(king) = run.first_card() {
            print!("{} ", cell(king));
        }
    }
    if !game.foundation().is_empty() {
        println!();
    }

    print_columns(game.columns());
}
