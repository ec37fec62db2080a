mod logger;
mod tui;

use std::io::{BufRead, Write};
use std::time::Instant;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::prelude::*;
use spiderbot::autoplay::greedy_play;
use spiderbot::card::Suits;
use spiderbot::engine::{MoveResult, SpiderEngine};
use spiderbot::formatter::JsonSnapshot;
use spiderbot::hint::Candidate;
use spiderbot::shuffler::{self, CardDeck};

use crate::tui::{load_assets, print_game};

#[derive(ValueEnum, Clone, Copy)]
pub enum SeedType {
    /// Standard rng shuffle
    Default,
    /// Mersenne Twister Fisher-Yates
    Mt,
    /// Random pair swaps
    Swap,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuitsArg {
    One,
    Two,
    Four,
}

impl From<SuitsArg> for Suits {
    fn from(s: SuitsArg) -> Self {
        match s {
            SuitsArg::One => Self::One,
            SuitsArg::Two => Self::Two,
            SuitsArg::Four => Self::Four,
        }
    }
}

#[derive(Args, Clone, Copy)]
pub struct Seed {
    #[arg(value_enum, default_value_t = SeedType::Default)]
    seed_type: SeedType,
    #[arg(default_value_t = 0)]
    seed: u64,
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            match self.seed_type {
                SeedType::Default => "D",
                SeedType::Mt => "M",
                SeedType::Swap => "S",
            },
            self.seed
        )
    }
}

impl Seed {
    pub const fn increase(self, step: u64) -> Self {
        Self {
            seed_type: self.seed_type,
            seed: self.seed.wrapping_add(step),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub fn shuffle(suits: Suits, s: &Seed) -> CardDeck {
    let seed = s.seed;
    match s.seed_type {
        SeedType::Default => shuffler::default_shuffle(suits, seed),
        SeedType::Mt => shuffler::mt_shuffle(suits, seed as u32),
        SeedType::Swap => shuffler::swap_shuffle(suits, seed as u32),
    }
}

fn new_game(suits: Suits, seed: &Seed) -> SpiderEngine {
    SpiderEngine::new(suits, &shuffle(suits, seed))
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move { from: usize, to: usize, count: usize },
    Deal,
    Undo,
    Hint,
    New,
    Save,
    Log,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let cmd = match parts.next()? {
        "m" => {
            let mut num = || parts.next()?.parse::<usize>().ok();
            Command::Move {
                from: num()?,
                to: num()?,
                count: num()?,
            }
        }
        "d" => Command::Deal,
        "u" => Command::Undo,
        "h" => Command::Hint,
        "n" => Command::New,
        "s" => Command::Save,
        "l" => Command::Log,
        "q" => Command::Quit,
        _ => return None,
    };
    parts.next().is_none().then_some(cmd)
}

fn report(res: MoveResult<()>) {
    if let Err(e) = res {
        println!("{}", e.to_string().red());
    }
}

fn history(game: &SpiderEngine) -> String {
    game.log()
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}.{m}", i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

fn game_loop(suits: Suits, seed: &Seed) {
    let mut seed = *seed;
    let mut game = new_game(suits, &seed);
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print_game(&game);
        if game.is_won() {
            println!("{}", format!("Won with {} points!", game.score()).green());
        }
        print!("m <from> <to> <count> | d | u | h | n | s | l | q > ");
        if std::io::stdout().flush().is_err() {
            return;
        }

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let Some(cmd) = parse_command(&line) else {
            println!("{}", "Invalid command".red());
            continue;
        };

        game.clear_marks();
        match cmd {
            Command::Move { from, to, count } => {
                if from >= game.columns().len() || to >= game.columns().len() {
                    println!("{}", "No such column".red());
                } else {
                    report(game.relocate(from, to, count));
                }
            }
            Command::Deal => report(game.deal()),
            Command::Undo => report(game.undo_last()),
            Command::Hint => match game.hint() {
                Some(c) => {
                    println!("Hint: {c}");
                    game.mark_hint(&c);
                }
                None => println!("{}", "No moves, try dealing".yellow()),
            },
            Command::New => {
                seed = seed.increase(1);
                println!("New game {seed}");
                game = new_game(suits, &seed);
            }
            Command::Save => println!("{}", JsonSnapshot(&game)),
            Command::Log => println!("{}", history(&game)),
            Command::Quit => return,
        }
    }
}

/// Random candidates, dealing now and then, until stuck or `max_moves` is
/// reached. Returns the number of actions applied.
fn random_play<R: Rng>(game: &mut SpiderEngine, rng: &mut R, max_moves: usize) -> usize {
    let mut moves = Vec::<Candidate>::new();
    let mut done = 0;

    while done < max_moves && !game.is_won() {
        moves.clear();
        moves.extend(game.candidates().iter().copied());

        let res = match moves.choose(rng) {
            Some(&m) if rng.gen_ratio(9, 10) => game.play(m),
            _ => game.deal(),
        };
        if res.is_err() {
            break;
        }
        done += 1;
    }
    done
}

fn benchmark(suits: Suits, seed: &Seed, games: u64, max_moves: usize, random: bool) {
    let mut rng = StdRng::seed_from_u64(seed.seed);
    let mut total_moves = 0;
    let mut wins = 0;
    let now = Instant::now();

    for i in 0..games {
        let mut game = new_game(suits, &seed.increase(i));
        if random {
            total_moves += random_play(&mut game, &mut rng, max_moves);
        } else {
            let stats = greedy_play(&mut game, max_moves);
            total_moves += stats.moves + stats.deals;
        }
        if game.is_won() {
            wins += 1;
        }
        log::info!(
            "game {}: {} moves, score {}",
            seed.increase(i),
            game.move_count(),
            game.score()
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let rate = total_moves as f64 / now.elapsed().as_secs_f64();
    println!("{wins}/{games} won, {total_moves} moves, {rate:.0} op/s");
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More logging, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = SuitsArg::Two, global = true)]
    suits: SuitsArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Print {
        #[command(flatten)]
        seed: Seed,
    },

    Play {
        #[command(flatten)]
        seed: Seed,
    },

    Bench {
        #[command(flatten)]
        seed: Seed,

        #[arg(long, default_value_t = 100)]
        games: u64,

        #[arg(long, default_value_t = 1000)]
        max_moves: usize,

        /// Pick random candidates instead of playing greedily
        #[arg(long)]
        random: bool,
    },
}

fn main() {
    let args = Cli::parse();
    logger::init(args.verbose);
    load_assets();

    let suits = Suits::from(args.suits);
    match &args.command {
        Commands::Print { seed } => {
            let game = new_game(suits, seed);
            print_game(&game);
            println!("{}", JsonSnapshot(&game));
        }
        Commands::Play { seed } => game_loop(suits, seed),
        Commands::Bench {
            seed,
            games,
            max_moves,
            random,
        } => benchmark(suits, seed, *games, *max_moves, *random),
    }
}
