//! Pass-and-play Yahtzee for the terminal.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yahtzee_core::RandomRoller;

mod command;
mod render;
mod session;

use command::Command;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "yahtzee")]
#[command(author, version, about = "Pass-and-play Yahtzee for up to four players", long_about = None)]
struct Args {
    /// Start right away with these players (1-4)
    #[arg(short, long, num_args = 1..=4)]
    players: Vec<String>,

    /// Load a saved game on startup
    #[arg(short, long, conflicts_with = "players")]
    load: Option<PathBuf>,

    /// Seed for the dice, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where `save` and `load` go when no path is given
    #[arg(long, env = "YAHTZEE_SAVE", default_value = "yahtzee-save.json")]
    save_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the game
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(RandomRoller::new(rng), args.save_path);

    info!(seed = ?args.seed, "Starting Yahtzee table...");

    if let Some(path) = args.load {
        let reply = session.execute(Command::Load(Some(path))).await;
        print_lines(&reply.lines);
    } else if !args.players.is_empty() {
        let reply = session.execute(Command::Start(args.players)).await;
        print_lines(&reply.lines);
    } else {
        println!("{}", session.view());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Ok(Some(command)) => {
                let reply = session.execute(command).await;
                print_lines(&reply.lines);
                if reply.quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => println!("{}", err),
        }
    }

    info!(players = ?session.game().players(), "Table closed");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_conflicts_with_players() {
        let err = Args::try_parse_from(["yahtzee", "--load", "save.json", "-p", "Ana"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let args = Args::try_parse_from(["yahtzee", "--load", "save.json"]).unwrap();
        assert_eq!(args.load, Some(PathBuf::from("save.json")));
        assert!(args.players.is_empty());
    }
}
