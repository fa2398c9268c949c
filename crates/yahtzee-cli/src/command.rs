//! Typed commands for the terminal table.

use std::path::PathBuf;
use thiserror::Error;
use yahtzee_core::{Category, ParseCategoryError, DICE_COUNT, MAX_PLAYERS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Dice are numbered 1 to 5, got {0:?}")]
    BadDie(String),

    #[error(transparent)]
    BadCategory(#[from] ParseCategoryError),

    #[error("Between 1 and 4 players, got {0}")]
    BadPlayerCount(usize),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a game with these names (blank names get defaults)
    Start(Vec<String>),
    Reset,
    Roll,
    /// Toggle holds, 0-based positions
    Hold(Vec<usize>),
    Score(Category),
    EndTurn,
    Board,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => return Ok(None),
            "start" | "new" => Command::Start(parse_players(rest)?),
            "reset" => Command::Reset,
            "roll" | "r" => Command::Roll,
            "hold" | "h" | "unhold" => Command::Hold(parse_dice(rest)?),
            "score" | "s" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("category"));
                }
                Command::Score(rest.parse()?)
            }
            "end" | "next" | "pass" => Command::EndTurn,
            "board" | "show" => Command::Board,
            "save" | "export" => Command::Save(optional_path(rest)),
            "load" | "import" => Command::Load(optional_path(rest)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// `start 3` seats three default names; `start Ana, Ben Lee` seats named players.
fn parse_players(rest: &str) -> Result<Vec<String>, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument("player count or names"));
    }

    if let Ok(count) = rest.parse::<usize>() {
        if count == 0 || count > MAX_PLAYERS {
            return Err(CommandError::BadPlayerCount(count));
        }
        return Ok(vec![String::new(); count]);
    }

    let names: Vec<String> = if rest.contains(',') {
        rest.split(',').map(|s| s.trim().to_string()).collect()
    } else {
        rest.split_whitespace().map(str::to_string).collect()
    };

    if names.len() > MAX_PLAYERS {
        return Err(CommandError::BadPlayerCount(names.len()));
    }
    Ok(names)
}

/// Dice positions as typed (1-based, space or comma separated)
fn parse_dice(rest: &str) -> Result<Vec<usize>, CommandError> {
    let positions: Vec<usize> = rest
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if (1..=DICE_COUNT).contains(&n) => Ok(n - 1),
            _ => Err(CommandError::BadDie(s.to_string())),
        })
        .collect::<Result<_, _>>()?;

    if positions.is_empty() {
        return Err(CommandError::MissingArgument("dice to hold"));
    }
    Ok(positions)
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

pub const HELP: &str = "\
Commands:
  start <n> | start <name>, <name>...   start a new game (1-4 players)
  roll                                  roll the dice that are not held
  hold <die>...                         hold/release dice by position (1-5)
  score <category>                      score the dice, e.g. 'score full house' or 'score fh'
  end                                   pass the turn without scoring
  board                                 show the dice and the score table
  save [path] / load [path]             export or import the game
  reset                                 discard the game
  quit                                  leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("roll"), Ok(Some(Command::Roll)));
        assert_eq!(Command::parse("R"), Ok(Some(Command::Roll)));
        assert_eq!(Command::parse("end"), Ok(Some(Command::EndTurn)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_start_forms() {
        assert_eq!(
            Command::parse("start 2"),
            Ok(Some(Command::Start(vec![String::new(), String::new()])))
        );
        assert_eq!(
            Command::parse("start Ana, Ben Lee"),
            Ok(Some(Command::Start(vec!["Ana".into(), "Ben Lee".into()])))
        );
        assert_eq!(
            Command::parse("start Ana Ben"),
            Ok(Some(Command::Start(vec!["Ana".into(), "Ben".into()])))
        );
        assert_eq!(Command::parse("start 5"), Err(CommandError::BadPlayerCount(5)));
        assert_eq!(
            Command::parse("start a b c d e"),
            Err(CommandError::BadPlayerCount(5))
        );
        assert!(Command::parse("start").is_err());
    }

    #[test]
    fn test_hold_positions() {
        assert_eq!(
            Command::parse("hold 1 3,5"),
            Ok(Some(Command::Hold(vec![0, 2, 4])))
        );
        assert_eq!(Command::parse("hold 6"), Err(CommandError::BadDie("6".into())));
        assert_eq!(
            Command::parse("hold"),
            Err(CommandError::MissingArgument("dice to hold"))
        );
    }

    #[test]
    fn test_score_categories() {
        assert_eq!(
            Command::parse("score Full House"),
            Ok(Some(Command::Score(Category::FullHouse)))
        );
        assert_eq!(
            Command::parse("s 3k"),
            Ok(Some(Command::Score(Category::ThreeOfAKind)))
        );
        assert!(matches!(
            Command::parse("score pair"),
            Err(CommandError::BadCategory(_))
        ));
    }

    #[test]
    fn test_save_and_load_paths() {
        assert_eq!(Command::parse("save"), Ok(Some(Command::Save(None))));
        assert_eq!(
            Command::parse("load games/a.json"),
            Ok(Some(Command::Load(Some(PathBuf::from("games/a.json")))))
        );
    }
}
