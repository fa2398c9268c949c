//! Plain-text rendering of the table.

use std::fmt::Write;
use yahtzee_core::{Category, GameEvent, GameState, ScoreCell, Scoreboard, DICE_COUNT};

const LABEL_WIDTH: usize = 24;
const COLUMN_WIDTH: usize = 10;

/// Turn info and dice, e.g. `Ana to play, 2 rolls left` and `[3] [5]* ...`
pub fn render_turn(game: &GameState) -> String {
    let mut out = String::new();

    match game.current_player_name() {
        Some(name) => {
            let _ = writeln!(out, "{} to play, {} rolls left", name, game.rolls_left());
        }
        None => {
            let _ = writeln!(out, "No game in progress. Type 'start 2' to begin.");
            return out;
        }
    }

    let dice = game.dice();
    let held = game.held();
    let faces: Vec<String> = (0..DICE_COUNT)
        .map(|i| {
            let value = dice.get(i).unwrap_or(1);
            if held.is_held(i) {
                format!("[{}]*", value)
            } else {
                format!("[{}] ", value)
            }
        })
        .collect();
    let _ = writeln!(out, "Dice: {}", faces.join(" "));

    if !game.turn().has_rolled() {
        let _ = writeln!(out, "(not rolled yet)");
    }
    out
}

/// The score table with previews for the current player in parentheses
pub fn render_scoreboard(board: &Scoreboard) -> String {
    let mut out = String::new();
    if board.players.is_empty() {
        return out;
    }

    let _ = write!(out, "{:<LABEL_WIDTH$}", "Category");
    for (i, name) in board.players.iter().enumerate() {
        let marker = if board.current_player == Some(i as u8) { ">" } else { "" };
        let _ = write!(out, "{:>COLUMN_WIDTH$}", format!("{}{}", marker, truncate(name)));
    }
    out.push('\n');

    for row in &board.rows {
        if row.category == Category::ThreeOfAKind {
            out.push('\n');
        }
        let _ = write!(out, "{:<LABEL_WIDTH$}", row.category.name());
        for cell in &row.cells {
            let text = match cell {
                ScoreCell::Locked(points) => points.to_string(),
                ScoreCell::Preview(points) => format!("({})", points),
                ScoreCell::Empty => String::new(),
            };
            let _ = write!(out, "{:>COLUMN_WIDTH$}", text);
        }
        out.push('\n');
    }

    out.push('\n');
    let total_rows: [(&str, fn(&yahtzee_core::SheetTotals) -> u32); 4] = [
        ("Upper Total", |t| t.upper_total),
        ("Upper Bonus (+35 >= 63)", |t| t.bonus),
        ("Lower Total", |t| t.lower_total),
        ("Grand Total", |t| t.grand_total),
    ];
    for (label, getter) in total_rows {
        let _ = write!(out, "{:<LABEL_WIDTH$}", label);
        for totals in &board.totals {
            let _ = write!(out, "{:>COLUMN_WIDTH$}", getter(totals));
        }
        out.push('\n');
    }

    out
}

/// The end-of-game announcement
pub fn render_winners(winners: &[String], score: u32) -> String {
    format!("Game Over! Winner: {} with {} points.", winners.join(", "), score)
}

/// One line per event that deserves a mention
pub fn render_events(game: &GameState, events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::CategoryScored {
                player,
                category,
                points,
            } => Some(format!(
                "{} scores {} in {}.",
                game.player_name(*player).unwrap_or("?"),
                points,
                category
            )),
            GameEvent::GameOver { winners, score } => Some(render_winners(winners, *score)),
            GameEvent::SnapshotImported { .. } => Some("Game imported.".to_string()),
            GameEvent::GameReset => Some("Game reset.".to_string()),
            _ => None,
        })
        .collect()
}

fn truncate(name: &str) -> String {
    name.chars().take(COLUMN_WIDTH - 2).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yahtzee_core::SequenceRoller;

    #[test]
    fn test_render_turn_marks_held_dice() {
        let mut game = GameState::with_players(vec!["Ana".into()]).unwrap();
        assert!(render_turn(&game).contains("(not rolled yet)"));

        game.roll(&mut SequenceRoller::new([3, 5, 5, 1, 2])).unwrap();
        game.toggle_hold(1).unwrap();
        let text = render_turn(&game);
        assert!(text.contains("Ana to play, 2 rolls left"));
        assert!(text.contains("[3]  [5]* [5]  [1]  [2]"));
    }

    #[test]
    fn test_render_turn_without_game() {
        assert!(render_turn(&GameState::new()).contains("No game in progress"));
    }

    #[test]
    fn test_scoreboard_rows() {
        let mut game = GameState::with_players(vec!["Ana".into(), "Ben".into()]).unwrap();
        game.apply_category(Category::Chance).unwrap();
        let text = render_scoreboard(&game.scoreboard());

        assert!(text.contains(">Ben"));
        assert!(text.lines().any(|l| l.starts_with("Chance") && l.contains('5')));
        assert!(text.lines().any(|l| l.starts_with("Ones") && l.contains("(5)")));
        assert!(text.contains("Grand Total"));
    }

    #[test]
    fn test_winner_line() {
        assert_eq!(
            render_winners(&["Ana".into(), "Ben".into()], 212),
            "Game Over! Winner: Ana, Ben with 212 points."
        );
    }
}
