//! Drives a `GameState` from typed commands.
//!
//! In-game intents that the engine refuses are logged and otherwise ignored;
//! the table is simply shown again. Only file import/export can fail loudly.

use crate::command::{Command, HELP};
use crate::render::{render_events, render_scoreboard, render_turn};
use anyhow::Context;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use yahtzee_core::{GameError, GameEvent, GameState, RandomRoller};

/// Result of running one command
#[derive(Debug, Default)]
pub struct Reply {
    /// Text to show the players
    pub lines: Vec<String>,
    /// The players asked to leave
    pub quit: bool,
}

impl Reply {
    fn text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: false,
        }
    }
}

/// A local table: one game plus the dice and the default save location
pub struct Session {
    game: GameState,
    roller: RandomRoller<StdRng>,
    save_path: PathBuf,
}

impl Session {
    pub fn new(roller: RandomRoller<StdRng>, save_path: PathBuf) -> Self {
        Self {
            game: GameState::new(),
            roller,
            save_path,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Run one command and describe the outcome
    pub async fn execute(&mut self, command: Command) -> Reply {
        let outcome = match command {
            Command::Help => return Reply::text(HELP),
            Command::Quit => {
                return Reply {
                    lines: Vec::new(),
                    quit: true,
                }
            }
            Command::Board => Ok(Vec::new()),
            Command::Start(names) => self.game.start(names),
            Command::Reset => Ok(self.game.reset()),
            Command::Roll => self.game.roll(&mut self.roller),
            Command::Hold(positions) => self.toggle_holds(&positions),
            Command::Score(category) => self.game.apply_category(category),
            Command::EndTurn => self.game.end_turn(),
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.save_path.clone());
                return match self.save(&path).await {
                    Ok(()) => Reply::text(format!("Game saved to {}.", path.display())),
                    Err(err) => {
                        warn!(error = %err, "export failed");
                        Reply::text(format!("Could not save: {:#}", err))
                    }
                };
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.save_path.clone());
                match self.load(&path).await {
                    Ok(events) => Ok(events),
                    Err(err) => {
                        warn!(error = %err, path = %path.display(), "import failed");
                        return Reply::text("Invalid file.");
                    }
                }
            }
        };

        let mut reply = Reply::default();
        match outcome {
            Ok(events) => {
                debug!(?events, "applied");
                reply.lines.extend(render_events(&self.game, &events));
                if let Some(GameEvent::GameOver { winners, score }) = events.last() {
                    info!(?winners, score, "game over");
                }
            }
            Err(err) => {
                debug!(error = %err, "ignored");
            }
        }
        reply.lines.push(self.view());
        reply
    }

    /// Dice and score table as currently shown
    pub fn view(&self) -> String {
        let mut text = render_turn(&self.game);
        let table = render_scoreboard(&self.game.scoreboard());
        if !table.is_empty() {
            text.push('\n');
            text.push_str(&table);
        }
        text
    }

    /// Toggle several dice. Stops at the first refusal; earlier toggles stay.
    fn toggle_holds(&mut self, positions: &[usize]) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        for &index in positions {
            events.extend(self.game.toggle_hold(index)?);
        }
        Ok(events)
    }

    /// Write the save document
    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.game.export_json()?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "game exported");
        Ok(())
    }

    /// Replace the game with a save document. The game is untouched on error.
    pub async fn load(&mut self, path: &Path) -> anyhow::Result<Vec<GameEvent>> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let events = self.game.import_json(&json)?;
        info!(path = %path.display(), players = ?self.game.players(), "game imported");
        Ok(events)
    }
}
