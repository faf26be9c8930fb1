//! Interactive hot-seat loop over any line reader and writer.

use crate::config::HotseatConfig;
use hotseat_core::{Alliance, Coordinate, PieceKind};
use hotseat_engine::{EngineError, Game, GameStatus};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from reading a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' is not a coordinate move like e2e4 or e7e8n")]
    InvalidMove(String),
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Coordinate,
        to: Coordinate,
        promotion: Option<PieceKind>,
    },
    Undo,
    Moves,
    Fen,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Parses a command. A bare coordinate move needs no `move` prefix.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let first = words.next().ok_or(CommandError::Empty)?;
        let command = match first {
            "undo" | "u" => Command::Undo,
            "moves" | "m" => Command::Moves,
            "fen" => Command::Fen,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "move" => {
                let text = words
                    .next()
                    .ok_or_else(|| CommandError::InvalidMove(String::new()))?;
                Self::parse_move(text)?
            }
            other if other.len() >= 4 && other.as_bytes()[0].is_ascii_alphabetic() => {
                Self::parse_move(other)?
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        match words.next() {
            Some(extra) => Err(CommandError::Unknown(extra.to_string())),
            None => Ok(command),
        }
    }

    fn parse_move(text: &str) -> Result<Self, CommandError> {
        let invalid = || CommandError::InvalidMove(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid());
        }
        let from = Coordinate::from_algebraic(&text[0..2]).map_err(|_| invalid())?;
        let to = Coordinate::from_algebraic(&text[2..4]).map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some((kind, _)) if kind.is_promotion_target() => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(Command::Move {
            from,
            to,
            promotion,
        })
    }
}

const HELP: &str = "\
Commands:
  e2e4, move e2e4   play a move (append q, r, b or n to choose a promotion)
  undo              take back the last move
  moves             list the legal moves
  fen               print the position in notation
  reset             start over from the first position
  help              show this text
  quit              leave the game";

/// A running hot-seat game.
pub struct Session {
    game: Game,
    config: HotseatConfig,
}

impl Session {
    /// Starts a session from the configured position, or the standard one.
    pub fn new(config: HotseatConfig) -> Result<Self, EngineError> {
        let game = match &config.start_position {
            Some(text) => Game::from_notation(text)?,
            None => Game::new(),
        };
        Ok(Session { game, config })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        self.show(output)?;
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %err, "unreadable input line");
                    writeln!(output, "could not read that line: {}", err)?;
                    continue;
                }
                Err(err) => return Err(err),
            };
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{}", err)?;
                    continue;
                }
            };
            if !self.execute(command, output)? {
                break;
            }
        }
        writeln!(output, "Goodbye.")?;
        Ok(())
    }

    /// Runs one command. Returns false when the session should end.
    fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<bool> {
        match command {
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let promotion = promotion.unwrap_or(self.config.default_promotion);
                match self.game.play(from, to, Some(promotion)) {
                    Ok(mv) => {
                        info!(%mv, "played");
                        self.show(output)?;
                    }
                    Err(err) => {
                        warn!(%from, %to, error = %err, "move rejected");
                        writeln!(output, "{}", err)?;
                    }
                }
            }
            Command::Undo => match self.game.undo() {
                Ok(mv) => {
                    writeln!(output, "Took back {}.", mv)?;
                    self.show(output)?;
                }
                Err(err) => writeln!(output, "{}", err)?,
            },
            Command::Moves => match self.legal_move_list() {
                Ok(list) => writeln!(output, "{}", list)?,
                Err(err) => writeln!(output, "{}", err)?,
            },
            Command::Fen => writeln!(output, "{}", self.game.to_notation())?,
            Command::Reset => {
                self.game.reset();
                info!("game reset");
                self.show(output)?;
            }
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn show<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let side = self.game.side_to_move();
        let perspective = if self.config.auto_flip {
            side
        } else {
            Alliance::White
        };
        write!(output, "\n{}", self.game.board().render(perspective))?;

        match self.game.status() {
            GameStatus::InProgress => writeln!(output, "{} to move.", side)?,
            GameStatus::Check => writeln!(output, "{} to move and in check.", side)?,
            status @ (GameStatus::Checkmate { .. } | GameStatus::Stalemate) => {
                writeln!(output, "Game over: {}.", status)?;
                writeln!(output, "Type 'undo' or 'reset' to keep playing.")?;
            }
        }

        if self.config.show_legal_moves && !self.game.is_over() {
            match self.legal_move_list() {
                Ok(list) => writeln!(output, "Legal moves: {}", list)?,
                Err(err) => writeln!(output, "{}", err)?,
            }
        }
        Ok(())
    }

    fn legal_move_list(&self) -> Result<String, EngineError> {
        let mut moves: Vec<String> = self
            .game
            .legal_moves()?
            .iter()
            .map(|mv| mv.to_uci())
            .collect();
        moves.sort();
        Ok(moves.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    fn run_script(config: HotseatConfig, script: &str) -> (Session, String) {
        let mut session = Session::new(config).unwrap();
        let mut output = Vec::new();
        session.run(Cursor::new(script), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("undo"), Ok(Command::Undo));
        assert_eq!(Command::parse("  MOVES "), Ok(Command::Moves));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(
            Command::parse("e2e4"),
            Ok(Command::Move {
                from: at("e2"),
                to: at("e4"),
                promotion: None
            })
        );
        assert_eq!(
            Command::parse("move e7e8N"),
            Ok(Command::Move {
                from: at("e7"),
                to: at("e8"),
                promotion: Some(PieceKind::Knight)
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert!(matches!(
            Command::parse("castle"),
            Err(CommandError::InvalidMove(_))
        ));
        assert!(matches!(Command::parse("xyz"), Err(CommandError::Unknown(_))));
        assert!(matches!(
            Command::parse("e7e8k"),
            Err(CommandError::InvalidMove(_))
        ));
        assert!(matches!(
            Command::parse("undo now"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn test_plays_moves() {
        let (session, output) = run_script(HotseatConfig::default(), "e2e4\ne7e5\nquit\n");
        assert_eq!(session.game().ply_count(), 2);
        assert!(output.contains("Black to move."));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_skips_invalid_utf8_line() {
        let mut session = Session::new(HotseatConfig::default()).unwrap();
        let mut output = Vec::new();
        let script: &[u8] = b"\xff\xfe\ne2e4\nquit\n";
        session.run(Cursor::new(script), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(session.game().ply_count(), 1);
        assert!(output.contains("could not read that line"));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_rejects_illegal_move() {
        let (session, output) = run_script(HotseatConfig::default(), "e2e5\n");
        assert_eq!(session.game().ply_count(), 0);
        assert!(output.contains("illegal move"));
    }

    #[test]
    fn test_fools_mate_ends_game() {
        let (session, output) =
            run_script(HotseatConfig::default(), "f2f3\ne7e5\ng2g4\nd8h4\na2a3\n");
        assert!(session.game().is_over());
        assert!(output.contains("Game over: checkmate, Black wins."));
        assert!(output.contains("game has already ended"));
        assert_eq!(session.game().ply_count(), 4);
    }

    #[test]
    fn test_undo_and_fen() {
        let (session, output) = run_script(HotseatConfig::default(), "g1f3\nundo\nfen\nundo\n");
        assert_eq!(session.game().ply_count(), 0);
        assert!(output.contains("Took back g1f3."));
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"));
        assert!(output.contains("no move to take back"));
    }

    #[test]
    fn test_default_promotion_from_config() {
        let config = HotseatConfig {
            start_position: Some("8/P7/8/8/8/8/8/4K2k w - - 0 1".to_string()),
            default_promotion: PieceKind::Knight,
            ..HotseatConfig::default()
        };
        let (session, _) = run_script(config, "a7a8\n");
        let piece = session.game().board().piece_at(at("a8")).unwrap();
        assert_eq!(piece.kind(), PieceKind::Knight);
    }

    #[test]
    fn test_auto_flip_renders_from_mover() {
        let config = HotseatConfig {
            auto_flip: true,
            ..HotseatConfig::default()
        };
        let (_, output) = run_script(config, "e2e4\n");
        assert!(output.contains("1 R N B K Q B N R"));

        let config = HotseatConfig {
            auto_flip: false,
            ..HotseatConfig::default()
        };
        let (_, output) = run_script(config, "e2e4\n");
        assert!(!output.contains("1 R N B K Q B N R"));
    }

    #[test]
    fn test_show_legal_moves() {
        let config = HotseatConfig {
            show_legal_moves: true,
            ..HotseatConfig::default()
        };
        let (_, output) = run_script(config, "");
        assert!(output.contains("Legal moves: a2a3 a2a4 b1a3 b1c3"));
    }

    #[test]
    fn test_bad_start_position() {
        let config = HotseatConfig {
            start_position: Some("not a position".to_string()),
            ..HotseatConfig::default()
        };
        assert!(matches!(Session::new(config), Err(EngineError::Parse(_))));
    }
}
