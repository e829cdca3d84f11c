//! Match Recording Parser
//!
//! Streaming parser for line-oriented match recordings. A recording starts with
//! a `#recording <version>` header followed by one event per line:
//!
//! ```text
//! #recording 1
//! player 76561198000000001 "alice"
//! team 76561198000000001 ct
//! kill 76561198000000001 76561198000000002
//! damage 76561198000000001 76561198000000002 100
//! round_end ct
//! match_end
//! ```
//!
//! Blank lines and lines starting with `//` are ignored. Handlers registered
//! with [`Parser::on_match_ended`] fire when `match_end` is read, receiving the
//! final scores and the players that were still connected on a playing side.
//!
//! # Examples
//!
//! ```rust
//! use parser_demo::Parser;
//!
//! let recording = "#recording 1\nplayer 1 \"alice\"\nteam 1 t\nround_end t\nmatch_end\n";
//! let mut rounds = 0;
//! let mut parser = Parser::new(recording.as_bytes());
//! parser.on_match_ended(|ended| rounds = ended.score_ct + ended.score_t);
//! parser.parse_to_end().unwrap();
//! drop(parser);
//! assert_eq!(rounds, 1);
//! ```

mod models;
mod parser;
mod state;

use std::io::BufRead;

use log::debug;

pub use models::{Event, MatchEnded, Participant, PlayerState, Side};
pub use parser::{parse_event, parse_header};
pub use state::GameState;

/// Highest recording version this parser understands
pub const SUPPORTED_VERSION: u32 = 1;

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing `#recording` header")]
    MissingHeader,
    #[error("Unsupported recording version {0}")]
    UnsupportedVersion(u32),
    #[error("Line {line}: invalid UTF-8")]
    Decode { line: usize },
    #[error("Line {line}: malformed event `{text}`")]
    Malformed { line: usize, text: String },
    #[error("Line {line}: event references unknown player {steam_id}")]
    UnknownPlayer { line: usize, steam_id: u64 },
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Event-driven recording parser
pub struct Parser<'h, R> {
    reader: R,
    state: GameState,
    handlers: Vec<Box<dyn FnMut(&MatchEnded) + 'h>>,
    line: usize,
}

impl<'h, R: BufRead> Parser<'h, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: GameState::new(),
            handlers: Vec::new(),
            line: 0,
        }
    }

    /// Register a handler for the match-ended signal
    pub fn on_match_ended<F>(&mut self, handler: F)
    where
        F: FnMut(&MatchEnded) + 'h,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    /// Read the whole recording, firing handlers as `match_end` events are
    /// reached. Stops at the first malformed line.
    pub fn parse_to_end(&mut self) -> Result<()> {
        let mut buf = Vec::new();
        let mut header_seen = false;

        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.line += 1;

            let mut text = std::str::from_utf8(&buf)
                .map_err(|_| ParseError::Decode { line: self.line })?;
            if self.line == 1 {
                text = text.strip_prefix('\u{feff}').unwrap_or(text);
            }
            let text = text.trim();
            if text.is_empty() || text.starts_with("//") {
                continue;
            }

            if !header_seen {
                let version = parse_header(text).ok_or(ParseError::MissingHeader)?;
                if version > SUPPORTED_VERSION {
                    return Err(ParseError::UnsupportedVersion(version));
                }
                header_seen = true;
                continue;
            }

            let event = parse_event(text).ok_or_else(|| ParseError::Malformed {
                line: self.line,
                text: text.to_string(),
            })?;
            self.apply(event)?;
        }

        if !header_seen {
            return Err(ParseError::MissingHeader);
        }
        debug!("Parsed {} lines", self.line);
        Ok(())
    }

    fn apply(&mut self, event: Event) -> Result<()> {
        if event == Event::MatchEnd {
            let ended = self.state.match_ended();
            for handler in &mut self.handlers {
                handler(&ended);
            }
            return Ok(());
        }

        let line = self.line;
        self.state
            .apply(event)
            .map_err(|steam_id| ParseError::UnknownPlayer { line, steam_id })
    }
}

/// Parse a whole recording and return the first match-ended signal, if any
pub fn parse_recording<R: BufRead>(reader: R) -> Result<Option<MatchEnded>> {
    let mut first = None;
    let mut parser = Parser::new(reader);
    parser.on_match_ended(|ended| {
        if first.is_none() {
            first = Some(ended.clone());
        }
    });
    parser.parse_to_end()?;
    drop(parser);
    Ok(first)
}
