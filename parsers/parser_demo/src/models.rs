//! Event and game-state types produced while reading a recording

use std::fmt;

/// Side a player is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    CounterTerrorist,
    Terrorist,
    Spectator,
}

impl Side {
    /// Whether players on this side take part in rounds
    pub fn is_playing(self) -> bool {
        matches!(self, Side::CounterTerrorist | Side::Terrorist)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::CounterTerrorist => write!(f, "ct"),
            Side::Terrorist => write!(f, "t"),
            Side::Spectator => write!(f, "spectator"),
        }
    }
}

/// A single decoded line of a recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A player connected (or reconnected) under the given name
    Player { steam_id: u64, name: String },
    /// A player moved to a side
    Team { steam_id: u64, side: Side },
    Disconnect { steam_id: u64 },
    /// `attacker` is `None` for world kills (fall damage, bomb, ...)
    Kill { attacker: Option<u64>, victim: u64 },
    Damage { attacker: u64, victim: u64, amount: u32 },
    RoundEnd { winner: Side },
    MatchEnd,
}

/// Per-player counters tracked by the game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub steam_id: u64,
    pub name: String,
    pub side: Side,
    pub connected: bool,
    pub kills: u32,
    pub deaths: u32,
    pub total_damage: u32,
}

impl PlayerState {
    pub(crate) fn new(steam_id: u64, name: String) -> Self {
        Self {
            steam_id,
            name,
            side: Side::Spectator,
            connected: true,
            kills: 0,
            deaths: 0,
            total_damage: 0,
        }
    }

    /// Connected and on a playing side
    pub fn is_playing(&self) -> bool {
        self.connected && self.side.is_playing()
    }
}

/// Snapshot of an active participant at the end of the match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub steam_id: u64,
    pub name: String,
    pub kills: u32,
    pub deaths: u32,
    pub total_damage: u32,
}

impl From<&PlayerState> for Participant {
    fn from(player: &PlayerState) -> Self {
        Self {
            steam_id: player.steam_id,
            name: player.name.clone(),
            kills: player.kills,
            deaths: player.deaths,
            total_damage: player.total_damage,
        }
    }
}

/// Payload of the match-ended signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEnded {
    pub score_ct: u32,
    pub score_t: u32,
    /// Active participants in the order they first connected
    pub participants: Vec<Participant>,
}
