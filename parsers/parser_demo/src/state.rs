use std::collections::HashMap;

use log::warn;

use crate::models::{Event, MatchEnded, Participant, PlayerState, Side};

/// Game state accumulated while a recording is read
#[derive(Debug, Clone, Default)]
pub struct GameState {
    players: Vec<PlayerState>,
    index: HashMap<u64, usize>,
    score_ct: u32,
    score_t: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won so far by `side`. Spectators never score.
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::CounterTerrorist => self.score_ct,
            Side::Terrorist => self.score_t,
            Side::Spectator => 0,
        }
    }

    /// Every player seen so far, in connection order
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, steam_id: u64) -> Option<&PlayerState> {
        self.index.get(&steam_id).map(|&i| &self.players[i])
    }

    /// Connected players on CT or T
    pub fn playing(&self) -> impl Iterator<Item = &PlayerState> + '_ {
        self.players.iter().filter(|p| p.is_playing())
    }

    /// Apply a non-terminal event. Returns the offending id when an event
    /// references a player that never connected.
    pub(crate) fn apply(&mut self, event: Event) -> Result<(), u64> {
        match event {
            Event::Player { steam_id, name } => {
                match self.index.get(&steam_id) {
                    Some(&i) => {
                        let player = &mut self.players[i];
                        player.name = name;
                        player.connected = true;
                    }
                    None => {
                        self.index.insert(steam_id, self.players.len());
                        self.players.push(PlayerState::new(steam_id, name));
                    }
                }
            }
            Event::Team { steam_id, side } => {
                self.player_mut(steam_id)?.side = side;
            }
            Event::Disconnect { steam_id } => {
                self.player_mut(steam_id)?.connected = false;
            }
            Event::Kill { attacker, victim } => {
                self.player_mut(victim)?.deaths += 1;
                if let Some(attacker) = attacker.filter(|&a| a != victim) {
                    self.player_mut(attacker)?.kills += 1;
                }
            }
            Event::Damage { attacker, victim, amount } => {
                self.player_mut(victim)?;
                if attacker != victim {
                    let player = self.player_mut(attacker)?;
                    player.total_damage = player.total_damage.saturating_add(amount);
                }
            }
            Event::RoundEnd { winner } => match winner {
                Side::CounterTerrorist => self.score_ct += 1,
                Side::Terrorist => self.score_t += 1,
                Side::Spectator => warn!("Ignoring round won by spectators"),
            },
            Event::MatchEnd => {}
        }
        Ok(())
    }

    pub(crate) fn match_ended(&self) -> MatchEnded {
        MatchEnded {
            score_ct: self.score_ct,
            score_t: self.score_t,
            participants: self.playing().map(Participant::from).collect(),
        }
    }

    fn player_mut(&mut self, steam_id: u64) -> Result<&mut PlayerState, u64> {
        match self.index.get(&steam_id) {
            Some(&i) => Ok(&mut self.players[i]),
            None => Err(steam_id),
        }
    }
}
