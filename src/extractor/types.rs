use crate::types::{PlayerId, SkipReason};

/// Error raised while reading a single recording
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(String),
}

impl From<parser_demo::ParseError> for ExtractError {
    fn from(err: parser_demo::ParseError) -> Self {
        match err {
            parser_demo::ParseError::Io(e) => ExtractError::Io(e),
            other => ExtractError::Parse(other.to_string()),
        }
    }
}

impl From<ExtractError> for SkipReason {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Io(e) => SkipReason::Unreadable(e.to_string()),
            ExtractError::Parse(e) => SkipReason::ParseError(e),
        }
    }
}

/// Final figures of one participant, as reported when the match ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantStats {
    pub id: PlayerId,
    pub name: String,
    pub kills: u32,
    pub deaths: u32,
    pub damage: u32,
}

/// The match-ended signal, independent of the parser that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub score_a: u32,
    pub score_b: u32,
    pub participants: Vec<ParticipantStats>,
}

impl MatchSummary {
    /// Rounds played, or `None` if the scores cannot be a real match
    pub fn total_rounds(&self) -> Option<u32> {
        self.score_a.checked_add(self.score_b)
    }

    /// At least one side reached `min_rounds_per_side`
    pub fn is_complete(&self, min_rounds_per_side: u32) -> bool {
        self.score_a >= min_rounds_per_side || self.score_b >= min_rounds_per_side
    }
}

impl From<&parser_demo::MatchEnded> for MatchSummary {
    fn from(ended: &parser_demo::MatchEnded) -> Self {
        Self {
            score_a: ended.score_ct,
            score_b: ended.score_t,
            participants: ended
                .participants
                .iter()
                .map(|p| ParticipantStats {
                    id: p.steam_id,
                    name: p.name.clone(),
                    kills: p.kills,
                    deaths: p.deaths,
                    damage: p.total_damage,
                })
                .collect(),
        }
    }
}
