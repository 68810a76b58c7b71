use bluff_auction::*;
use bluff_core::*;
use bluff_gameroom::Event;
use serde::Serialize;
use tokio::sync::watch;

/// Where a hosted match stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Progress {
    Waiting,
    Playing { round: Round },
    Completed { result: MatchResult },
    Aborted { reason: String },
}

impl Progress {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Aborted { .. })
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting for opponent"),
            Self::Playing { round } => write!(f, "playing round {}", round),
            Self::Completed { result } => write!(f, "completed: {}", result),
            Self::Aborted { reason } => write!(f, "aborted: {}", reason),
        }
    }
}

/// Host-side record of one match, built from engine events.
#[derive(Debug)]
pub struct Tally {
    agents: [String; 2],
    rounds: Vec<RoundRecord>,
    progress: watch::Sender<Progress>,
}

impl Tally {
    pub fn new(agents: [String; 2]) -> Self {
        Self {
            agents,
            rounds: Vec::new(),
            progress: watch::Sender::new(Progress::Waiting),
        }
    }
    pub fn agents(&self) -> &[String; 2] {
        &self.agents
    }
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }
    pub fn progress(&self) -> Progress {
        self.progress.borrow().clone()
    }
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }
    /// Folds one event in. Once the match is over, progress no longer moves.
    pub fn record(&mut self, event: &Event) {
        if self.progress.borrow().is_terminal() {
            return;
        }
        match event {
            Event::Started { .. } => {
                self.progress.send_replace(Progress::Playing { round: 1 });
            }
            Event::RoundStart { round, .. } => {
                self.progress.send_replace(Progress::Playing { round: *round });
            }
            Event::RoundEnd { record, .. } => self.rounds.push(*record),
            Event::Finished { result, .. } => {
                self.progress.send_replace(Progress::Completed {
                    result: result.clone(),
                });
            }
            Event::Aborted { reason, .. } => {
                self.progress.send_replace(Progress::Aborted {
                    reason: reason.clone(),
                });
            }
            Event::Opened { .. } | Event::Seated { .. } | Event::Decided { .. } => {}
        }
    }
}

/// Serializable summary of a hosted match.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub id: MatchId,
    pub agents: &'a [String; 2],
    pub rounds: &'a [RoundRecord],
    pub progress: Progress,
}
