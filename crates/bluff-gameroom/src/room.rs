use super::*;
use bluff_auction::*;
use bluff_core::*;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Live match coordinator.
/// Imperative shell that owns an [`Engine`] (functional core) from the
/// moment the ledger accepts the match until it concludes or fails.
pub struct Room {
    id: MatchId,
    ledger: Arc<dyn Ledger>,
    events: Option<UnboundedSender<Event>>,
    engine: Engine<Seating>,
}

impl Room {
    /// Create the match. Failures here surface to the caller and leave
    /// nothing behind on the ledger.
    pub async fn open(
        ledger: Arc<dyn Ledger>,
        rules: Rules,
        players: [Box<dyn Strategy>; 2],
        events: Option<UnboundedSender<Event>>,
    ) -> Result<Self, MatchError> {
        let engine = Engine::open(ledger.clone(), rules, players, events.clone())
            .await
            .map_err(MatchError::Create)?;
        Ok(Self {
            id: engine.id(),
            ledger,
            events,
            engine,
        })
    }
    pub fn id(&self) -> MatchId {
        self.id
    }
}

impl Room {
    /// Join, play every round, and read the verdict. On failure the match
    /// is cancelled if nobody joined it; otherwise it is left as the
    /// ledger has it.
    pub async fn run(self) -> Result<MatchResult, MatchError> {
        let Self {
            id,
            ledger,
            events,
            engine,
        } = self;
        log::debug!("[room #{}] starting", id);
        match Self::play(engine).await {
            Ok(result) => {
                log::info!("[room #{}] game over", id);
                Ok(result)
            }
            Err(error) => {
                log::error!("[room #{}] {}", id, error);
                Self::abort(ledger.as_ref(), id).await;
                if let Some(tx) = events {
                    let _ = tx.send(Event::Aborted {
                        id,
                        reason: error.to_string(),
                    });
                }
                Err(error)
            }
        }
    }
    async fn play(engine: Engine<Seating>) -> Result<MatchResult, MatchError> {
        let mut engine = engine.join().await.map_err(MatchError::Join)?;
        for _ in 0..engine.rules().rounds {
            let round = engine.round();
            let played = engine
                .play()
                .await
                .map_err(|source| MatchError::Round { round, source })?;
            if played.is_none() {
                break;
            }
        }
        let engine = engine.conclude().await.map_err(MatchError::Conclude)?;
        Ok(engine.result())
    }
    async fn abort(ledger: &dyn Ledger, id: MatchId) {
        match ledger.state(id).await {
            Ok(snapshot) if snapshot.status == Status::Waiting => match ledger.cancel(id).await {
                Ok(()) => log::info!("[room #{}] cancelled, deposit refunded", id),
                Err(e) => log::error!("[room #{}] cancel failed: {}", id, e),
            },
            Ok(snapshot) => log::warn!("[room #{}] left {} on the ledger", id, snapshot.status),
            Err(e) => log::error!("[room #{}] state unreadable after failure: {}", id, e),
        }
    }
}

/// Where a match stopped.
#[derive(Debug)]
pub enum MatchError {
    Create(LedgerError),
    Join(LedgerError),
    Round { round: Round, source: LedgerError },
    Conclude(LedgerError),
}

impl MatchError {
    pub fn ledger(&self) -> &LedgerError {
        match self {
            Self::Create(e) | Self::Join(e) | Self::Conclude(e) => e,
            Self::Round { source, .. } => source,
        }
    }
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create(e) => write!(f, "create failed: {}", e),
            Self::Join(e) => write!(f, "join failed: {}", e),
            Self::Round { round, source } => write!(f, "round {} failed: {}", round, source),
            Self::Conclude(e) => write!(f, "conclude failed: {}", e),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.ledger())
    }
}
