use super::*;
use bluff_auction::*;
use bluff_core::*;
use bluff_gameroom::*;
use bluff_players::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;

/// Manages hosted matches and their lifecycles.
///
/// Tallies stay in memory until [`Arena::forget`] releases them.
pub struct Arena {
    ledger: Arc<dyn Ledger>,
    rules: Rules,
    roster: Roster,
    matches: RwLock<HashMap<MatchId, Tally>>,
    rooms: RwLock<HashMap<MatchId, JoinHandle<()>>>,
}

impl Arena {
    pub fn new(ledger: Arc<dyn Ledger>, rules: Rules, roster: Roster) -> Self {
        Self {
            ledger,
            rules,
            roster,
            matches: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
        }
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn registry(&self) -> &Registry {
        self.roster.registry()
    }
}

impl Arena {
    /// Creates a match between two named strategies and returns its id.
    /// Creation failures surface here; everything after runs in the
    /// background and is visible through [`Arena::progress`].
    pub async fn start(self: &Arc<Self>, a: &str, b: &str) -> anyhow::Result<MatchId> {
        let players = [self.strategy(a)?, self.strategy(b)?];
        let (tx, rx) = unbounded_channel();
        let room = Room::open(self.ledger.clone(), self.rules, players, Some(tx)).await?;
        let id = room.id();
        self.matches
            .write()
            .await
            .insert(id, Tally::new([a.to_string(), b.to_string()]));
        tokio::spawn(self.clone().observe(rx));
        let mut rooms = self.rooms.write().await;
        let arena = self.clone();
        let task = tokio::spawn(async move {
            if let Err(e) = room.run().await {
                log::warn!("[arena] #{} stopped: {}", id, e);
            }
            arena.rooms.write().await.remove(&id);
        });
        rooms.insert(id, task);
        drop(rooms);
        log::info!("[arena] #{} started: {} vs {}", id, a, b);
        Ok(id)
    }
    /// Waits until the match completes or aborts.
    pub async fn finish(&self, id: MatchId) -> anyhow::Result<MatchResult> {
        let mut rx = self.tally(id, Tally::subscribe).await?;
        let progress = rx.wait_for(Progress::is_terminal).await?.clone();
        match progress {
            Progress::Completed { result } => Ok(result),
            Progress::Aborted { reason } => Err(anyhow::anyhow!("match {} aborted: {}", id, reason)),
            other => Err(anyhow::anyhow!("match {} still {}", id, other)),
        }
    }
    pub async fn progress(&self, id: MatchId) -> anyhow::Result<Progress> {
        self.tally(id, Tally::progress).await
    }
    pub async fn history(&self, id: MatchId) -> anyhow::Result<Vec<RoundRecord>> {
        self.tally(id, |t| t.rounds().to_vec()).await
    }
    pub async fn agents(&self, id: MatchId) -> anyhow::Result<[String; 2]> {
        self.tally(id, |t| t.agents().clone()).await
    }
    /// JSON summary of one match.
    pub async fn report(&self, id: MatchId) -> anyhow::Result<String> {
        let matches = self.matches.read().await;
        let tally = matches
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("match {} not found", id))?;
        let report = Report {
            id,
            agents: tally.agents(),
            rounds: tally.rounds(),
            progress: tally.progress(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
    pub async fn matches(&self) -> Vec<MatchId> {
        let mut ids = self.matches.read().await.keys().copied().collect::<Vec<_>>();
        ids.sort();
        ids
    }
    /// Stops a live match. Its pending decisions are dropped, its room task
    /// is torn down, and its progress becomes aborted. A match nobody has
    /// joined is cancelled on the ledger; otherwise the ledger keeps it as
    /// it stands. Returns how many pending decisions were dropped.
    pub async fn abandon(&self, id: MatchId) -> anyhow::Result<usize> {
        if self.progress(id).await?.is_terminal() {
            return Err(anyhow::anyhow!("match {} is already over", id));
        }
        let dropped = self.registry().abandon(id);
        let task = self.rooms.write().await.remove(&id);
        if let Some(task) = task {
            task.abort();
            let _ = task.await;
        }
        match self.ledger.state(id).await {
            Ok(snapshot) if snapshot.status == Status::Waiting => self.ledger.cancel(id).await?,
            Ok(_) => {}
            Err(e) => log::warn!("[arena] #{} state unreadable while abandoning: {}", id, e),
        }
        if let Some(tally) = self.matches.write().await.get_mut(&id) {
            tally.record(&Event::Aborted {
                id,
                reason: String::from("abandoned"),
            });
        }
        log::warn!("[arena] #{} abandoned, dropped {} pending decisions", id, dropped);
        Ok(dropped)
    }
    /// Releases a finished match from the arena and, where the ledger
    /// allows it, from the ledger's own bookkeeping.
    pub async fn forget(&self, id: MatchId) -> anyhow::Result<()> {
        if !self.progress(id).await?.is_terminal() {
            return Err(anyhow::anyhow!("match {} is still live", id));
        }
        self.matches.write().await.remove(&id);
        self.rooms.write().await.remove(&id);
        if let Err(e) = self.ledger.forget(id).await {
            log::debug!("[arena] #{} kept on the ledger: {}", id, e);
        }
        log::debug!("[arena] #{} forgotten", id);
        Ok(())
    }
}

/// External decisions.
impl Arena {
    pub fn pending(&self, id: MatchId) -> Vec<(Slot, AgentView)> {
        self.registry().pending(id)
    }
    pub fn submit(&self, id: MatchId, slot: Slot, bid: Chips, reason: &str) -> anyhow::Result<()> {
        self.registry().submit(id, slot, Decision::new(bid, reason))?;
        Ok(())
    }
    pub fn forfeit(&self, id: MatchId, slot: Slot) -> anyhow::Result<()> {
        self.registry().forfeit(id, slot)?;
        Ok(())
    }
}

impl Arena {
    fn strategy(&self, name: &str) -> anyhow::Result<Box<dyn Strategy>> {
        self.roster.build(name).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown strategy {:?} (expected one of {})",
                name,
                Roster::NAMES.join(", ")
            )
        })
    }
    async fn tally<T, F>(&self, id: MatchId, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&Tally) -> T,
    {
        self.matches
            .read()
            .await
            .get(&id)
            .map(f)
            .ok_or_else(|| anyhow::anyhow!("match {} not found", id))
    }
    async fn observe(self: Arc<Self>, mut rx: UnboundedReceiver<Event>) {
        while let Some(event) = rx.recv().await {
            log::debug!("[arena] {}", event);
            if let Some(tally) = self.matches.write().await.get_mut(&event.id()) {
                tally.record(&event);
            }
        }
    }
}
