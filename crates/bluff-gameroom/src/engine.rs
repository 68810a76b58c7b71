use super::*;
use bluff_auction::*;
use bluff_core::*;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Phase: match created, waiting for slot B's deposit.
pub struct Seating;
/// Phase: both deposits escrowed, rounds in progress.
pub struct Bidding;
/// Phase: ledger reports the match complete.
pub struct Finished;

/// Functional core for one live duel.
/// Gathers decisions, seals them, and pushes them through the ledger,
/// then records what the ledger settled. Driven by [`Room`].
///
/// Uses typestate pattern to encode valid phase transitions at compile time.
pub struct Engine<Phase> {
    id: MatchId,
    rules: Rules,
    ledger: Arc<dyn Ledger>,
    players: [Box<dyn Strategy>; 2],
    history: Vec<RoundRecord>,
    seats: [Seat; 2],
    events: Option<UnboundedSender<Event>>,
    phase: PhantomData<Phase>,
}

impl<T> Engine<T> {
    pub fn id(&self) -> MatchId {
        self.id
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }
    /// Seats as of the last ledger read.
    pub fn seats(&self) -> [Seat; 2] {
        self.seats
    }
    /// Next round to be played.
    pub fn round(&self) -> Round {
        self.history.len() as Round + 1
    }
    fn shift<U>(self) -> Engine<U> {
        Engine {
            id: self.id,
            rules: self.rules,
            ledger: self.ledger,
            players: self.players,
            history: self.history,
            seats: self.seats,
            events: self.events,
            phase: PhantomData,
        }
    }
    /// Send to the observer only.
    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
    /// Send to the observer and both players.
    async fn broadcast(&mut self, event: Event) {
        for player in self.players.iter_mut() {
            player.notify(&event).await;
        }
        self.emit(event);
    }
}

/// Seating phase: match exists, only slot A has paid in.
impl Engine<Seating> {
    /// Create the match on the ledger with slot A's deposit.
    pub async fn open(
        ledger: Arc<dyn Ledger>,
        rules: Rules,
        players: [Box<dyn Strategy>; 2],
        events: Option<UnboundedSender<Event>>,
    ) -> Result<Self, LedgerError> {
        let id = ledger.create(rules.deposit).await?;
        let mut engine = Self {
            id,
            rules,
            ledger,
            players,
            history: Vec::new(),
            seats: [
                Seat {
                    balance: rules.deposit,
                    wins: 0,
                },
                Seat::default(),
            ],
            events,
            phase: PhantomData,
        };
        log::info!(
            "[engine] #{} opened: {} (A) vs {} (B)",
            id,
            engine.players[0].name(),
            engine.players[1].name()
        );
        for slot in Slot::both() {
            engine.players[slot.index()]
                .notify(&Event::Seated { id, slot })
                .await;
        }
        engine.emit(Event::Opened { id, rules });
        Ok(engine)
    }
    /// Escrow slot B's deposit and move to bidding.
    pub async fn join(mut self) -> Result<Engine<Bidding>, LedgerError> {
        self.ledger.join(self.id, self.rules.deposit).await?;
        self.seats = self.ledger.state(self.id).await?.seats;
        log::info!("[engine] #{} joined", self.id);
        let mut engine = self.shift::<Bidding>();
        engine.broadcast(Event::Started { id: engine.id }).await;
        Ok(engine)
    }
}

/// Bidding phase: one call to [`Engine::play`] per round.
impl Engine<Bidding> {
    /// Play the ledger's current round. Returns `None` without touching the
    /// ledger if the match is already complete.
    pub async fn play(&mut self) -> Result<Option<RoundRecord>, LedgerError> {
        let id = self.id;
        let snapshot = self.ledger.state(id).await?;
        self.seats = snapshot.seats;
        match snapshot.status {
            Status::Active => {}
            Status::Completed => {
                log::debug!("[engine] #{} already complete", id);
                return Ok(None);
            }
            status => return Err(LedgerError::Status { id, status }),
        }
        let round = snapshot.round;
        log::debug!("[engine] #{} round {} ({})", id, round, snapshot);
        self.emit(Event::RoundStart {
            id,
            round,
            snapshot,
        });
        if snapshot.is_exhausted() {
            log::debug!("[engine] #{} both balances exhausted, passing", id);
        }
        let decisions = self.decide(&snapshot).await;
        for (slot, decision) in Slot::both().into_iter().zip(decisions.iter()) {
            log::debug!("[engine] #{} {} decided {}", id, slot, decision);
            self.emit(Event::Decided {
                id,
                round,
                slot,
                decision: decision.clone(),
            });
        }
        let ballots = decisions.each_ref().map(|d| Ballot::seal(d.bid()));
        let [a, b] = ballots;
        tokio::try_join!(
            self.ledger.commit(id, Slot::A, a.commitment()),
            self.ledger.commit(id, Slot::B, b.commitment())
        )?;
        log::trace!("[engine] #{} round {} committed", id, round);
        tokio::try_join!(
            self.ledger.reveal(id, Slot::A, a.bid(), a.nonce()),
            self.ledger.reveal(id, Slot::B, b.bid(), b.nonce())
        )?;
        let settled = self.ledger.state(id).await?;
        self.seats = settled.seats;
        let record = RoundRecord::new(round, [a.bid(), b.bid()], settled.balances());
        self.history.push(record);
        log::info!("[engine] #{} {}", id, record);
        self.broadcast(Event::RoundEnd { id, record }).await;
        Ok(Some(record))
    }
    /// Read the final state once every round has been played.
    pub async fn conclude(mut self) -> Result<Engine<Finished>, LedgerError> {
        let id = self.id;
        let snapshot = self.ledger.state(id).await?;
        self.seats = snapshot.seats;
        if snapshot.status != Status::Completed {
            return Err(LedgerError::Status {
                id,
                status: snapshot.status,
            });
        }
        let mut engine = self.shift::<Finished>();
        let result = engine.result();
        log::info!("[engine] #{} {}", id, result);
        engine.broadcast(Event::Finished { id, result }).await;
        Ok(engine)
    }
    async fn decide(&mut self, snapshot: &Snapshot) -> [Decision; 2] {
        let views = Slot::both().map(|slot| AgentView::observe(slot, snapshot, &self.history, self.rules));
        let [a, b] = &mut self.players;
        let (x, y) = tokio::join!(ask(a, Slot::A, &views[0]), ask(b, Slot::B, &views[1]));
        [x, y]
    }
}

/// Finished phase: the verdict is final.
impl Engine<Finished> {
    pub fn result(&self) -> MatchResult {
        MatchResult::new(self.seats, self.history.clone())
    }
}

/// Ask one player, skipping players with nothing left to bid and clamping
/// whatever comes back into the legal range.
async fn ask(player: &mut Box<dyn Strategy>, slot: Slot, view: &AgentView) -> Decision {
    if view.balance() == 0 {
        log::debug!("[engine] {} ({}) has no balance, bidding 0", slot, player.name());
        return Decision::forfeit("no balance");
    }
    let decision = player.decide(view).await;
    let bid = view.clamp(decision.bid());
    if bid != decision.bid() {
        log::warn!(
            "[engine] {} ({}) bid {} outside 0..={}, clamped to {}",
            slot,
            player.name(),
            decision.bid(),
            view.ceiling(),
            bid
        );
    }
    decision.with_bid(bid)
}
