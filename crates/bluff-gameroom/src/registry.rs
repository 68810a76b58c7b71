use bluff_auction::*;
use bluff_core::*;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

/// One suspended decision: the view the player was shown and the channel
/// that resumes it.
struct Ticket {
    view: AgentView,
    tx: oneshot::Sender<Decision>,
    serial: u64,
}

#[derive(Default)]
struct Tickets {
    open: HashMap<(MatchId, Slot), Ticket>,
    serial: u64,
}

/// Shared table of decisions waiting on something outside the process.
///
/// At most one ticket exists per `(match, slot)`. A ticket resolves exactly
/// once: by [`Registry::submit`], by [`Registry::forfeit`], or by
/// [`Registry::abandon`] when its match is torn down. Cloning is cheap and
/// every clone sees the same table.
#[derive(Clone, Default)]
pub struct Registry {
    tickets: Arc<Mutex<Tickets>>,
}

impl Registry {
    /// Suspend a decision for `(id, slot)` until someone resolves it.
    pub fn park(&self, id: MatchId, slot: Slot, view: AgentView) -> Result<Claim, RegistryError> {
        let mut tickets = self.tickets.lock();
        if tickets.open.contains_key(&(id, slot)) {
            return Err(RegistryError::Occupied { id, slot });
        }
        tickets.serial += 1;
        let serial = tickets.serial;
        let (tx, rx) = oneshot::channel();
        tickets.open.insert((id, slot), Ticket { view, tx, serial });
        log::debug!("[registry] #{} {} awaiting decision", id, slot);
        Ok(Claim {
            registry: self.clone(),
            id,
            slot,
            serial,
            rx,
        })
    }
    /// Resolve a waiting decision. Bids above the balance the player was
    /// shown are rejected and leave the ticket open for another attempt.
    pub fn submit(&self, id: MatchId, slot: Slot, decision: Decision) -> Result<(), RegistryError> {
        let mut tickets = self.tickets.lock();
        let Some(balance) = tickets.open.get(&(id, slot)).map(|t| t.view.balance()) else {
            log::warn!("[registry] #{} {} submission with nothing pending", id, slot);
            return Err(RegistryError::NotAwaited { id, slot });
        };
        if decision.bid() > balance {
            log::warn!("[registry] #{} {} bid {} exceeds balance {}", id, slot, decision.bid(), balance);
            return Err(RegistryError::OutOfRange {
                id,
                slot,
                bid: decision.bid(),
                balance,
            });
        }
        let ticket = tickets
            .open
            .remove(&(id, slot))
            .ok_or(RegistryError::NotAwaited { id, slot })?;
        drop(tickets);
        log::debug!("[registry] #{} {} resolved with {}", id, slot, decision);
        ticket
            .tx
            .send(decision)
            .map_err(|_| RegistryError::Abandoned { id, slot })
    }
    /// Resolve a waiting decision with a zero bid.
    pub fn forfeit(&self, id: MatchId, slot: Slot) -> Result<(), RegistryError> {
        self.submit(id, slot, Decision::forfeit("forfeited"))
    }
    /// Views awaiting a decision in match `id`, ordered by slot.
    pub fn pending(&self, id: MatchId) -> Vec<(Slot, AgentView)> {
        let tickets = self.tickets.lock();
        let mut pending = tickets
            .open
            .iter()
            .filter(|((match_id, _), _)| *match_id == id)
            .map(|((_, slot), ticket)| (*slot, ticket.view.clone()))
            .collect::<Vec<_>>();
        pending.sort_by_key(|(slot, _)| *slot);
        pending
    }
    /// Drop every ticket for match `id`. Waiting claims resolve as
    /// [`RegistryError::Abandoned`].
    pub fn abandon(&self, id: MatchId) -> usize {
        let mut tickets = self.tickets.lock();
        let before = tickets.open.len();
        tickets.open.retain(|(match_id, _), _| *match_id != id);
        let dropped = before - tickets.open.len();
        if dropped > 0 {
            log::debug!("[registry] #{} abandoned {} pending decisions", id, dropped);
        }
        dropped
    }
    pub fn len(&self) -> usize {
        self.tickets.lock().open.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The waiting side of a parked decision. Dropping a claim before it
/// resolves withdraws its ticket.
pub struct Claim {
    registry: Registry,
    id: MatchId,
    slot: Slot,
    serial: u64,
    rx: oneshot::Receiver<Decision>,
}

impl Claim {
    pub async fn wait(mut self) -> Result<Decision, RegistryError> {
        (&mut self.rx).await.map_err(|_| RegistryError::Abandoned {
            id: self.id,
            slot: self.slot,
        })
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        let mut tickets = self.registry.tickets.lock();
        let key = (self.id, self.slot);
        if tickets.open.get(&key).is_some_and(|t| t.serial == self.serial) {
            tickets.open.remove(&key);
            log::debug!("[registry] #{} {} withdrawn", self.id, self.slot);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing is waiting on this match and slot.
    NotAwaited { id: MatchId, slot: Slot },
    /// A decision is already waiting on this match and slot.
    Occupied { id: MatchId, slot: Slot },
    /// Bid exceeds the balance shown to the player.
    OutOfRange {
        id: MatchId,
        slot: Slot,
        bid: Chips,
        balance: Chips,
    },
    /// The match stopped waiting before a decision arrived.
    Abandoned { id: MatchId, slot: Slot },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAwaited { id, slot } => {
                write!(f, "no decision pending for match {} slot {}", id, slot)
            }
            Self::Occupied { id, slot } => {
                write!(f, "decision already pending for match {} slot {}", id, slot)
            }
            Self::OutOfRange {
                id,
                slot,
                bid,
                balance,
            } => write!(
                f,
                "bid {} exceeds balance {} for match {} slot {}",
                bid, balance, id, slot
            ),
            Self::Abandoned { id, slot } => {
                write!(f, "match {} slot {} is no longer waiting", id, slot)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;
    fn view(balance: Chips) -> AgentView {
        AgentView::opening(Rules::default()).with_balance(balance)
    }
    #[tokio::test]
    async fn submit_resumes_waiting_claim() {
        let registry = Registry::default();
        let claim = registry.park(1, Slot::A, view(12)).unwrap();
        registry.submit(1, Slot::A, Decision::new(4, "typed")).unwrap();
        let decision = claim.wait().await.unwrap();
        assert_eq!(decision.bid(), 4);
        assert_eq!(decision.reason(), "typed");
        assert!(registry.is_empty());
    }
    #[tokio::test]
    async fn out_of_range_keeps_ticket_open() {
        let registry = Registry::default();
        let claim = registry.park(7, Slot::A, view(12)).unwrap();
        let refused = registry.submit(7, Slot::A, Decision::new(15, ""));
        assert_eq!(
            refused,
            Err(RegistryError::OutOfRange {
                id: 7,
                slot: Slot::A,
                bid: 15,
                balance: 12
            })
        );
        assert_eq!(registry.pending(7).len(), 1);
        registry.submit(7, Slot::A, Decision::new(9, "")).unwrap();
        assert_eq!(claim.wait().await.unwrap().bid(), 9);
        assert!(registry.pending(7).is_empty());
    }
    #[test]
    fn second_park_is_occupied() {
        let registry = Registry::default();
        let _claim = registry.park(1, Slot::B, view(20)).unwrap();
        assert_eq!(
            registry.park(1, Slot::B, view(20)).err(),
            Some(RegistryError::Occupied { id: 1, slot: Slot::B })
        );
        assert!(registry.park(1, Slot::A, view(20)).is_ok());
    }
    #[test]
    fn submit_without_ticket_is_not_awaited() {
        let registry = Registry::default();
        assert_eq!(
            registry.submit(3, Slot::A, Decision::new(1, "")),
            Err(RegistryError::NotAwaited { id: 3, slot: Slot::A })
        );
    }
    #[tokio::test]
    async fn second_submit_finds_nothing() {
        let registry = Registry::default();
        let claim = registry.park(1, Slot::A, view(20)).unwrap();
        registry.submit(1, Slot::A, Decision::new(2, "")).unwrap();
        assert!(registry.submit(1, Slot::A, Decision::new(3, "")).is_err());
        assert_eq!(claim.wait().await.unwrap().bid(), 2);
    }
    #[tokio::test]
    async fn forfeit_bids_zero() {
        let registry = Registry::default();
        let claim = registry.park(2, Slot::B, view(20)).unwrap();
        registry.forfeit(2, Slot::B).unwrap();
        assert_eq!(claim.wait().await.unwrap().bid(), 0);
    }
    #[tokio::test]
    async fn abandon_releases_only_that_match() {
        let registry = Registry::default();
        let gone = registry.park(1, Slot::A, view(20)).unwrap();
        let _kept = registry.park(2, Slot::A, view(20)).unwrap();
        assert_eq!(registry.abandon(1), 1);
        assert_eq!(
            gone.wait().await,
            Err(RegistryError::Abandoned { id: 1, slot: Slot::A })
        );
        assert_eq!(registry.pending(2).len(), 1);
    }
    #[test]
    fn dropped_claim_withdraws_ticket() {
        let registry = Registry::default();
        let claim = registry.park(5, Slot::A, view(20)).unwrap();
        drop(claim);
        assert!(registry.is_empty());
        assert!(registry.park(5, Slot::A, view(20)).is_ok());
    }
    #[test]
    fn pending_is_scoped_and_ordered() {
        let registry = Registry::default();
        let _b = registry.park(9, Slot::B, view(8)).unwrap();
        let _a = registry.park(9, Slot::A, view(6)).unwrap();
        let _other = registry.park(10, Slot::A, view(20)).unwrap();
        let pending = registry.pending(9);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].0, Slot::A);
        assert_eq!(pending[0].1.balance(), 6);
        assert_eq!(pending[1].1.balance(), 8);
    }
}
