use super::*;
use bluff_auction::*;
use bluff_core::*;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

/// Per-match book kept by [`MemoryLedger`].
#[derive(Debug, Clone)]
struct Book {
    status: Status,
    round: Round,
    seats: [Seat; 2],
    commits: [Option<Commitment>; 2],
    reveals: [Option<Chips>; 2],
}

impl Book {
    fn open(deposit: Chips) -> Self {
        Self {
            status: Status::Waiting,
            round: 0,
            seats: [
                Seat {
                    balance: deposit,
                    wins: 0,
                },
                Seat::default(),
            ],
            commits: [None; 2],
            reveals: [None; 2],
        }
    }
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            round: self.round,
            seats: self.seats,
        }
    }
    /// Both bids are public: charge both, credit the higher, advance.
    fn settle(&mut self, rules: &Rules) {
        let [Some(a), Some(b)] = self.reveals else {
            return;
        };
        self.seats[0].balance -= a;
        self.seats[1].balance -= b;
        if let Some(slot) = Outcome::resolve(a, b).winner() {
            self.seats[slot.index()].wins += 1;
        }
        self.commits = [None; 2];
        self.reveals = [None; 2];
        if rules.is_final(self.round) {
            self.status = Status::Completed;
        } else {
            self.round += 1;
        }
    }
}

/// In-process ledger with the same rules a hosted escrow enforces.
///
/// Deposits must equal the configured deposit. Each slot commits once and
/// reveals once per round; a reveal must open its commitment and fit both
/// the bid ceiling and the remaining balance. Rounds settle when the second
/// reveal lands, and the match completes after the last round settles.
#[derive(Debug)]
pub struct MemoryLedger {
    rules: Rules,
    books: Mutex<HashMap<MatchId, Book>>,
    counter: AtomicU64,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl MemoryLedger {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            books: Mutex::new(HashMap::new()),
            counter: AtomicU64::new(1),
        }
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    fn expect(&self, deposit: Chips) -> Result<(), LedgerError> {
        match deposit == self.rules.deposit {
            true => Ok(()),
            false => Err(LedgerError::Deposit {
                expected: self.rules.deposit,
                actual: deposit,
            }),
        }
    }
}

fn active(id: MatchId, book: &Book) -> Result<(), LedgerError> {
    match book.status {
        Status::Active => Ok(()),
        status => Err(LedgerError::Status { id, status }),
    }
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn create(&self, deposit: Chips) -> Result<MatchId, LedgerError> {
        self.expect(deposit)?;
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        self.books.lock().await.insert(id, Book::open(deposit));
        log::debug!("[ledger] match {} created", id);
        Ok(id)
    }
    async fn join(&self, id: MatchId, deposit: Chips) -> Result<(), LedgerError> {
        self.expect(deposit)?;
        let mut books = self.books.lock().await;
        let book = books.get_mut(&id).ok_or(LedgerError::Unknown(id))?;
        match book.status {
            Status::Waiting => {
                book.seats[Slot::B.index()].balance = deposit;
                book.status = Status::Active;
                book.round = 1;
                log::debug!("[ledger] match {} joined", id);
                Ok(())
            }
            status => Err(LedgerError::Status { id, status }),
        }
    }
    async fn commit(&self, id: MatchId, slot: Slot, commitment: Commitment) -> Result<(), LedgerError> {
        let mut books = self.books.lock().await;
        let book = books.get_mut(&id).ok_or(LedgerError::Unknown(id))?;
        active(id, book)?;
        if book.commits[slot.index()].is_some() {
            return Err(LedgerError::Duplicate { id, slot });
        }
        book.commits[slot.index()] = Some(commitment);
        log::trace!("[ledger] match {} slot {} committed {}", id, slot, commitment);
        Ok(())
    }
    async fn reveal(&self, id: MatchId, slot: Slot, bid: Chips, nonce: Nonce) -> Result<(), LedgerError> {
        let mut books = self.books.lock().await;
        let book = books.get_mut(&id).ok_or(LedgerError::Unknown(id))?;
        active(id, book)?;
        let [Some(a), Some(b)] = book.commits else {
            return Err(LedgerError::Premature { id, slot });
        };
        if book.reveals[slot.index()].is_some() {
            return Err(LedgerError::Duplicate { id, slot });
        }
        let commitment = match slot {
            Slot::A => a,
            Slot::B => b,
        };
        if !commitment.opens(bid, &nonce) {
            return Err(LedgerError::Mismatch { id, slot });
        }
        if !self.rules.is_legal(bid, book.seats[slot.index()].balance) {
            return Err(LedgerError::Overdraft { id, slot, bid });
        }
        book.reveals[slot.index()] = Some(bid);
        book.settle(&self.rules);
        log::trace!("[ledger] match {} slot {} revealed {}", id, slot, bid);
        Ok(())
    }
    async fn cancel(&self, id: MatchId) -> Result<(), LedgerError> {
        let mut books = self.books.lock().await;
        let book = books.get_mut(&id).ok_or(LedgerError::Unknown(id))?;
        match book.status {
            Status::Waiting => {
                book.status = Status::Cancelled;
                log::debug!("[ledger] match {} cancelled", id);
                Ok(())
            }
            status => Err(LedgerError::Status { id, status }),
        }
    }
    async fn state(&self, id: MatchId) -> Result<Snapshot, LedgerError> {
        self.books
            .lock()
            .await
            .get(&id)
            .map(Book::snapshot)
            .ok_or(LedgerError::Unknown(id))
    }
    async fn forget(&self, id: MatchId) -> Result<(), LedgerError> {
        let mut books = self.books.lock().await;
        let book = books.get(&id).ok_or(LedgerError::Unknown(id))?;
        match book.status {
            Status::Completed | Status::Cancelled => {
                books.remove(&id);
                log::debug!("[ledger] match {} forgotten", id);
                Ok(())
            }
            status => Err(LedgerError::Status { id, status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    async fn opened(ledger: &MemoryLedger) -> MatchId {
        let id = ledger.create(DEPOSIT).await.unwrap();
        ledger.join(id, DEPOSIT).await.unwrap();
        id
    }
    async fn round(ledger: &MemoryLedger, id: MatchId, a: Chips, b: Chips) {
        let (x, y) = (Ballot::seal(a), Ballot::seal(b));
        ledger.commit(id, Slot::A, x.commitment()).await.unwrap();
        ledger.commit(id, Slot::B, y.commitment()).await.unwrap();
        ledger.reveal(id, Slot::A, a, x.nonce()).await.unwrap();
        ledger.reveal(id, Slot::B, b, y.nonce()).await.unwrap();
    }
    #[tokio::test]
    async fn lifecycle_waiting_active_completed() {
        let ledger = MemoryLedger::default();
        let id = ledger.create(DEPOSIT).await.unwrap();
        assert_eq!(ledger.state(id).await.unwrap().status, Status::Waiting);
        ledger.join(id, DEPOSIT).await.unwrap();
        let state = ledger.state(id).await.unwrap();
        assert_eq!(state.status, Status::Active);
        assert_eq!(state.round, 1);
        for _ in 0..ROUNDS {
            round(&ledger, id, 1, 0).await;
        }
        let state = ledger.state(id).await.unwrap();
        assert_eq!(state.status, Status::Completed);
        assert_eq!(state.wins(), [5, 0]);
        assert_eq!(state.balances(), [15, 20]);
    }
    #[tokio::test]
    async fn both_bids_are_charged() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        round(&ledger, id, 3, 4).await;
        let state = ledger.state(id).await.unwrap();
        assert_eq!(state.balances(), [17, 16]);
        assert_eq!(state.wins(), [0, 1]);
        assert_eq!(state.round, 2);
    }
    #[tokio::test]
    async fn tie_awards_nobody() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        round(&ledger, id, 2, 2).await;
        assert_eq!(ledger.state(id).await.unwrap().wins(), [0, 0]);
    }
    #[tokio::test]
    async fn reveal_waits_for_both_commits() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        let ballot = Ballot::seal(2);
        ledger.commit(id, Slot::A, ballot.commitment()).await.unwrap();
        let early = ledger.reveal(id, Slot::A, 2, ballot.nonce()).await;
        assert_eq!(early, Err(LedgerError::Premature { id, slot: Slot::A }));
    }
    #[tokio::test]
    async fn double_commit_is_refused() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        let ballot = Ballot::seal(2);
        ledger.commit(id, Slot::B, ballot.commitment()).await.unwrap();
        let again = ledger.commit(id, Slot::B, ballot.commitment()).await;
        assert_eq!(again, Err(LedgerError::Duplicate { id, slot: Slot::B }));
    }
    #[tokio::test]
    async fn reveal_must_open_commitment() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        let (x, y) = (Ballot::seal(2), Ballot::seal(1));
        ledger.commit(id, Slot::A, x.commitment()).await.unwrap();
        ledger.commit(id, Slot::B, y.commitment()).await.unwrap();
        let lie = ledger.reveal(id, Slot::A, 3, x.nonce()).await;
        assert_eq!(lie, Err(LedgerError::Mismatch { id, slot: Slot::A }));
    }
    #[tokio::test]
    async fn reveal_above_ceiling_is_refused() {
        let ledger = MemoryLedger::default();
        let id = opened(&ledger).await;
        let (x, y) = (Ballot::seal(MAX_BID + 1), Ballot::seal(1));
        ledger.commit(id, Slot::A, x.commitment()).await.unwrap();
        ledger.commit(id, Slot::B, y.commitment()).await.unwrap();
        let greedy = ledger.reveal(id, Slot::A, MAX_BID + 1, x.nonce()).await;
        assert!(matches!(greedy, Err(LedgerError::Overdraft { .. })));
    }
    #[tokio::test]
    async fn cancel_only_while_waiting() {
        let ledger = MemoryLedger::default();
        let id = ledger.create(DEPOSIT).await.unwrap();
        ledger.cancel(id).await.unwrap();
        assert_eq!(ledger.state(id).await.unwrap().status, Status::Cancelled);
        assert!(ledger.join(id, DEPOSIT).await.is_err());
        let live = opened(&ledger).await;
        assert!(matches!(
            ledger.cancel(live).await,
            Err(LedgerError::Status { status: Status::Active, .. })
        ));
    }
    #[tokio::test]
    async fn only_settled_matches_are_forgotten() {
        let ledger = MemoryLedger::default();
        let live = opened(&ledger).await;
        assert!(matches!(
            ledger.forget(live).await,
            Err(LedgerError::Status { status: Status::Active, .. })
        ));
        for _ in 0..ROUNDS {
            round(&ledger, live, 1, 0).await;
        }
        ledger.forget(live).await.unwrap();
        assert_eq!(ledger.state(live).await, Err(LedgerError::Unknown(live)));
        let idle = ledger.create(DEPOSIT).await.unwrap();
        ledger.cancel(idle).await.unwrap();
        ledger.forget(idle).await.unwrap();
        assert_eq!(ledger.forget(idle).await, Err(LedgerError::Unknown(idle)));
    }
    #[tokio::test]
    async fn wrong_deposit_is_refused() {
        let ledger = MemoryLedger::default();
        assert!(matches!(
            ledger.create(DEPOSIT + 1).await,
            Err(LedgerError::Deposit { .. })
        ));
    }
    #[tokio::test]
    async fn unknown_match_is_reported() {
        let ledger = MemoryLedger::default();
        assert_eq!(ledger.state(42).await, Err(LedgerError::Unknown(42)));
    }
}
