//! Ledger Service
//!
//! Async front for a [`Ledger`] shared between tasks. Writes are serialized
//! behind one lock so each operation runs to completion before the next is
//! observed; every committed notification is re-published on a broadcast
//! channel for subscribers.

use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::core::amount::Amount;
use crate::ledger::{
    BetId, CallContext, EntropySource, Ledger, LedgerEvent, LedgerResult, LedgerSnapshot, MatchId,
    Outcome, Score, ValueTransfer,
};

/// Broadcast buffer size.
const EVENT_CHANNEL_CAPACITY: usize = 256;

struct Inner<E, T> {
    ledger: Ledger<E>,
    transfer: T,
}

/// Shared ledger plus the transfer primitive it pays through.
pub struct LedgerService<E, T> {
    inner: RwLock<Inner<E, T>>,
    event_tx: broadcast::Sender<LedgerEvent>,
}

impl<E, T> LedgerService<E, T>
where
    E: EntropySource,
    T: ValueTransfer,
{
    /// Wrap a deployed ledger.
    pub fn new(ledger: Ledger<E>, transfer: T) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(Inner { ledger, transfer }),
            event_tx,
        }
    }

    /// Receive every notification committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.event_tx.subscribe()
    }

    /// Run a read-only query against the ledger.
    pub async fn read<R>(&self, f: impl FnOnce(&Ledger<E>) -> R) -> R {
        let inner = self.inner.read().await;
        f(&inner.ledger)
    }

    /// Run a read-only query against the transfer primitive.
    pub async fn read_transfer<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let inner = self.inner.read().await;
        f(&inner.transfer)
    }

    /// Capture a snapshot under the read lock.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.read(|ledger| ledger.snapshot()).await
    }

    /// See [`Ledger::generate_fixtures`].
    pub async fn generate_fixtures(&self, ctx: CallContext) -> LedgerResult<Vec<MatchId>> {
        self.apply(|ledger, _| ledger.generate_fixtures(&ctx)).await
    }

    /// See [`Ledger::resolve_fixtures`].
    pub async fn resolve_fixtures(
        &self,
        ctx: CallContext,
        ids: Vec<MatchId>,
    ) -> LedgerResult<Vec<(MatchId, Score)>> {
        self.apply(|ledger, _| ledger.resolve_fixtures(&ctx, &ids)).await
    }

    /// See [`Ledger::place_bet`].
    pub async fn place_bet(
        &self,
        ctx: CallContext,
        match_ids: Vec<MatchId>,
        predictions: Vec<Outcome>,
    ) -> LedgerResult<BetId> {
        self.apply(|ledger, _| ledger.place_bet(&ctx, &match_ids, &predictions)).await
    }

    /// See [`Ledger::claim`].
    pub async fn claim(&self, ctx: CallContext, bet_id: BetId) -> LedgerResult<Amount> {
        self.apply(|ledger, transfer| ledger.claim(&ctx, bet_id, transfer)).await
    }

    /// See [`Ledger::fund`].
    pub async fn fund(&self, ctx: CallContext) -> LedgerResult<Amount> {
        self.apply(|ledger, _| ledger.fund(&ctx)).await
    }

    /// See [`Ledger::withdraw`].
    pub async fn withdraw(&self, ctx: CallContext, amount: Amount) -> LedgerResult<()> {
        self.apply(|ledger, transfer| ledger.withdraw(&ctx, amount, transfer)).await
    }

    /// Run one write under the lock and publish what it committed.
    async fn apply<R>(
        &self,
        op: impl FnOnce(&mut Ledger<E>, &mut T) -> LedgerResult<R>,
    ) -> LedgerResult<R> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let seq = inner.ledger.events().last_seq();

        let result = op(&mut inner.ledger, &mut inner.transfer);
        match &result {
            Ok(_) => {
                for event in inner.ledger.events().since(seq) {
                    // No subscribers is not an error
                    let _ = self.event_tx.send(event.clone());
                }
            }
            Err(e) => debug!("Ledger operation rejected: {}", e),
        }
        result
    }
}
