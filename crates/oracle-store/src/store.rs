use async_trait::async_trait;
use oracle_types::{Address, ActionKind, TouchScope, UserAction, UserActionTouch, UserStatus};

use crate::error::StoreError;

/// Durable mapping of user status, actions, and per-source high-water
/// marks (`spec.md` §4.1). Every operation is total and atomic with
/// respect to itself; the store never retries on failure — that's the
/// caller's job (collectors/reconciler propagate `StoreError` up to the
/// orchestrator, which aborts the current cycle).
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the stored LT for `(kind, scope)`, or 0 if never written.
    async fn get_touch(&self, kind: ActionKind, scope: TouchScope) -> Result<i64, StoreError>;

    /// Upserts on `(kind, scope)`, writing `tx_lt` unconditionally. The
    /// caller guarantees monotonicity (`spec.md` §8's "monotone touches"
    /// invariant is a caller contract, not enforced here).
    async fn put_touch(&self, touch: UserActionTouch) -> Result<(), StoreError>;

    /// Batched upsert on the `(kind, user_address, related_address)`
    /// uniqueness key; `tx_lt`/`tx_hash` are refreshed on replay.
    async fn append_actions(&self, actions: &[UserAction]) -> Result<(), StoreError>;

    async fn get_actions(&self, kind: ActionKind) -> Result<Vec<UserAction>, StoreError>;

    /// `CANDIDATE_REG` actions whose `user_address` has no `UserStatus` row.
    async fn get_pending_candidate_regs(&self) -> Result<Vec<UserAction>, StoreError>;

    /// `PARTICIPANT_REG` actions; replays are tolerated since the
    /// reconciler's participant sync is idempotent (`spec.md` §4.1).
    async fn get_pending_participant_regs(&self) -> Result<Vec<UserAction>, StoreError>;

    /// `WHITE_MINT` actions whose `tx_lt` strictly exceeds the user's
    /// `white_processed_lt` (or where no status row exists yet).
    async fn get_pending_white_mints(&self) -> Result<Vec<UserAction>, StoreError>;

    /// `BLACK_PURCHASE` actions whose `tx_lt` strictly exceeds the user's
    /// `black_processed_lt`. Strictly-greater, matching white-mint
    /// (`spec.md` §4.1's open question, resolved in `SPEC_FULL.md` §9).
    async fn get_pending_black_purchases(&self) -> Result<Vec<UserAction>, StoreError>;

    async fn get_status(&self, address: &Address) -> Result<Option<UserStatus>, StoreError>;

    async fn get_statuses(&self, addresses: &[Address]) -> Result<Vec<UserStatus>, StoreError>;

    /// Statuses where both saturating counters equal 2.
    async fn get_statuses_conditions_reached(&self) -> Result<Vec<UserStatus>, StoreError>;

    async fn upsert_status(&self, status: &UserStatus) -> Result<(), StoreError>;

    async fn upsert_statuses(&self, statuses: &[UserStatus]) -> Result<(), StoreError>;
}
