//! `sqlx`-backed [`Store`], following the `query_as::<_, Row>(..).bind(..)
//! .fetch_all(pool)` idiom the pack's point-calculator service uses for its
//! own reconciliation loop.

use async_trait::async_trait;
use oracle_types::{ActionKind, Address, TouchScope, UserAction, UserActionTouch, UserStatus};
use sqlx::PgPool;

use crate::{
    error::StoreError,
    row::{convert, scope_to_db, ActionRow, StatusRow, TouchRow}
};

pub struct PostgresStore {
    pool: PgPool
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await.map_err(|err| StoreError::CorruptRow(err.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl crate::store::Store for PostgresStore {
    async fn get_touch(&self, kind: ActionKind, scope: TouchScope) -> Result<i64, StoreError> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT tx_lt FROM user_action_touches WHERE kind = $1 AND scope = $2")
            .bind(kind.as_str())
            .bind(scope_to_db(scope))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(lt,)| lt).unwrap_or(0))
    }

    async fn put_touch(&self, touch: UserActionTouch) -> Result<(), StoreError> {
        let row = convert::touch_to_row(&touch);
        sqlx::query(
            "INSERT INTO user_action_touches (kind, scope, tx_lt) VALUES ($1, $2, $3) \
             ON CONFLICT (kind, scope) DO UPDATE SET tx_lt = EXCLUDED.tx_lt"
        )
        .bind(row.kind)
        .bind(row.scope)
        .bind(row.tx_lt)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn append_actions(&self, actions: &[UserAction]) -> Result<(), StoreError> {
        if actions.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for action in actions {
            let row = convert::action_to_row(action);
            sqlx::query(
                "INSERT INTO user_actions (kind, user_address, related_address, tx_hash, tx_lt, tx_unix_time) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (kind, user_address, related_address) \
                 DO UPDATE SET tx_hash = EXCLUDED.tx_hash, tx_lt = EXCLUDED.tx_lt, tx_unix_time = EXCLUDED.tx_unix_time"
            )
            .bind(row.kind)
            .bind(row.user_address)
            .bind(row.related_address)
            .bind(row.tx_hash)
            .bind(row.tx_lt)
            .bind(row.tx_unix_time)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn get_actions(&self, kind: ActionKind) -> Result<Vec<UserAction>, StoreError> {
        let rows = sqlx::query_as::<_, ActionRow>("SELECT * FROM user_actions WHERE kind = $1")
            .bind(kind.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(convert::row_to_action).collect()
    }

    async fn get_pending_candidate_regs(&self) -> Result<Vec<UserAction>, StoreError> {
        let rows = sqlx::query_as::<_, ActionRow>(
            "SELECT a.* FROM user_actions a \
             LEFT JOIN user_statuses s ON s.user_address = a.user_address \
             WHERE a.kind = $1 AND s.user_address IS NULL"
        )
        .bind(ActionKind::CandidateReg.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(convert::row_to_action).collect()
    }

    async fn get_pending_participant_regs(&self) -> Result<Vec<UserAction>, StoreError> {
        self.get_actions(ActionKind::ParticipantReg).await
    }

    async fn get_pending_white_mints(&self) -> Result<Vec<UserAction>, StoreError> {
        let rows = sqlx::query_as::<_, ActionRow>(
            "SELECT a.* FROM user_actions a \
             LEFT JOIN user_statuses s ON s.user_address = a.user_address \
             WHERE a.kind = $1 AND (s.user_address IS NULL OR a.tx_lt > s.white_processed_lt)"
        )
        .bind(ActionKind::WhiteMint.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(convert::row_to_action).collect()
    }

    async fn get_pending_black_purchases(&self) -> Result<Vec<UserAction>, StoreError> {
        let rows = sqlx::query_as::<_, ActionRow>(
            "SELECT a.* FROM user_actions a \
             LEFT JOIN user_statuses s ON s.user_address = a.user_address \
             WHERE a.kind = $1 AND (s.user_address IS NULL OR a.tx_lt > s.black_processed_lt)"
        )
        .bind(ActionKind::BlackPurchase.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(convert::row_to_action).collect()
    }

    async fn get_status(&self, address: &Address) -> Result<Option<UserStatus>, StoreError> {
        let row = sqlx::query_as::<_, StatusRow>("SELECT * FROM user_statuses WHERE user_address = $1")
            .bind(address.to_raw())
            .fetch_optional(&self.pool)
            .await?;
        row.map(convert::row_to_status).transpose()
    }

    async fn get_statuses(&self, addresses: &[Address]) -> Result<Vec<UserStatus>, StoreError> {
        if addresses.is_empty() {
            return Ok(vec![]);
        }
        let raw: Vec<String> = addresses.iter().map(Address::to_raw).collect();
        let rows = sqlx::query_as::<_, StatusRow>("SELECT * FROM user_statuses WHERE user_address = ANY($1)")
            .bind(&raw)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(convert::row_to_status).collect()
    }

    async fn get_statuses_conditions_reached(&self) -> Result<Vec<UserStatus>, StoreError> {
        let rows = sqlx::query_as::<_, StatusRow>(
            "SELECT * FROM user_statuses WHERE white_minted = 2 AND black_purchased = 2"
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(convert::row_to_status).collect()
    }

    async fn upsert_status(&self, status: &UserStatus) -> Result<(), StoreError> {
        self.upsert_statuses(std::slice::from_ref(status)).await
    }

    async fn upsert_statuses(&self, statuses: &[UserStatus]) -> Result<(), StoreError> {
        if statuses.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for status in statuses {
            let row: StatusRow = convert::status_to_row(status);
            sqlx::query(
                "INSERT INTO user_statuses \
                 (user_address, candidate_reg_lt, participant_reg_lt, white_minted, white_processed_lt, \
                  black_purchased, black_processed_lt, last_deployed_unix_time) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 ON CONFLICT (user_address) DO UPDATE SET \
                   candidate_reg_lt = EXCLUDED.candidate_reg_lt, \
                   participant_reg_lt = EXCLUDED.participant_reg_lt, \
                   white_minted = EXCLUDED.white_minted, \
                   white_processed_lt = EXCLUDED.white_processed_lt, \
                   black_purchased = EXCLUDED.black_purchased, \
                   black_processed_lt = EXCLUDED.black_processed_lt, \
                   last_deployed_unix_time = EXCLUDED.last_deployed_unix_time"
            )
            .bind(row.user_address)
            .bind(row.candidate_reg_lt)
            .bind(row.participant_reg_lt)
            .bind(row.white_minted)
            .bind(row.white_processed_lt)
            .bind(row.black_purchased)
            .bind(row.black_processed_lt)
            .bind(row.last_deployed_unix_time)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use oracle_types::TouchScope;

    use super::*;
    use crate::row::scope_from_db;

    #[test]
    fn scope_sentinel_round_trips() {
        assert_eq!(scope_to_db(TouchScope::Global), "-");
        assert_eq!(scope_from_db("-").unwrap(), TouchScope::Global);
    }

    #[test]
    fn user_scope_round_trips() {
        let address = Address::new(0, [0x11; 32]);
        let scope = TouchScope::User(address);
        let raw = scope_to_db(scope);
        assert_eq!(scope_from_db(&raw).unwrap(), scope);
    }
}
