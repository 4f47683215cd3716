//! DTO <-> domain conversions. `sqlx::FromRow` derives on these wire shapes
//! rather than on `oracle_types` directly, mirroring the `Transaction`
//! model / DTO split in `oracle-chain` — domain types stay storage-agnostic.

use oracle_types::{Address, TouchScope};

use crate::error::StoreError;

pub const GLOBAL_SCOPE_SENTINEL: &str = "-";

pub fn scope_to_db(scope: TouchScope) -> String {
    match scope {
        TouchScope::Global => GLOBAL_SCOPE_SENTINEL.to_owned(),
        TouchScope::User(address) => address.to_raw()
    }
}

pub fn scope_from_db(raw: &str) -> Result<TouchScope, StoreError> {
    if raw == GLOBAL_SCOPE_SENTINEL {
        return Ok(TouchScope::Global);
    }
    Address::from_raw(raw)
        .map(TouchScope::User)
        .map_err(|err| StoreError::CorruptRow(format!("touch scope {raw:?}: {err}")))
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActionRow {
    pub kind:            String,
    pub user_address:    String,
    pub related_address: String,
    pub tx_hash:         String,
    pub tx_lt:           i64,
    pub tx_unix_time:    i64
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TouchRow {
    pub kind:  String,
    pub scope: String,
    pub tx_lt: i64
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusRow {
    pub user_address:            String,
    pub candidate_reg_lt:        i64,
    pub participant_reg_lt:      i64,
    pub white_minted:            i16,
    pub white_processed_lt:      i64,
    pub black_purchased:         i16,
    pub black_processed_lt:      i64,
    pub last_deployed_unix_time: i64
}

pub mod convert {
    use oracle_types::{ActionKind, UserAction, UserActionTouch, UserStatus};

    use super::*;

    pub fn action_to_row(action: &UserAction) -> ActionRow {
        ActionRow {
            kind:            action.kind.as_str().to_owned(),
            user_address:    action.user_address.to_raw(),
            related_address: action.related_address.to_raw(),
            tx_hash:         hex::encode(action.tx_hash),
            tx_lt:           action.tx_lt,
            tx_unix_time:    action.tx_unix_time
        }
    }

    pub fn row_to_action(row: ActionRow) -> Result<UserAction, StoreError> {
        let kind: ActionKind = row
            .kind
            .parse()
            .map_err(|err| StoreError::CorruptRow(format!("action kind {:?}: {err}", row.kind)))?;
        let user_address = Address::from_raw(&row.user_address)
            .map_err(|err| StoreError::CorruptRow(format!("user_address {:?}: {err}", row.user_address)))?;
        let related_address = Address::from_raw(&row.related_address)
            .map_err(|err| StoreError::CorruptRow(format!("related_address {:?}: {err}", row.related_address)))?;
        let tx_hash_bytes = hex::decode(&row.tx_hash)
            .map_err(|err| StoreError::CorruptRow(format!("tx_hash {:?}: {err}", row.tx_hash)))?;
        let tx_hash: [u8; 32] = tx_hash_bytes
            .try_into()
            .map_err(|_| StoreError::CorruptRow("tx_hash is not 32 bytes".into()))?;
        Ok(UserAction { kind, user_address, related_address, tx_hash, tx_lt: row.tx_lt, tx_unix_time: row.tx_unix_time })
    }

    pub fn touch_to_row(touch: &UserActionTouch) -> TouchRow {
        TouchRow { kind: touch.kind.as_str().to_owned(), scope: scope_to_db(touch.scope), tx_lt: touch.tx_lt }
    }

    pub fn row_to_touch(row: TouchRow) -> Result<UserActionTouch, StoreError> {
        let kind: ActionKind = row
            .kind
            .parse()
            .map_err(|err| StoreError::CorruptRow(format!("touch kind {:?}: {err}", row.kind)))?;
        let scope = scope_from_db(&row.scope)?;
        Ok(UserActionTouch { kind, scope, tx_lt: row.tx_lt })
    }

    pub fn status_to_row(status: &UserStatus) -> StatusRow {
        StatusRow {
            user_address:            status.user_address.to_raw(),
            candidate_reg_lt:        status.candidate_reg_lt,
            participant_reg_lt:      status.participant_reg_lt,
            white_minted:            status.white_minted as i16,
            white_processed_lt:      status.white_processed_lt,
            black_purchased:         status.black_purchased as i16,
            black_processed_lt:      status.black_processed_lt,
            last_deployed_unix_time: status.last_deployed_unix_time
        }
    }

    pub fn row_to_status(row: StatusRow) -> Result<UserStatus, StoreError> {
        let user_address = Address::from_raw(&row.user_address)
            .map_err(|err| StoreError::CorruptRow(format!("user_address {:?}: {err}", row.user_address)))?;
        Ok(UserStatus {
            user_address,
            candidate_reg_lt: row.candidate_reg_lt,
            participant_reg_lt: row.participant_reg_lt,
            white_minted: row.white_minted as u8,
            white_processed_lt: row.white_processed_lt,
            black_purchased: row.black_purchased as u8,
            black_processed_lt: row.black_processed_lt,
            last_deployed_unix_time: row.last_deployed_unix_time
        })
    }
}
