use crate::address::Address;

/// Saturating counters never exceed this ceiling (`spec.md` section 3).
pub const COUNTER_CEILING: u8 = 2;

/// The reconciled per-user aggregate that drives condition acknowledgments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatus {
    pub user_address:          Address,
    pub candidate_reg_lt:      i64,
    pub participant_reg_lt:    i64,
    pub white_minted:          u8,
    pub white_processed_lt:    i64,
    pub black_purchased:       u8,
    pub black_processed_lt:    i64,
    pub last_deployed_unix_time: i64
}

impl UserStatus {
    /// A freshly created status for a user who has just registered as a
    /// candidate; every other counter starts at zero.
    pub fn new_candidate(user_address: Address, candidate_reg_lt: i64) -> Self {
        Self {
            user_address,
            candidate_reg_lt,
            participant_reg_lt: 0,
            white_minted: 0,
            white_processed_lt: 0,
            black_purchased: 0,
            black_processed_lt: 0,
            last_deployed_unix_time: 0
        }
    }

    /// Saturating-add `delta` tickets to `white_minted`, ceiling at
    /// [`COUNTER_CEILING`].
    pub fn add_white_minted(&mut self, delta: u8) {
        self.white_minted = self.white_minted.saturating_add(delta).min(COUNTER_CEILING);
    }

    /// Saturating-add `delta` tickets to `black_purchased`, ceiling at
    /// [`COUNTER_CEILING`].
    pub fn add_black_purchased(&mut self, delta: u8) {
        self.black_purchased = self.black_purchased.saturating_add(delta).min(COUNTER_CEILING);
    }
}
