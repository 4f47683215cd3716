/// The pair of saturating thresholds a user must reach to be acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaffleConditions {
    pub white_threshold: u8,
    pub black_threshold: u8
}

/// Read-only cache of the raffle contract's `raffleData` getter, refreshed
/// once at orchestrator startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaffleParams {
    pub min_candidate_quantity:         u32,
    pub conditions_duration:            u32,
    pub conditions:                     RaffleConditions,
    pub min_candidate_reached_lt:       i64,
    pub min_candidate_reached_unix_time: i64
}

impl RaffleParams {
    /// Whether a user's counters meet both thresholds for a condition
    /// acknowledgment.
    pub fn conditions_reached(&self, white_minted: u8, black_purchased: u8) -> bool {
        white_minted >= self.conditions.white_threshold
            && black_purchased >= self.conditions.black_threshold
    }
}
