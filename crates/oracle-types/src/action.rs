use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// The closed set of on-chain events the oracle reconstructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    CandidateReg,
    ParticipantReg,
    WhiteMint,
    BlackPurchase
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] =
        [Self::CandidateReg, Self::ParticipantReg, Self::WhiteMint, Self::BlackPurchase];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CandidateReg => "candidate_reg",
            Self::ParticipantReg => "participant_reg",
            Self::WhiteMint => "white_mint",
            Self::BlackPurchase => "black_purchase"
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate_reg" => Ok(Self::CandidateReg),
            "participant_reg" => Ok(Self::ParticipantReg),
            "white_mint" => Ok(Self::WhiteMint),
            "black_purchase" => Ok(Self::BlackPurchase),
            other => Err(format!("unknown action kind: {other}"))
        }
    }
}

/// A high-water-mark scope: either a single user (per-user collectors) or
/// the account-wide sentinel shared by the candidate/participant/white-mint
/// collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchScope {
    Global,
    User(Address)
}

/// One observed on-chain event, uniquely keyed by `(kind, user_address,
/// related_address)`. Re-observation is an idempotent upsert of
/// `(tx_hash, tx_lt)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAction {
    pub kind:            ActionKind,
    pub user_address:    Address,
    pub related_address: Address,
    pub tx_hash:         [u8; 32],
    pub tx_lt:           i64,
    pub tx_unix_time:    i64
}

/// Persisted high-water mark for `(kind, scope)`. `tx_lt` must never
/// decrease across successive writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserActionTouch {
    pub kind:  ActionKind,
    pub scope: TouchScope,
    pub tx_lt: i64
}
