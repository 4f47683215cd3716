use oracle_types::Lt;

/// `spec.md` §6's `GlobalDeployedTimeout`: minimum gap between two
/// `SetConditionMessage` sends for the same user.
pub const GLOBAL_DEPLOYED_TIMEOUT_SECONDS: Lt = 300;
