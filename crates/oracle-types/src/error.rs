use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("raw address must be in `workchain:hash` form")]
    MalformedRaw,
    #[error("address hash must be exactly 32 bytes of hex")]
    InvalidHash,
    #[error("workchain is not a valid i32")]
    InvalidWorkchain,
    #[error("user-friendly address is not valid base64url")]
    InvalidUserFriendly,
    #[error("user-friendly address must decode to exactly 36 bytes")]
    WrongLength,
    #[error("user-friendly address checksum mismatch")]
    ChecksumMismatch,
    #[error("unrecognized user-friendly address tag byte")]
    UnknownTag,
}
