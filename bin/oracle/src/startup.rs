//! Startup verification and raffle-parameter caching (`spec.md` §4.7): read
//! the three sanity getters once, fatal on failure, then cache `raffleData`
//! for the lifetime of the process.

use oracle_chain::{ChainGateway, StackItem};
use oracle_types::{bits::BitReader, Address, RaffleConditions, RaffleParams};

const RAFFLE_DATA_METHOD: &str = "raffleData";
const RAFFLE_CANDIDATE_ADDRESS_METHOD: &str = "raffleCandidateAddress";
const RAFFLE_PARTICIPANT_ADDRESS_METHOD: &str = "raffleParticipantAddress";

/// Confirms the raffle account actually implements the getters the rest of
/// the process depends on. A failure here is unrecoverable — there is no
/// partial mode where the oracle runs against a contract it can't verify.
pub async fn verify_startup(gateway: &dyn ChainGateway, raffle_address: &Address) -> eyre::Result<()> {
    gateway.exec_getter(raffle_address, RAFFLE_DATA_METHOD, &[]).await?;
    gateway
        .exec_getter(raffle_address, RAFFLE_CANDIDATE_ADDRESS_METHOD, &[StackItem::Address(*raffle_address)])
        .await?;
    gateway.exec_getter(raffle_address, RAFFLE_PARTICIPANT_ADDRESS_METHOD, &[StackItem::Int(1)]).await?;
    Ok(())
}

/// Reads `raffleData` into the read-only parameter cache held for the
/// process lifetime (`spec.md` §3's "Raffle parameters").
///
/// Stack layout follows `examples/original_source/backend/internal/tracker/get_raffle_data.go`:
/// `[0]` and `[1]` are flat ints, `[2]` is a *cell* holding
/// `blackTicketPurchased:int8` then `whiteTicketMinted:int8` (black before
/// white), and the deployment LT/unix-time are the flat ints at `[3]`/`[4]`.
pub async fn fetch_raffle_params(gateway: &dyn ChainGateway, raffle_address: &Address) -> eyre::Result<RaffleParams> {
    let stack = gateway.exec_getter(raffle_address, RAFFLE_DATA_METHOD, &[]).await?;

    let min_candidate_quantity = stack.int_at(0).ok_or_else(|| eyre::eyre!("raffleData: missing min_candidate_quantity"))?;
    let conditions_duration = stack.int_at(1).ok_or_else(|| eyre::eyre!("raffleData: missing conditions_duration"))?;

    let conditions_cell = stack.cell_at(2).ok_or_else(|| eyre::eyre!("raffleData: missing conditions cell"))?;
    let mut conditions_reader = BitReader::new(conditions_cell);
    let black_threshold = conditions_reader
        .read_uint(8)
        .map_err(|_| eyre::eyre!("raffleData: conditions cell too short for black_threshold"))? as u8;
    let white_threshold = conditions_reader
        .read_uint(8)
        .map_err(|_| eyre::eyre!("raffleData: conditions cell too short for white_threshold"))? as u8;

    let min_candidate_reached_lt =
        stack.int_at(3).ok_or_else(|| eyre::eyre!("raffleData: missing min_candidate_reached_lt"))?;
    let min_candidate_reached_unix_time =
        stack.int_at(4).ok_or_else(|| eyre::eyre!("raffleData: missing min_candidate_reached_unix_time"))?;

    Ok(RaffleParams {
        min_candidate_quantity: min_candidate_quantity as u32,
        conditions_duration: conditions_duration as u32,
        conditions: RaffleConditions { white_threshold, black_threshold },
        min_candidate_reached_lt: min_candidate_reached_lt as i64,
        min_candidate_reached_unix_time: min_candidate_reached_unix_time as i64
    })
}
