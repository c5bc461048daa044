use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, HexBinary, Timestamp, Uint128, Uint256};

use crate::state::RaffleState;

#[cw_serde]
pub struct InstantiateMsg {
    /// Minimum payment to enter a round
    pub entrance_fee: Coin,
    /// Seconds that must pass between two draws
    pub interval: u64,
    /// Address of the randomness provider contract
    pub provider: String,
    /// Provider key hash, forwarded as is
    pub key_hash: HexBinary,
    /// Provider subscription, forwarded as is
    pub subscription_id: u64,
    /// Resource limit for the callback, forwarded as is
    pub callback_gas_limit: u64,
    /// Confirmation depth, forwarded as is
    pub request_confirmations: u16,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Join the current round. The entrance fee is sent as funds.
    Enter {},
    // Called by the keeper once CheckUpkeep reports that a draw is needed.
    // This will trigger the randomness request.
    PerformUpkeep {},
    // Delivery of the random words for `request_id`.
    // Only the randomness provider is allowed to call this.
    FulfillRandomWords {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Message sent to the randomness provider. It is expected to answer later
/// with `ExecuteMsg::FulfillRandomWords` carrying the same `request_id`.
#[cw_serde]
pub enum ProviderExecuteMsg {
    RequestRandomWords {
        request_id: u64,
        key_hash: HexBinary,
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u64,
        num_words: u32,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(Coin)]
    EntranceFee {},
    #[returns(u64)]
    Interval {},
    #[returns(RaffleState)]
    RaffleState {},
    /// The participant in slot `index` of the current round
    #[returns(PlayerResponse)]
    Player { index: u64 },
    #[returns(u64)]
    NumberOfPlayers {},
    #[returns(Uint128)]
    PoolBalance {},
    #[returns(RecentWinnerResponse)]
    RecentWinner {},
    #[returns(Timestamp)]
    LastTimestamp {},
    #[returns(PendingRequestResponse)]
    PendingRequest {},
    /// Side effect free. Keepers may poll this as often as they like.
    #[returns(CheckUpkeepResponse)]
    CheckUpkeep {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub entrance_fee: Coin,
    pub interval: u64,
    pub provider: String,
    pub key_hash: HexBinary,
    pub subscription_id: u64,
    pub callback_gas_limit: u64,
    pub request_confirmations: u16,
}

#[cw_serde]
pub struct PlayerResponse {
    // None when there is no such slot
    pub player: Option<Addr>,
}

#[cw_serde]
pub struct RecentWinnerResponse {
    // None until the first draw completed
    pub winner: Option<Addr>,
}

#[cw_serde]
pub struct PendingRequestResponse {
    pub request_id: Option<u64>,
}

#[cw_serde]
pub struct CheckUpkeepResponse {
    pub upkeep_needed: bool,
    /// At least `interval` seconds passed since the last draw
    pub time_passed: bool,
    pub is_open: bool,
    pub has_balance: bool,
    pub has_players: bool,
}
