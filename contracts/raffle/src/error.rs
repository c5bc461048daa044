use thiserror::Error;

use cosmwasm_std::{Coin, OverflowError, StdError, Uint128};

use crate::state::RaffleState;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Provider address is not valid")]
    InvalidProviderAddress,

    #[error("Insufficient payment: required {required}, paid {paid}")]
    InsufficientPayment { required: Coin, paid: Uint128 },

    #[error("Unexpected denom {denom:?} sent along with the entrance fee")]
    UnexpectedDenom { denom: String },

    #[error("Raffle is not open")]
    LotteryNotOpen,

    #[error("Upkeep not needed: balance {balance}, players {num_players}, state {state}")]
    UpkeepNotNeeded {
        balance: Uint128,
        num_players: u64,
        state: RaffleState,
    },

    // callback should only be allowed to be called by the randomness provider
    // otherwise anyone can pick the winner by sending their own random words
    #[error("Unauthorized randomness callback")]
    UnauthorizedCallback,

    #[error("Unknown or stale randomness request {request_id}")]
    UnknownOrStaleRequest { request_id: u64 },

    #[error("Received invalid randomness")]
    InvalidRandomness,

    #[error("Payout of {amount} to {recipient} failed, contract holds {available}")]
    PayoutFailed {
        recipient: String,
        amount: Coin,
        available: Uint128,
    },

    #[error("Cannot migrate from different contract type: {previous_contract}")]
    CannotMigrate { previous_contract: String },
}
