use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, HexBinary, Timestamp, Uint128};
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    /// Minimum payment required to enter a round. Its denom is the pool denom.
    pub entrance_fee: Coin,
    /// Minimum number of seconds between two draws
    pub interval: u64,
    /// The randomness provider contract, the only address allowed to deliver random words
    pub provider: Addr,
    // Opaque parameters forwarded to the provider with every request
    pub key_hash: HexBinary,
    pub subscription_id: u64,
    pub callback_gas_limit: u64,
    pub request_confirmations: u16,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum RaffleState {
    Open,
    Calculating,
}

impl fmt::Display for RaffleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaffleState::Open => write!(f, "open"),
            RaffleState::Calculating => write!(f, "calculating"),
        }
    }
}

/// The one and only round. Every execute message reads and rewrites it as a whole.
#[cw_serde]
pub struct Round {
    pub state: RaffleState,
    /// One slot per entry, in entry order. The same address may appear several times.
    pub participants: Vec<Addr>,
    /// Sum of all payments of the round, in the entrance fee denom
    pub pool_balance: Uint128,
    /// Time of the last round reset
    pub last_draw_timestamp: Timestamp,
    /// Set while calculating, None while open
    pub pending_request_id: Option<u64>,
}

impl Round {
    pub fn new(now: Timestamp) -> Self {
        Round {
            state: RaffleState::Open,
            participants: vec![],
            pool_balance: Uint128::zero(),
            last_draw_timestamp: now,
            pending_request_id: None,
        }
    }
}

pub const CONFIG_KEY: &str = "config";
pub const CONFIG: Item<Config> = Item::new(CONFIG_KEY);

pub const ROUND: Item<Round> = Item::new("round");

/// Overwritten after every draw. Not set before the first one.
pub const RECENT_WINNER: Item<Addr> = Item::new("recent_winner");

/// Last request id handed out. Ids are never reused.
pub const REQUEST_NONCE: Item<u64> = Item::new("request_nonce");
