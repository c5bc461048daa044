pub mod contract;
mod draw;
mod error;
pub mod msg;
mod payout;
pub mod state;

pub use crate::error::ContractError;
