use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};

use crate::error::ContractError;
use crate::msg::CheckUpkeepResponse;
use crate::state::{RaffleState, Round};

/// Evaluates the four draw conditions separately so that callers can tell which one is missing.
pub fn check_upkeep(round: &Round, interval: u64, now: Timestamp) -> CheckUpkeepResponse {
    let time_passed =
        now.seconds().saturating_sub(round.last_draw_timestamp.seconds()) >= interval;
    let is_open = round.state == RaffleState::Open;
    let has_balance = !round.pool_balance.is_zero();
    let has_players = !round.participants.is_empty();
    CheckUpkeepResponse {
        upkeep_needed: time_passed && is_open && has_balance && has_players,
        time_passed,
        is_open,
        has_balance,
        has_players,
    }
}

/// Picks the winning slot as `random_words[0] mod participants.len()`.
///
/// The modulo reduction is slightly biased when the number of slots is not a power of two.
/// With a 256 bit word this is negligible for any realistic number of participants.
/// See https://research.kudelskisecurity.com/2020/07/28/the-definitive-guide-to-modulo-bias-and-how-to-avoid-it/
pub fn select_winner(
    participants: &[Addr],
    random_words: &[Uint256],
) -> Result<Addr, ContractError> {
    let word = random_words.first().ok_or(ContractError::InvalidRandomness)?;
    if participants.is_empty() {
        return Err(ContractError::InvalidRandomness);
    }
    let slots = Uint256::from(participants.len() as u128);
    let index =
        Uint128::try_from(*word % slots).map_err(|_| ContractError::InvalidRandomness)?;
    Ok(participants[index.u128() as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<Addr> {
        (0..n).map(|i| Addr::unchecked(format!("player{i}"))).collect()
    }

    fn round(now: Timestamp) -> Round {
        Round {
            state: RaffleState::Open,
            participants: players(2),
            pool_balance: Uint128::new(2_000_000),
            last_draw_timestamp: now,
            pending_request_id: None,
        }
    }

    #[test]
    fn check_upkeep_needs_all_conditions() {
        let start = Timestamp::from_seconds(1_000);
        let later = start.plus_seconds(30);

        let res = check_upkeep(&round(start), 30, later);
        assert_eq!(
            res,
            CheckUpkeepResponse {
                upkeep_needed: true,
                time_passed: true,
                is_open: true,
                has_balance: true,
                has_players: true,
            }
        );

        // interval not elapsed
        let res = check_upkeep(&round(start), 30, start.plus_seconds(29));
        assert!(!res.upkeep_needed);
        assert!(!res.time_passed);
        assert!(res.is_open && res.has_balance && res.has_players);

        // calculating
        let mut r = round(start);
        r.state = RaffleState::Calculating;
        let res = check_upkeep(&r, 30, later);
        assert!(!res.upkeep_needed);
        assert!(!res.is_open);
        assert!(res.time_passed && res.has_balance && res.has_players);

        // empty pool
        let mut r = round(start);
        r.pool_balance = Uint128::zero();
        let res = check_upkeep(&r, 30, later);
        assert!(!res.upkeep_needed);
        assert!(!res.has_balance);
        assert!(res.time_passed && res.is_open && res.has_players);

        // nobody entered
        let mut r = round(start);
        r.participants.clear();
        let res = check_upkeep(&r, 30, later);
        assert!(!res.upkeep_needed);
        assert!(!res.has_players);
        assert!(res.time_passed && res.is_open && res.has_balance);
    }

    #[test]
    fn check_upkeep_handles_clock_before_last_draw() {
        let start = Timestamp::from_seconds(1_000);
        let res = check_upkeep(&round(start), 30, Timestamp::from_seconds(10));
        assert!(!res.time_passed);
    }

    #[test]
    fn select_winner_uses_first_word_modulo_players() {
        let p = players(6);
        let winner = select_winner(&p, &[Uint256::from(17u128)]).unwrap();
        assert_eq!(winner, p[5]);

        // only the first word counts
        let winner = select_winner(&p, &[Uint256::from(6u128), Uint256::from(5u128)]).unwrap();
        assert_eq!(winner, p[0]);

        let big = Uint256::MAX;
        let expected = (big % Uint256::from(6u128)).to_string().parse::<usize>().unwrap();
        assert_eq!(select_winner(&p, &[big]).unwrap(), p[expected]);
    }

    #[test]
    fn select_winner_counts_every_entry_as_a_slot() {
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");
        let p = vec![alice.clone(), alice.clone(), bob.clone()];
        assert_eq!(select_winner(&p, &[Uint256::from(1u128)]).unwrap(), alice);
        assert_eq!(select_winner(&p, &[Uint256::from(2u128)]).unwrap(), bob);
    }

    #[test]
    fn select_winner_rejects_missing_words() {
        let err = select_winner(&players(3), &[]).unwrap_err();
        assert_eq!(err, ContractError::InvalidRandomness);
        let err = select_winner(&[], &[Uint256::from(1u128)]).unwrap_err();
        assert_eq!(err, ContractError::InvalidRandomness);
    }
}
