use cosmwasm_std::{Addr, BankMsg, Coin, Deps, Env};

use crate::error::ContractError;

/// Builds the transfer of the whole pool to the winner.
///
/// The contract's own bank balance is checked first, so a pool the contract cannot cover
/// fails the draw completion before anything is written. If the bank send still fails on
/// chain, the host reverts the whole transaction and the round stays calculating.
pub fn payout(
    deps: Deps,
    env: &Env,
    recipient: &Addr,
    amount: Coin,
) -> Result<BankMsg, ContractError> {
    let available = deps
        .querier
        .query_balance(&env.contract.address, &amount.denom)?
        .amount;
    if available < amount.amount {
        return Err(ContractError::PayoutFailed {
            recipient: recipient.to_string(),
            amount,
            available,
        });
    }
    Ok(BankMsg::Send {
        to_address: recipient.to_string(),
        amount: vec![amount],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies_with_balance, mock_env};
    use cosmwasm_std::{coin, coins, Uint128};

    const DENOM: &str = "uraffle";

    #[test]
    fn payout_sends_full_amount() {
        let deps = mock_dependencies_with_balance(&coins(6_000_000, DENOM));
        let winner = Addr::unchecked("winner");
        let msg = payout(deps.as_ref(), &mock_env(), &winner, coin(6_000_000, DENOM)).unwrap();
        assert_eq!(
            msg,
            BankMsg::Send {
                to_address: "winner".to_string(),
                amount: coins(6_000_000, DENOM),
            }
        );
    }

    #[test]
    fn payout_fails_when_contract_cannot_cover_pool() {
        let deps = mock_dependencies_with_balance(&coins(5_999_999, DENOM));
        let winner = Addr::unchecked("winner");
        let err = payout(deps.as_ref(), &mock_env(), &winner, coin(6_000_000, DENOM)).unwrap_err();
        assert_eq!(
            err,
            ContractError::PayoutFailed {
                recipient: "winner".to_string(),
                amount: coin(6_000_000, DENOM),
                available: Uint128::new(5_999_999),
            }
        );
    }
}
