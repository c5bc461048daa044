#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure_eq, to_binary, Attribute, Coin, Deps, DepsMut, Env, Event, MessageInfo, QueryResponse,
    Response, StdResult, Uint128, Uint256, WasmMsg,
};
use cw2::{get_contract_version, set_contract_version};

use crate::draw::{check_upkeep, select_winner};
use crate::error::ContractError;
use crate::msg::{
    CheckUpkeepResponse, ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg,
    PendingRequestResponse, PlayerResponse, ProviderExecuteMsg, QueryMsg, RecentWinnerResponse,
};
use crate::payout::payout;
use crate::state::{Config, RaffleState, Round, CONFIG, RECENT_WINNER, REQUEST_NONCE, ROUND};

const CONTRACT_NAME: &str = "crates.io:raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A draw always asks the provider for exactly one word
const NUM_WORDS: u32 = 1;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let provider = deps
        .api
        .addr_validate(&msg.provider)
        .map_err(|_| ContractError::InvalidProviderAddress)?;

    let config = Config {
        entrance_fee: msg.entrance_fee,
        interval: msg.interval,
        provider,
        key_hash: msg.key_hash,
        subscription_id: msg.subscription_id,
        callback_gas_limit: msg.callback_gas_limit,
        request_confirmations: msg.request_confirmations,
    };
    CONFIG.save(deps.storage, &config)?;
    ROUND.save(deps.storage, &Round::new(env.block.time))?;
    REQUEST_NONCE.save(deps.storage, &0)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("provider", config.provider)
        .add_attribute("entrance_fee", config.entrance_fee.to_string())
        .add_attribute("interval", config.interval.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute_enter(deps, env, info),
        // Anyone can act as the keeper. The eligibility check protects the round.
        ExecuteMsg::PerformUpkeep {} => execute_perform_upkeep(deps, env, info),
        // FulfillRandomWords should be called by the provider contract only.
        ExecuteMsg::FulfillRandomWords {
            request_id,
            random_words,
        } => execute_fulfill_random_words(deps, env, info, request_id, random_words),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?)?,
        QueryMsg::EntranceFee {} => to_binary(&CONFIG.load(deps.storage)?.entrance_fee)?,
        QueryMsg::Interval {} => to_binary(&CONFIG.load(deps.storage)?.interval)?,
        QueryMsg::RaffleState {} => to_binary(&ROUND.load(deps.storage)?.state)?,
        QueryMsg::Player { index } => to_binary(&query_player(deps, index)?)?,
        QueryMsg::NumberOfPlayers {} => {
            to_binary(&(ROUND.load(deps.storage)?.participants.len() as u64))?
        }
        QueryMsg::PoolBalance {} => to_binary(&ROUND.load(deps.storage)?.pool_balance)?,
        QueryMsg::RecentWinner {} => to_binary(&RecentWinnerResponse {
            winner: RECENT_WINNER.may_load(deps.storage)?,
        })?,
        QueryMsg::LastTimestamp {} => {
            to_binary(&ROUND.load(deps.storage)?.last_draw_timestamp)?
        }
        QueryMsg::PendingRequest {} => to_binary(&PendingRequestResponse {
            request_id: ROUND.load(deps.storage)?.pending_request_id,
        })?,
        QueryMsg::CheckUpkeep {} => to_binary(&query_check_upkeep(deps, env)?)?,
    };
    Ok(response)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let previous = get_contract_version(deps.storage)?;
    if previous.contract != CONTRACT_NAME {
        return Err(ContractError::CannotMigrate {
            previous_contract: previous.contract,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("previous_version", previous.version)
        .add_attribute("version", CONTRACT_VERSION))
}

pub fn execute_enter(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let fee = config.entrance_fee;

    let paid = info
        .funds
        .iter()
        .filter(|coin| coin.denom == fee.denom)
        .try_fold(Uint128::zero(), |acc, coin| acc.checked_add(coin.amount))?;
    if paid < fee.amount {
        return Err(ContractError::InsufficientPayment {
            required: fee,
            paid,
        });
    }
    // Coins of other denoms would end up stuck outside the pool
    if let Some(other) = info.funds.iter().find(|coin| coin.denom != fee.denom) {
        return Err(ContractError::UnexpectedDenom {
            denom: other.denom.clone(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    if round.state != RaffleState::Open {
        return Err(ContractError::LotteryNotOpen);
    }
    round.participants.push(info.sender.clone());
    round.pool_balance = round.pool_balance.checked_add(paid)?;
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_event(Event::new("raffle_enter").add_attribute("participant", info.sender.as_str()))
        .add_attributes(vec![
            Attribute::new("action", "enter"),
            Attribute::new("participant", info.sender),
            Attribute::new("paid", Coin::new(paid.u128(), fee.denom).to_string()),
            Attribute::new("players", round.participants.len().to_string()),
        ]))
}

// This function will close the round and ask the provider for the random words
pub fn execute_perform_upkeep(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = ROUND.load(deps.storage)?;

    let upkeep = check_upkeep(&round, config.interval, env.block.time);
    if !upkeep.upkeep_needed {
        deps.api.debug(&format!(
            "raffle: upkeep not needed: time_passed={} is_open={} has_balance={} has_players={}",
            upkeep.time_passed, upkeep.is_open, upkeep.has_balance, upkeep.has_players
        ));
        return Err(ContractError::UpkeepNotNeeded {
            balance: round.pool_balance,
            num_players: round.participants.len() as u64,
            state: round.state,
        });
    }

    let request_id = REQUEST_NONCE.load(deps.storage)? + 1;
    REQUEST_NONCE.save(deps.storage, &request_id)?;

    round.state = RaffleState::Calculating;
    round.pending_request_id = Some(request_id);
    ROUND.save(deps.storage, &round)?;

    // The request id is needed to know what randomness we are referring to upon reception in the callback.
    let request = WasmMsg::Execute {
        contract_addr: config.provider.into_string(),
        msg: to_binary(&ProviderExecuteMsg::RequestRandomWords {
            request_id,
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_gas_limit: config.callback_gas_limit,
            num_words: NUM_WORDS,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(request)
        .add_event(
            Event::new("raffle_requested").add_attribute("request_id", request_id.to_string()),
        )
        .add_attributes(vec![
            Attribute::new("action", "perform_upkeep"),
            Attribute::new("keeper", info.sender),
            Attribute::new("request_id", request_id.to_string()),
        ]))
}

pub fn execute_fulfill_random_words(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Vec<Uint256>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // callback should only be allowed to be called by the provider contract
    // otherwise anyone can cut the randomness workflow and choose the winner
    ensure_eq!(
        info.sender,
        config.provider,
        ContractError::UnauthorizedCallback
    );

    let round = ROUND.load(deps.storage)?;
    if round.state != RaffleState::Calculating || round.pending_request_id != Some(request_id) {
        return Err(ContractError::UnknownOrStaleRequest { request_id });
    }

    let winner = select_winner(&round.participants, &random_words)?;
    let prize = Coin {
        denom: config.entrance_fee.denom,
        amount: round.pool_balance,
    };
    // Nothing is written before the payout is known to be possible
    let payout_msg = payout(deps.as_ref(), &env, &winner, prize.clone())?;

    RECENT_WINNER.save(deps.storage, &winner)?;
    ROUND.save(deps.storage, &Round::new(env.block.time))?;

    Ok(Response::new()
        .add_message(payout_msg)
        .add_event(
            Event::new("raffle_winner_picked")
                .add_attribute("winner", winner.as_str())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("amount", prize.to_string()),
        )
        .add_attributes(vec![
            Attribute::new("action", "fulfill_random_words"),
            Attribute::new("address", info.sender),
            Attribute::new("request_id", request_id.to_string()),
            Attribute::new("winner", winner),
            Attribute::new("prize", prize.to_string()),
        ]))
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        entrance_fee: config.entrance_fee,
        interval: config.interval,
        provider: config.provider.into(),
        key_hash: config.key_hash,
        subscription_id: config.subscription_id,
        callback_gas_limit: config.callback_gas_limit,
        request_confirmations: config.request_confirmations,
    })
}

fn query_player(deps: Deps, index: u64) -> StdResult<PlayerResponse> {
    let round = ROUND.load(deps.storage)?;
    let player = usize::try_from(index)
        .ok()
        .and_then(|i| round.participants.get(i))
        .cloned();
    Ok(PlayerResponse { player })
}

fn query_check_upkeep(deps: Deps, env: Env) -> StdResult<CheckUpkeepResponse> {
    let config = CONFIG.load(deps.storage)?;
    let round = ROUND.load(deps.storage)?;
    Ok(check_upkeep(&round, config.interval, env.block.time))
}
