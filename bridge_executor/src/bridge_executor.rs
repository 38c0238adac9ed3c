use soroban_sdk::{
    log, panic_with_error, Address, BytesN, Env, IntoVal, String, Symbol, TryFromVal, Val,
    Vec,
};

use crate::access_base;
use crate::actions_set;
use crate::config::{
    bump_instance, ActionsSet, ActionsSetExecutedEvent, ActionsSetState, BridgeExecutorError,
    DataKey,
};
use crate::delay_policy;
use crate::dispatcher;

pub(crate) fn initialize(
    env: &Env,
    transport: &Address,
    home_chain_id: u32,
    home_governance_executor: &BytesN<32>,
    native_asset: &Address,
    delay: u64,
    grace_period: u64,
    minimum_delay: u64,
    maximum_delay: u64,
    guardian: &Address,
) {
    if access_base::is_initialized(env) {
        panic_with_error!(env, BridgeExecutorError::AlreadyInitialized);
    }

    if minimum_delay >= maximum_delay {
        panic_with_error!(env, BridgeExecutorError::InvalidInitParams);
    }
    unwrap_or_panic(env, delay_policy::check_grace_period(grace_period));
    unwrap_or_panic(
        env,
        delay_policy::check_bounds(delay, minimum_delay, maximum_delay),
    );

    access_base::set_transport(env, transport, home_chain_id);
    access_base::set_home_governance_executor(env, home_governance_executor);
    access_base::set_guardian(env, guardian);
    env.storage()
        .instance()
        .set(&DataKey::NativeAsset, native_asset);
    delay_policy::set_minimum_delay(env, minimum_delay);
    delay_policy::set_maximum_delay(env, maximum_delay);
    delay_policy::set_delay(env, delay);
    delay_policy::set_grace_period(env, grace_period);

    bump_instance(env);
}

pub(crate) fn queue(
    env: &Env,
    transport: &Address,
    origin_chain: u32,
    sender: &BytesN<32>,
    targets: &Vec<Address>,
    values: &Vec<i128>,
    signatures: &Vec<String>,
    calldatas: &Vec<Vec<Val>>,
    with_delegatecalls: &Vec<bool>,
) -> u32 {
    if !access_base::is_authorized_origin(env, transport, origin_chain, sender) {
        panic_with_error!(env, BridgeExecutorError::UnauthorizedExecutor);
    }

    unwrap_or_panic(
        env,
        actions_set::check_shape(targets, values, signatures, calldatas, with_delegatecalls),
    );
    let this = env.current_contract_address();
    for i in 0..targets.len() {
        // Value only travels with a normal call to another contract.
        let value = values.get_unchecked(i);
        let stray_value = value > 0
            && (with_delegatecalls.get_unchecked(i) || targets.get_unchecked(i) == this);
        if value < 0 || stray_value {
            panic_with_error!(env, BridgeExecutorError::InvalidValue);
        }
        let signature = signatures.get_unchecked(i);
        let calldata = calldatas.get_unchecked(i);
        if dispatcher::resolve_call(env, &signature, &calldata).is_none() {
            panic_with_error!(env, BridgeExecutorError::InvalidSignature);
        }
    }

    let now = env.ledger().timestamp();
    let execution_time = unwrap_or_panic(
        env,
        delay_policy::compute_execution_time(now, delay_policy::read_delay(env)),
    );

    let id = unwrap_or_panic(
        env,
        actions_set::create(
            env,
            targets,
            values,
            signatures,
            calldatas,
            with_delegatecalls,
            execution_time,
        ),
    );
    bump_instance(env);

    log!(env, "actions set queued", id, execution_time);
    id
}

pub(crate) fn execute(env: &Env, id: u32) -> Vec<Val> {
    let now = env.ledger().timestamp();
    let grace_period = delay_policy::read_grace_period(env);

    let set = unwrap_or_panic(env, actions_set::get(env, id));
    unwrap_or_panic(
        env,
        actions_set::check_executable(&set, now, grace_period),
    );

    let results = match dispatcher::execute_batch(env, &set) {
        Ok(results) => results,
        Err(failure) => {
            match failure.reason {
                Some(code) => {
                    log!(env, "action failed with contract error", failure.index, code);
                }
                None => {
                    log!(env, "action failed", failure.index);
                }
            }
            panic_with_error!(env, BridgeExecutorError::CallFailed)
        }
    };

    unwrap_or_panic(
        env,
        actions_set::mark_executed(env, id, now, grace_period),
    );
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, "ActionsSetExecuted"),),
        ActionsSetExecutedEvent {
            id,
            results: results.clone(),
        },
    );

    results
}

pub(crate) fn cancel(env: &Env, caller: &Address, id: u32) {
    caller.require_auth();
    if !access_base::is_guardian(env, caller) {
        panic_with_error!(env, BridgeExecutorError::UnauthorizedOrigin);
    }

    unwrap_or_panic(env, actions_set::mark_canceled(env, id));
    bump_instance(env);

    env.events()
        .publish((Symbol::new(env, "ActionsSetCanceled"),), id);
}

pub(crate) fn update_delay(env: &Env, caller: &Address, delay: u64) {
    require_self(env, caller);
    unwrap_or_panic(env, apply_delay(env, delay));
}

pub(crate) fn update_grace_period(env: &Env, caller: &Address, grace_period: u64) {
    require_self(env, caller);
    unwrap_or_panic(env, apply_grace_period(env, grace_period));
}

pub(crate) fn update_minimum_delay(env: &Env, caller: &Address, minimum_delay: u64) {
    require_self(env, caller);
    unwrap_or_panic(env, apply_minimum_delay(env, minimum_delay));
}

pub(crate) fn update_maximum_delay(env: &Env, caller: &Address, maximum_delay: u64) {
    require_self(env, caller);
    unwrap_or_panic(env, apply_maximum_delay(env, maximum_delay));
}

pub(crate) fn update_guardian(env: &Env, caller: &Address, guardian: &Address) {
    require_self(env, caller);
    access_base::set_guardian(env, guardian);
}

pub(crate) fn update_home_governance_executor(
    env: &Env,
    caller: &Address,
    executor: &BytesN<32>,
) {
    require_self(env, caller);
    access_base::set_home_governance_executor(env, executor);
}

/// Serves an action whose target is the executor itself.
///
/// Only the configuration mutators are reachable this way, and only when
/// `caller` is the executor, i.e. from inside an executed actions set.
pub(crate) fn call_self(
    env: &Env,
    caller: &Address,
    function: &Symbol,
    args: &Vec<Val>,
) -> Result<Val, BridgeExecutorError> {
    if !access_base::is_self(env, caller) {
        return Err(BridgeExecutorError::UnauthorizedOriginOnlySelf);
    }

    if *function == Symbol::new(env, "update_delay") {
        apply_delay(env, single_arg(env, args)?)?;
    } else if *function == Symbol::new(env, "update_grace_period") {
        apply_grace_period(env, single_arg(env, args)?)?;
    } else if *function == Symbol::new(env, "update_minimum_delay") {
        apply_minimum_delay(env, single_arg(env, args)?)?;
    } else if *function == Symbol::new(env, "update_maximum_delay") {
        apply_maximum_delay(env, single_arg(env, args)?)?;
    } else if *function == Symbol::new(env, "update_guardian") {
        let guardian: Address = single_arg(env, args)?;
        access_base::set_guardian(env, &guardian);
    } else if *function == Symbol::new(env, "update_home_governance_executor") {
        let executor: BytesN<32> = single_arg(env, args)?;
        access_base::set_home_governance_executor(env, &executor);
    } else {
        return Err(BridgeExecutorError::CallFailed);
    }

    Ok(().into_val(env))
}

pub(crate) fn get_actions_set_by_id(env: &Env, id: u32) -> ActionsSet {
    unwrap_or_panic(env, actions_set::get(env, id))
}

pub(crate) fn get_current_state(env: &Env, id: u32) -> ActionsSetState {
    let set = unwrap_or_panic(env, actions_set::get(env, id));
    actions_set::state(
        &set,
        env.ledger().timestamp(),
        delay_policy::read_grace_period(env),
    )
}

fn apply_delay(env: &Env, delay: u64) -> Result<(), BridgeExecutorError> {
    delay_policy::validate(env, delay)?;
    delay_policy::set_delay(env, delay);
    Ok(())
}

fn apply_grace_period(env: &Env, grace_period: u64) -> Result<(), BridgeExecutorError> {
    delay_policy::check_grace_period(grace_period)?;
    delay_policy::set_grace_period(env, grace_period);
    Ok(())
}

fn apply_minimum_delay(env: &Env, minimum_delay: u64) -> Result<(), BridgeExecutorError> {
    delay_policy::validate_minimum_delay(env, minimum_delay)?;
    delay_policy::set_minimum_delay(env, minimum_delay);
    Ok(())
}

fn apply_maximum_delay(env: &Env, maximum_delay: u64) -> Result<(), BridgeExecutorError> {
    delay_policy::validate_maximum_delay(env, maximum_delay)?;
    delay_policy::set_maximum_delay(env, maximum_delay);
    Ok(())
}

fn require_self(env: &Env, caller: &Address) {
    if !access_base::is_self(env, caller) {
        panic_with_error!(env, BridgeExecutorError::UnauthorizedOriginOnlySelf);
    }
    caller.require_auth();
}

fn single_arg<T>(env: &Env, args: &Vec<Val>) -> Result<T, BridgeExecutorError>
where
    T: TryFromVal<Env, Val>,
{
    if args.len() != 1 {
        return Err(BridgeExecutorError::CallFailed);
    }
    T::try_from_val(env, &args.get_unchecked(0)).map_err(|_| BridgeExecutorError::CallFailed)
}

fn unwrap_or_panic<T>(env: &Env, result: Result<T, BridgeExecutorError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic_with_error!(env, err),
    }
}
