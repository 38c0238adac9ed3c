use soroban_sdk::{
    token, Address, Env, IntoVal, InvokeError, String, Symbol, TryFromVal, Val, Vec,
};

use crate::bridge_executor;
use crate::config::{read_instance, ActionsSet, DataKey, MAX_SIGNATURE_LEN};

/// First failing action of a batch. `reason` is the target's contract error
/// code when it reported one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct CallFailure {
    pub index: u32,
    pub reason: Option<u32>,
}

pub(crate) fn read_native_asset(e: &Env) -> Address {
    read_instance(e, &DataKey::NativeAsset)
}

/// Runs every action of `set` in order and stops at the first failure.
///
/// Nothing is rolled back here: the caller aborts the invocation on `Err`,
/// which discards every effect of the calls that already succeeded.
pub(crate) fn execute_batch(e: &Env, set: &ActionsSet) -> Result<Vec<Val>, CallFailure> {
    let mut results = Vec::new(e);
    for index in 0..set.targets.len() {
        let result = invoke(
            e,
            &set.targets.get_unchecked(index),
            set.values.get_unchecked(index),
            &set.signatures.get_unchecked(index),
            &set.calldatas.get_unchecked(index),
            set.with_delegatecalls.get_unchecked(index),
        )
        .map_err(|reason| CallFailure { index, reason })?;
        results.push_back(result);
    }
    Ok(results)
}

/// Performs a single action.
///
/// Delegated mode hands the executor address to the target as its first
/// argument and moves no value; the target then acts on behalf of the
/// executor, which is its direct invoker. A target equal to the executor is
/// served in-process since a contract cannot re-enter itself.
pub(crate) fn invoke(
    e: &Env,
    target: &Address,
    value: i128,
    signature: &String,
    calldata: &Vec<Val>,
    with_delegatecall: bool,
) -> Result<Val, Option<u32>> {
    let (function, mut args) = resolve_call(e, signature, calldata).ok_or(None::<u32>)?;

    let this = e.current_contract_address();
    if *target == this {
        return bridge_executor::call_self(e, &this, &function, &args)
            .map_err(|err| Some(err as u32));
    }

    if with_delegatecall {
        args.push_front(this.into_val(e));
    } else if value > 0 {
        transfer_value(e, target, value)?;
    }

    match e.try_invoke_contract::<Val, InvokeError>(target, &function, args) {
        Ok(Ok(result)) => Ok(result),
        Err(Ok(InvokeError::Contract(code))) => Err(Some(code)),
        _ => Err(None),
    }
}

/// Splits an action into the function to call and its arguments.
///
/// An empty signature means the calldata is raw: its first element is the
/// function symbol and the rest are the arguments.
pub(crate) fn resolve_call(
    e: &Env,
    signature: &String,
    calldata: &Vec<Val>,
) -> Option<(Symbol, Vec<Val>)> {
    if signature.len() == 0 {
        let selector = calldata.get(0)?;
        let function = Symbol::try_from_val(e, &selector).ok()?;
        return Some((function, calldata.slice(1..)));
    }
    Some((function_symbol(e, signature)?, calldata.clone()))
}

fn function_symbol(e: &Env, signature: &String) -> Option<Symbol> {
    let len = signature.len() as usize;
    if len > MAX_SIGNATURE_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_SIGNATURE_LEN];
    signature.copy_into_slice(&mut buf[..len]);
    let name = &buf[..len];
    if !name.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_') {
        return None;
    }
    let name = core::str::from_utf8(name).ok()?;
    Some(Symbol::new(e, name))
}

fn transfer_value(e: &Env, target: &Address, value: i128) -> Result<(), Option<u32>> {
    let asset = token::Client::new(e, &read_native_asset(e));
    match asset.try_transfer(&e.current_contract_address(), target, &value) {
        Ok(Ok(())) => Ok(()),
        _ => Err(None),
    }
}
