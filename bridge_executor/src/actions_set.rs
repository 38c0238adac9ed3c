use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String, Symbol, Val, Vec};

use crate::config::{
    ActionsSet, ActionsSetQueuedEvent, ActionsSetState, BridgeExecutorError, DataKey,
    PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
};
use crate::delay_policy;

pub(crate) fn count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::ActionsSetCount)
        .unwrap_or(0)
}

pub(crate) fn action_hash(
    e: &Env,
    target: &Address,
    value: i128,
    signature: &String,
    calldata: &Vec<Val>,
    execution_time: u64,
    with_delegatecall: bool,
) -> BytesN<32> {
    let mut payload = Bytes::new(e);
    payload.append(&target.clone().to_xdr(e));
    payload.append(&value.to_xdr(e));
    payload.append(&signature.clone().to_xdr(e));
    payload.append(&calldata.clone().to_xdr(e));
    payload.append(&execution_time.to_xdr(e));
    payload.append(&with_delegatecall.to_xdr(e));
    e.crypto().sha256(&payload)
}

pub(crate) fn is_action_queued(e: &Env, hash: &BytesN<32>) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::QueuedAction(hash.clone()))
}

pub(crate) fn check_shape(
    targets: &Vec<Address>,
    values: &Vec<i128>,
    signatures: &Vec<String>,
    calldatas: &Vec<Vec<Val>>,
    with_delegatecalls: &Vec<bool>,
) -> Result<(), BridgeExecutorError> {
    let len = targets.len();
    if len == 0 {
        return Err(BridgeExecutorError::EmptyBatch);
    }
    if values.len() != len
        || signatures.len() != len
        || calldatas.len() != len
        || with_delegatecalls.len() != len
    {
        return Err(BridgeExecutorError::LengthMismatch);
    }
    Ok(())
}

pub(crate) fn create(
    e: &Env,
    targets: &Vec<Address>,
    values: &Vec<i128>,
    signatures: &Vec<String>,
    calldatas: &Vec<Vec<Val>>,
    with_delegatecalls: &Vec<bool>,
    execution_time: u64,
) -> Result<u32, BridgeExecutorError> {
    check_shape(targets, values, signatures, calldatas, with_delegatecalls)?;

    let set = ActionsSet {
        id: count(e),
        targets: targets.clone(),
        values: values.clone(),
        signatures: signatures.clone(),
        calldatas: calldatas.clone(),
        with_delegatecalls: with_delegatecalls.clone(),
        execution_time,
        executed: false,
        canceled: false,
    };

    for hash in hashes_of(e, &set).iter() {
        let key = DataKey::QueuedAction(hash);
        let pending: u32 = e.storage().persistent().get(&key).unwrap_or(0);
        e.storage().persistent().set(&key, &(pending + 1));
        bump_persistent(e, &key);
    }

    write(e, &set);
    e.storage()
        .instance()
        .set(&DataKey::ActionsSetCount, &(set.id + 1));

    e.events().publish(
        (Symbol::new(e, "ActionsSetQueued"),),
        ActionsSetQueuedEvent {
            id: set.id,
            targets: set.targets,
            values: set.values,
            signatures: set.signatures,
            calldatas: set.calldatas,
            with_delegatecalls: set.with_delegatecalls,
            execution_time,
        },
    );

    Ok(set.id)
}

pub(crate) fn get(e: &Env, id: u32) -> Result<ActionsSet, BridgeExecutorError> {
    if id >= count(e) {
        return Err(BridgeExecutorError::UnknownId);
    }
    e.storage()
        .persistent()
        .get(&DataKey::ActionsSet(id))
        .ok_or(BridgeExecutorError::UnknownId)
}

pub(crate) fn state(set: &ActionsSet, now: u64, grace_period: u64) -> ActionsSetState {
    if set.canceled {
        ActionsSetState::Canceled
    } else if set.executed {
        ActionsSetState::Executed
    } else if delay_policy::is_expired(now, set.execution_time, grace_period) {
        ActionsSetState::Expired
    } else {
        ActionsSetState::Queued
    }
}

pub(crate) fn check_executable(
    set: &ActionsSet,
    now: u64,
    grace_period: u64,
) -> Result<(), BridgeExecutorError> {
    check_pending(set)?;
    if now < set.execution_time {
        return Err(BridgeExecutorError::NotYetExecutable);
    }
    if delay_policy::is_expired(now, set.execution_time, grace_period) {
        return Err(BridgeExecutorError::Expired);
    }
    Ok(())
}

pub(crate) fn mark_executed(
    e: &Env,
    id: u32,
    now: u64,
    grace_period: u64,
) -> Result<(), BridgeExecutorError> {
    let mut set = get(e, id)?;
    check_executable(&set, now, grace_period)?;
    set.executed = true;
    release(e, &set);
    write(e, &set);
    Ok(())
}

pub(crate) fn mark_canceled(e: &Env, id: u32) -> Result<(), BridgeExecutorError> {
    let mut set = get(e, id)?;
    check_pending(&set)?;
    set.canceled = true;
    release(e, &set);
    write(e, &set);
    Ok(())
}

fn check_pending(set: &ActionsSet) -> Result<(), BridgeExecutorError> {
    if set.executed {
        return Err(BridgeExecutorError::AlreadyExecuted);
    }
    if set.canceled {
        return Err(BridgeExecutorError::AlreadyCanceled);
    }
    Ok(())
}

fn hashes_of(e: &Env, set: &ActionsSet) -> Vec<BytesN<32>> {
    let mut hashes = Vec::new(e);
    for i in 0..set.targets.len() {
        hashes.push_back(action_hash(
            e,
            &set.targets.get_unchecked(i),
            set.values.get_unchecked(i),
            &set.signatures.get_unchecked(i),
            &set.calldatas.get_unchecked(i),
            set.execution_time,
            set.with_delegatecalls.get_unchecked(i),
        ));
    }
    hashes
}

// Identical actions may sit in several pending sets; the entry goes away
// with the last of them.
fn release(e: &Env, set: &ActionsSet) {
    for hash in hashes_of(e, set).iter() {
        let key = DataKey::QueuedAction(hash);
        let pending: u32 = e.storage().persistent().get(&key).unwrap_or(0);
        if pending > 1 {
            e.storage().persistent().set(&key, &(pending - 1));
        } else {
            e.storage().persistent().remove(&key);
        }
    }
}

fn write(e: &Env, set: &ActionsSet) {
    let key = DataKey::ActionsSet(set.id);
    e.storage().persistent().set(&key, set);
    bump_persistent(e, &key);
}

fn bump_persistent(e: &Env, key: &DataKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
