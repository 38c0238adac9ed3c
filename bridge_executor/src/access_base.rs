use soroban_sdk::{Address, BytesN, Env, Symbol};

use crate::config::{read_instance, DataKey};

pub(crate) fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Guardian)
}

pub(crate) fn read_transport(e: &Env) -> Address {
    read_instance(e, &DataKey::Transport)
}

pub(crate) fn read_home_chain_id(e: &Env) -> u32 {
    read_instance(e, &DataKey::HomeChainId)
}

pub(crate) fn read_home_governance_executor(e: &Env) -> BytesN<32> {
    read_instance(e, &DataKey::HomeGovernanceExecutor)
}

pub(crate) fn read_guardian(e: &Env) -> Address {
    read_instance(e, &DataKey::Guardian)
}

pub(crate) fn set_transport(e: &Env, transport: &Address, home_chain_id: u32) {
    e.storage().instance().set(&DataKey::Transport, transport);
    e.storage().instance().set(&DataKey::HomeChainId, &home_chain_id);
    e.events().publish(
        (Symbol::new(e, "TransportSet"),),
        (transport.clone(), home_chain_id),
    );
}

pub(crate) fn set_guardian(e: &Env, guardian: &Address) {
    let old = e
        .storage()
        .instance()
        .get::<DataKey, Address>(&DataKey::Guardian)
        .unwrap_or(guardian.clone());
    e.storage().instance().set(&DataKey::Guardian, guardian);
    e.events().publish(
        (Symbol::new(e, "GuardianUpdated"),),
        (old, guardian.clone()),
    );
}

pub(crate) fn set_home_governance_executor(e: &Env, executor: &BytesN<32>) {
    let old = e
        .storage()
        .instance()
        .get::<DataKey, BytesN<32>>(&DataKey::HomeGovernanceExecutor)
        .unwrap_or(executor.clone());
    e.storage()
        .instance()
        .set(&DataKey::HomeGovernanceExecutor, executor);
    e.events().publish(
        (Symbol::new(e, "HomeGovernanceExecutorUpdated"),),
        (old, executor.clone()),
    );
}

/// Checks that a queue request really comes from the home chain governance.
///
/// The configured transport contract must have authorized the call; it is
/// the only party able to vouch for the remote origin. The chain tag and
/// the claimed sender it reports are then compared with the trust anchor.
/// A missing transport authorization aborts the invocation.
pub(crate) fn is_authorized_origin(
    e: &Env,
    transport: &Address,
    origin_chain: u32,
    sender: &BytesN<32>,
) -> bool {
    if *transport != read_transport(e) {
        return false;
    }
    transport.require_auth();

    origin_chain == read_home_chain_id(e) && *sender == read_home_governance_executor(e)
}

pub(crate) fn is_guardian(e: &Env, caller: &Address) -> bool {
    *caller == read_guardian(e)
}

pub(crate) fn is_self(e: &Env, caller: &Address) -> bool {
    *caller == e.current_contract_address()
}
