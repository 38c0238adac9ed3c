/*
 * Contract module which executes governance actions queued from a home
 * chain. Every actions set delivered by the bridge transport is held for
 * a mandatory delay before anyone may execute it, and stays executable
 * only for a grace period afterwards. A guardian can cancel a pending
 * set. The executor configuration can only be changed by the executor
 * itself, through an actions set that targets it.
 */
use crate::bridge_executor;
use crate::config::{ActionsSet, ActionsSetState};
use crate::{access_base, actions_set, delay_policy, dispatcher};

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Val, Vec};

#[contract]
pub struct BridgeExecutor;

#[contractimpl]
impl BridgeExecutor {
    /*
     * Initializes the contract with the following parameters:
     *
     * - `transport`: bridge receiver contract that delivers home chain messages
     * - `home_chain_id`: chain tag the transport reports for the home chain
     * - `home_governance_executor`: remote address allowed to queue actions sets
     * - `native_asset`: token contract used to carry action values
     * - `delay`: initial delay in seconds between queueing and execution
     * - `grace_period`: window in seconds after the delay during which a set stays executable
     * - `minimum_delay`, `maximum_delay`: bounds for `delay`
     * - `guardian`: account allowed to cancel actions sets
     */
    pub fn initialize(
        env: Env,
        transport: Address,
        home_chain_id: u32,
        home_governance_executor: BytesN<32>,
        native_asset: Address,
        delay: u64,
        grace_period: u64,
        minimum_delay: u64,
        maximum_delay: u64,
        guardian: Address,
    ) {
        bridge_executor::initialize(
            &env,
            &transport,
            home_chain_id,
            &home_governance_executor,
            &native_asset,
            delay,
            grace_period,
            minimum_delay,
            maximum_delay,
            &guardian,
        )
    }

    /*
     * Queue an actions set received from the home chain. Returns its id.
     *
     * Emits an {ActionsSetQueued} event.
     *
     * Requirements:
     *
     * - `transport` must be the configured transport and must authorize the call.
     * - `origin_chain` and `sender` must match the home chain governance executor.
     * - all action arrays must be non-empty and of equal length.
     * - every value must be non-negative. A positive value is only accepted
     *   for a normal call to another contract, where it is paid in
     *   `native_asset` before the call.
     */
    pub fn queue(
        env: Env,
        transport: Address,
        origin_chain: u32,
        sender: BytesN<32>,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<String>,
        calldatas: Vec<Vec<Val>>,
        with_delegatecalls: Vec<bool>,
    ) -> u32 {
        bridge_executor::queue(
            &env,
            &transport,
            origin_chain,
            &sender,
            &targets,
            &values,
            &signatures,
            &calldatas,
            &with_delegatecalls,
        )
    }

    /*
     * Execute a queued actions set and return the result of every action.
     *
     * Emits an {ActionsSetExecuted} event.
     *
     * Requirements:
     *
     * - the delay must have elapsed and the grace period must not be over.
     * - every action must succeed, otherwise nothing is applied.
     *
     * A failing action aborts with {CallFailed} for the whole set. The index
     * of the action and the error code reported by its target are only
     * written to the diagnostic log, so callers that need them must read the
     * log of a build compiled with `release-with-logs` or simulate the call.
     */
    pub fn execute(env: Env, actions_set_id: u32) -> Vec<Val> {
        bridge_executor::execute(&env, actions_set_id)
    }

    /*
     * Cancel an actions set that has not been executed yet.
     *
     * Emits an {ActionsSetCanceled} event.
     *
     * Requirements:
     *
     * - the caller must be the guardian.
     */
    pub fn cancel(env: Env, caller: Address, actions_set_id: u32) {
        bridge_executor::cancel(&env, &caller, actions_set_id)
    }

    /*
     * The following mutators require the caller to be the executor itself.
     * This can only be achieved by queueing and later executing an actions
     * set where the executor is the target.
     */
    pub fn update_delay(env: Env, caller: Address, delay: u64) {
        bridge_executor::update_delay(&env, &caller, delay)
    }

    pub fn update_grace_period(env: Env, caller: Address, grace_period: u64) {
        bridge_executor::update_grace_period(&env, &caller, grace_period)
    }

    pub fn update_minimum_delay(env: Env, caller: Address, minimum_delay: u64) {
        bridge_executor::update_minimum_delay(&env, &caller, minimum_delay)
    }

    pub fn update_maximum_delay(env: Env, caller: Address, maximum_delay: u64) {
        bridge_executor::update_maximum_delay(&env, &caller, maximum_delay)
    }

    pub fn update_guardian(env: Env, caller: Address, guardian: Address) {
        bridge_executor::update_guardian(&env, &caller, &guardian)
    }

    pub fn update_home_governance_executor(env: Env, caller: Address, executor: BytesN<32>) {
        bridge_executor::update_home_governance_executor(&env, &caller, &executor)
    }

    pub fn get_actions_set_by_id(env: Env, actions_set_id: u32) -> ActionsSet {
        bridge_executor::get_actions_set_by_id(&env, actions_set_id)
    }

    /*
     * Returns the state of an actions set. `Expired` is derived from the
     * ledger time and is never stored.
     */
    pub fn get_current_state(env: Env, actions_set_id: u32) -> ActionsSetState {
        bridge_executor::get_current_state(&env, actions_set_id)
    }

    pub fn get_actions_set_count(env: Env) -> u32 {
        actions_set::count(&env)
    }

    /*
     * Returns `true` if an identical action is part of a pending actions set.
     */
    pub fn is_action_queued(env: Env, action_hash: BytesN<32>) -> bool {
        actions_set::is_action_queued(&env, &action_hash)
    }

    pub fn get_delay(env: Env) -> u64 {
        delay_policy::read_delay(&env)
    }

    pub fn get_grace_period(env: Env) -> u64 {
        delay_policy::read_grace_period(&env)
    }

    pub fn get_minimum_delay(env: Env) -> u64 {
        delay_policy::read_minimum_delay(&env)
    }

    pub fn get_maximum_delay(env: Env) -> u64 {
        delay_policy::read_maximum_delay(&env)
    }

    pub fn get_guardian(env: Env) -> Address {
        access_base::read_guardian(&env)
    }

    pub fn get_home_governance_executor(env: Env) -> BytesN<32> {
        access_base::read_home_governance_executor(&env)
    }

    pub fn get_home_chain_id(env: Env) -> u32 {
        access_base::read_home_chain_id(&env)
    }

    pub fn get_transport(env: Env) -> Address {
        access_base::read_transport(&env)
    }

    pub fn get_native_asset(env: Env) -> Address {
        dispatcher::read_native_asset(&env)
    }
}

#[cfg(any(test, feature = "testutils"))]
#[contractimpl]
impl BridgeExecutor {
    pub fn is_initialized(env: &Env) -> bool {
        access_base::is_initialized(env)
    }
}
