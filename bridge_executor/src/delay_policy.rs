use soroban_sdk::{Env, Symbol};

use crate::config::{read_instance, BridgeExecutorError, DataKey, MINIMUM_GRACE_PERIOD};

pub(crate) fn read_delay(e: &Env) -> u64 {
    read_instance(e, &DataKey::Delay)
}

pub(crate) fn read_grace_period(e: &Env) -> u64 {
    read_instance(e, &DataKey::GracePeriod)
}

pub(crate) fn read_minimum_delay(e: &Env) -> u64 {
    read_instance(e, &DataKey::MinimumDelay)
}

pub(crate) fn read_maximum_delay(e: &Env) -> u64 {
    read_instance(e, &DataKey::MaximumDelay)
}

pub(crate) fn check_bounds(delay: u64, minimum: u64, maximum: u64) -> Result<(), BridgeExecutorError> {
    if delay < minimum {
        return Err(BridgeExecutorError::DelayTooShort);
    }
    if delay > maximum {
        return Err(BridgeExecutorError::DelayTooLong);
    }
    Ok(())
}

pub(crate) fn check_grace_period(grace_period: u64) -> Result<(), BridgeExecutorError> {
    if grace_period < MINIMUM_GRACE_PERIOD {
        return Err(BridgeExecutorError::GracePeriodTooShort);
    }
    Ok(())
}

pub(crate) fn validate(e: &Env, new_delay: u64) -> Result<(), BridgeExecutorError> {
    check_bounds(new_delay, read_minimum_delay(e), read_maximum_delay(e))
}

/// The current delay has to stay inside the narrowed bounds.
pub(crate) fn validate_minimum_delay(e: &Env, new_minimum: u64) -> Result<(), BridgeExecutorError> {
    if new_minimum >= read_maximum_delay(e) {
        return Err(BridgeExecutorError::InvalidMinimumDelay);
    }
    if read_delay(e) < new_minimum {
        return Err(BridgeExecutorError::DelayTooShort);
    }
    Ok(())
}

pub(crate) fn validate_maximum_delay(e: &Env, new_maximum: u64) -> Result<(), BridgeExecutorError> {
    if new_maximum <= read_minimum_delay(e) {
        return Err(BridgeExecutorError::InvalidMaximumDelay);
    }
    if read_delay(e) > new_maximum {
        return Err(BridgeExecutorError::DelayTooLong);
    }
    Ok(())
}

pub(crate) fn compute_execution_time(now: u64, delay: u64) -> Result<u64, BridgeExecutorError> {
    now.checked_add(delay)
        .ok_or(BridgeExecutorError::ExecutionTimeOverflow)
}

/// Expiry is derived, never stored. A window that would overflow never closes.
pub(crate) fn is_expired(now: u64, execution_time: u64, grace_period: u64) -> bool {
    now > execution_time.saturating_add(grace_period)
}

pub(crate) fn set_delay(e: &Env, delay: u64) {
    update_u64(e, &DataKey::Delay, delay, "DelayUpdated");
}

pub(crate) fn set_grace_period(e: &Env, grace_period: u64) {
    update_u64(e, &DataKey::GracePeriod, grace_period, "GracePeriodUpdated");
}

pub(crate) fn set_minimum_delay(e: &Env, minimum: u64) {
    update_u64(e, &DataKey::MinimumDelay, minimum, "MinimumDelayUpdated");
}

pub(crate) fn set_maximum_delay(e: &Env, maximum: u64) {
    update_u64(e, &DataKey::MaximumDelay, maximum, "MaximumDelayUpdated");
}

fn update_u64(e: &Env, key: &DataKey, value: u64, topic: &str) {
    let old = e
        .storage()
        .instance()
        .get::<DataKey, u64>(key)
        .unwrap_or(value);
    e.storage().instance().set(key, &value);
    e.events()
        .publish((Symbol::new(e, topic),), (old, value));
}
