use soroban_sdk::{
    contracterror, contracttype, panic_with_error, Address, BytesN, Env, String, TryFromVal, Val,
    Vec,
};

/// Lower bound for the grace period, in seconds (10 minutes).
pub(crate) const MINIMUM_GRACE_PERIOD: u64 = 600;

/// Longest function name a `Symbol` can hold.
pub(crate) const MAX_SIGNATURE_LEN: usize = 32;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Transport,
    HomeChainId,
    HomeGovernanceExecutor,
    NativeAsset,
    Guardian,
    Delay,
    GracePeriod,
    MinimumDelay,
    MaximumDelay,
    ActionsSetCount,
    ActionsSet(u32),
    QueuedAction(BytesN<32>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum ActionsSetState {
    Queued = 0,
    Executed = 1,
    Canceled = 2,
    Expired = 3,
}

/// One batch of calls queued by the home chain governance.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ActionsSet {
    pub id: u32,
    pub targets: Vec<Address>,
    pub values: Vec<i128>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Vec<Val>>,
    pub with_delegatecalls: Vec<bool>,
    pub execution_time: u64,
    pub executed: bool,
    pub canceled: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ActionsSetQueuedEvent {
    pub id: u32,
    pub targets: Vec<Address>,
    pub values: Vec<i128>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Vec<Val>>,
    pub with_delegatecalls: Vec<bool>,
    pub execution_time: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ActionsSetExecutedEvent {
    pub id: u32,
    pub results: Vec<Val>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[contracterror]
#[repr(u32)]
pub enum BridgeExecutorError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInitParams = 3,
    UnauthorizedExecutor = 4,
    UnauthorizedOrigin = 5,
    UnauthorizedOriginOnlySelf = 6,
    EmptyBatch = 7,
    LengthMismatch = 8,
    DelayTooShort = 9,
    DelayTooLong = 10,
    UnknownId = 11,
    AlreadyExecuted = 12,
    AlreadyCanceled = 13,
    NotYetExecutable = 14,
    Expired = 15,
    CallFailed = 16,
    InvalidSignature = 17,
    InvalidValue = 18,
    ExecutionTimeOverflow = 19,
    GracePeriodTooShort = 20,
    InvalidMinimumDelay = 21,
    InvalidMaximumDelay = 22,
}

pub(crate) fn read_instance<V>(e: &Env, key: &DataKey) -> V
where
    V: TryFromVal<Env, Val>,
{
    match e.storage().instance().get::<DataKey, V>(key) {
        Some(value) => value,
        None => panic_with_error!(e, BridgeExecutorError::NotInitialized),
    }
}

pub(crate) fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
