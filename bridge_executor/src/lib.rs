#![no_std]

mod access_base;
mod actions_set;
mod bridge_executor;
mod config;
mod contract;
mod delay_policy;
mod dispatcher;


pub use crate::config::{
    ActionsSet, ActionsSetExecutedEvent, ActionsSetQueuedEvent, ActionsSetState,
    BridgeExecutorError,
};
pub use crate::contract::{BridgeExecutor, BridgeExecutorClient};
