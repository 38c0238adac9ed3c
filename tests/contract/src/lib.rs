#![no_std]


pub use crate::contract::{PayloadContract, PayloadContractClient, PayloadError};
