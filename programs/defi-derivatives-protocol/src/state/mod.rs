pub mod contract;
pub mod protocol;

pub use {contract::*, protocol::*};
