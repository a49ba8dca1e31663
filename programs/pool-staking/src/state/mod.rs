pub mod staking_pool;
pub mod stake_account;

pub use staking_pool::*;
pub use stake_account::*;
