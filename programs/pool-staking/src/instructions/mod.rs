pub mod initialize;
pub mod stake;
pub mod unstake;
pub mod claim;
pub mod update_rate;
pub mod update_rewards;
pub mod fund_rewards;
pub mod withdraw_rewards;
pub mod set_paused;
pub mod set_fees;
pub mod withdraw_fees;
pub mod transfer_authority;
pub mod close_stake_account;

pub use initialize::*;
pub use stake::*;
pub use unstake::*;
pub use claim::*;
pub use update_rate::*;
pub use update_rewards::*;
pub use fund_rewards::*;
pub use withdraw_rewards::*;
pub use set_paused::*;
pub use set_fees::*;
pub use withdraw_fees::*;
pub use transfer_authority::*;
pub use close_stake_account::*;
