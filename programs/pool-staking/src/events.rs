use anchor_lang::prelude::*;

/// Emitted when a pool is created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub stake_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_rate: u64,
    pub stake_fee: u64,
    pub unstake_fee: u64,
    pub timestamp: i64,
}

/// Emitted when a user stakes tokens
#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub new_total_staked: u64,
    pub pool_total_staked: u64,
    /// Lamports charged as the stake fee
    pub fee: u64,
    pub timestamp: i64,
}

/// Emitted when a user unstakes tokens
#[event]
pub struct Unstaked {
    pub pool: Pubkey,
    pub user: Pubkey,
    /// The user, or the pool authority unstaking for them
    pub signer: Pubkey,
    pub amount: u64,
    pub rewards_settled: u64,
    pub remaining_stake: u64,
    pub pool_total_staked: u64,
    pub fee: u64,
    pub timestamp: i64,
}

/// Emitted when rewards are claimed
#[event]
pub struct RewardsClaimed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardRateUpdated {
    pub pool: Pubkey,
    pub old_rate: u64,
    pub new_rate: u64,
    pub acc_reward_per_share: u128,
    pub timestamp: i64,
}

#[event]
pub struct RewardsFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub rewards_funded: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardsWithdrawn {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesUpdated {
    pub pool: Pubkey,
    pub stake_fee: u64,
    pub unstake_fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesWithdrawn {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub fees_remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolPauseChanged {
    pub pool: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub pool: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct StakeAccountClosed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub timestamp: i64,
}
