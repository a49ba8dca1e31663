use anchor_lang::prelude::*;

use crate::errors::StakingError;
use crate::math;

/// Per-mint staking pool
/// PDA: ["staking-pool", stake_mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Can change the reward rate, pause the pool and withdraw rewards
    pub authority: Pubkey,

    /// Token mint that can be staked in this pool
    pub stake_mint: Pubkey,

    /// Token mint rewards are paid in
    pub reward_mint: Pubkey,

    /// Token account holding staked tokens
    pub stake_vault: Pubkey,

    /// Token account holding reward tokens
    pub reward_vault: Pubkey,

    /// Total tokens currently staked
    pub total_staked: u64,

    /// Accumulated reward per staked token (scaled by 1e12)
    pub acc_reward_per_share: u128,

    /// Reward tokens emitted per second across all stakers
    pub reward_rate: u64,

    /// Last timestamp when the accumulator was advanced
    pub last_update_time: i64,

    /// Number of positions with a non-zero stake
    pub staker_count: u32,

    /// Reward tokens deposited historically
    pub rewards_funded: u64,

    /// Reward tokens paid out historically
    pub rewards_distributed: u64,

    /// Reward tokens emitted to stakers historically; what is not yet
    /// distributed is owed and stays reserved in the reward vault
    pub rewards_emitted: u128,

    /// Lamports charged on every stake
    pub stake_fee: u64,

    /// Lamports charged when an owner unstakes
    pub unstake_fee: u64,

    /// Fee lamports held by the pool account and not yet withdrawn
    pub fees_collected: u64,

    /// Pool creation timestamp
    pub created_at: i64,

    /// Whether new stakes are rejected
    pub paused: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Bump seed of the pool-authority PDA that signs for the vaults
    pub authority_bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl StakingPool {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // stake_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_staked
        16 + // acc_reward_per_share
        8 +  // reward_rate
        8 +  // last_update_time
        4 +  // staker_count
        8 +  // rewards_funded
        8 +  // rewards_distributed
        16 + // rewards_emitted
        8 +  // stake_fee
        8 +  // unstake_fee
        8 +  // fees_collected
        8 +  // created_at
        1 +  // paused
        1 +  // bump
        1 +  // authority_bump
        32;  // reserved

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn is_active(&self) -> bool {
        self.total_staked > 0
    }

    /// Accumulator state at `now`, without writing it.
    ///
    /// Stays flat while the pool is empty and for timestamps at or before
    /// `last_update_time`.
    pub fn accrue(&self, now: i64) -> Result<Accrual> {
        let mut accrual = Accrual {
            acc_reward_per_share: self.acc_reward_per_share,
            rewards_emitted: self.rewards_emitted,
            last_update_time: self.last_update_time,
        };
        if now <= self.last_update_time {
            return Ok(accrual);
        }
        accrual.last_update_time = now;
        if self.total_staked == 0 {
            return Ok(accrual);
        }

        let elapsed = now
            .checked_sub(self.last_update_time)
            .ok_or(StakingError::ArithmeticOverflow)? as u64;
        let increase = math::reward_per_share_increase(elapsed, self.reward_rate, self.total_staked)?;
        let emitted = math::emitted(elapsed, self.reward_rate)?;

        accrual.acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(increase)
            .ok_or(StakingError::ArithmeticOverflow)?;
        accrual.rewards_emitted = self
            .rewards_emitted
            .checked_add(emitted)
            .ok_or(StakingError::ArithmeticOverflow)?;

        Ok(accrual)
    }

    pub fn commit(&mut self, accrual: Accrual) {
        self.acc_reward_per_share = accrual.acc_reward_per_share;
        self.rewards_emitted = accrual.rewards_emitted;
        self.last_update_time = accrual.last_update_time;
    }

    pub fn reward_per_share_at(&self, now: i64) -> Result<u128> {
        Ok(self.accrue(now)?.acc_reward_per_share)
    }

    /// Advance the accumulator to `now`.
    ///
    /// The clock moves even when nothing is staked, so an empty period is never
    /// credited to whoever stakes next.
    pub fn advance(&mut self, now: i64) -> Result<()> {
        let accrual = self.accrue(now)?;
        self.commit(accrual);
        Ok(())
    }
}

/// Accumulator values computed by [`StakingPool::accrue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accrual {
    pub acc_reward_per_share: u128,
    pub rewards_emitted: u128,
    pub last_update_time: i64,
}

impl Accrual {
    /// Emitted rewards not yet paid out. The reward vault must keep at least
    /// this much.
    pub fn reserved_rewards(&self, rewards_distributed: u64) -> Result<u128> {
        self.rewards_emitted
            .checked_sub(rewards_distributed as u128)
            .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCALE;

    fn pool(reward_rate: u64, total_staked: u64) -> StakingPool {
        StakingPool {
            authority: Pubkey::new_unique(),
            reward_rate,
            total_staked,
            ..Default::default()
        }
    }

    #[test]
    fn test_is_initialized() {
        // freshly allocated pool data deserializes to the default
        assert!(!StakingPool::default().is_initialized());
        assert!(pool(0, 0).is_initialized());
    }

    #[test]
    fn test_advance_accrues_per_share() {
        let mut pool = pool(100, 1_000);
        pool.advance(10).unwrap();
        assert_eq!(pool.acc_reward_per_share, SCALE);
        assert_eq!(pool.last_update_time, 10);
    }

    #[test]
    fn test_advance_empty_pool_moves_clock_only() {
        let mut pool = pool(100, 0);
        pool.advance(50).unwrap();
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_update_time, 50);
        assert!(!pool.is_active());

        // first staker arrives; nothing from the empty period is owed
        pool.total_staked = 1_000;
        pool.advance(60).unwrap();
        assert_eq!(pool.acc_reward_per_share, SCALE);
    }

    #[test]
    fn test_advance_ignores_past_timestamps() {
        let mut pool = pool(100, 1_000);
        pool.advance(10).unwrap();
        pool.advance(5).unwrap();
        assert_eq!(pool.acc_reward_per_share, SCALE);
        assert_eq!(pool.last_update_time, 10);
    }

    #[test]
    fn test_projection_does_not_write() {
        let pool = pool(100, 1_000);
        assert_eq!(pool.reward_per_share_at(20).unwrap(), 2 * SCALE);
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_update_time, 0);
    }

    #[test]
    fn test_advance_overflow_leaves_pool_untouched() {
        let mut pool = pool(u64::MAX, 1);
        pool.acc_reward_per_share = u128::MAX - 1;
        assert!(pool.advance(1).is_err());
        assert_eq!(pool.acc_reward_per_share, u128::MAX - 1);
        assert_eq!(pool.last_update_time, 0);
    }

    #[test]
    fn test_advance_tracks_emission_while_staked() {
        let mut pool = pool(100, 1_000);
        pool.advance(10).unwrap();
        assert_eq!(pool.rewards_emitted, 1_000);

        pool.total_staked = 0;
        pool.advance(20).unwrap();
        assert_eq!(pool.rewards_emitted, 1_000);

        pool.total_staked = 3;
        pool.advance(21).unwrap();
        assert_eq!(pool.rewards_emitted, 1_100);
    }

    #[test]
    fn test_reserved_rewards() {
        let mut pool = pool(100, 1_000);
        pool.rewards_distributed = 400;
        let accrual = pool.accrue(10).unwrap();
        assert_eq!(accrual.reserved_rewards(pool.rewards_distributed).unwrap(), 600);
        assert!(accrual.reserved_rewards(1_001).is_err());
    }
}
