use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::state::StakingPool;

/// Permissionless instruction to update pool rewards state
/// Anyone can call this to keep reward calculations up to date
#[derive(Accounts)]
pub struct UpdateRewards<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn handler(ctx: Context<UpdateRewards>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    engine::sync(pool, clock.unix_timestamp)?;
    
    msg!("Updated pool rewards state");
    msg!("Total staked: {}", pool.total_staked);
    msg!("Reward rate: {}", pool.reward_rate);
    msg!("Reward per share: {}", pool.acc_reward_per_share);
    
    Ok(())
}
