use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::events::RewardRateUpdated;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct UpdateRate<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    pub authority: Signer<'info>,
}

/// Change the reward emission rate (authority only)
pub fn handler(ctx: Context<UpdateRate>, new_rate: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    let old_rate = engine::update_rate(pool, ctx.accounts.authority.key(), new_rate, clock.unix_timestamp)?;
    
    emit!(RewardRateUpdated {
        pool: pool_key,
        old_rate,
        new_rate,
        acc_reward_per_share: pool.acc_reward_per_share,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Reward rate updated: {} -> {}", old_rate, new_rate);
    
    Ok(())
}
