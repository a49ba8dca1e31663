use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::events::PoolPauseChanged;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    pub authority: Signer<'info>,
}

/// Pause or resume new stakes. Unstake and claim stay open.
pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    engine::set_paused(pool, ctx.accounts.authority.key(), paused)?;
    
    emit!(PoolPauseChanged {
        pool: pool_key,
        paused,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Pool paused: {}", paused);
    
    Ok(())
}
