use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::events::StakeAccountClosed;
use crate::state::{StakingPool, StakeAccount};

#[derive(Accounts)]
pub struct CloseStakeAccount<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    #[account(
        mut,
        close = user,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = stake_account.bump
    )]
    pub stake_account: Account<'info, StakeAccount>,
    
    #[account(mut)]
    pub user: Signer<'info>,
}

/// Reclaim rent from an emptied stake account
pub fn handler(ctx: Context<CloseStakeAccount>) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();
    
    engine::close_position(&ctx.accounts.stake_account, user)?;
    
    emit!(StakeAccountClosed {
        pool: ctx.accounts.staking_pool.key(),
        user,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Closed stake account for {}", user);
    
    Ok(())
}
