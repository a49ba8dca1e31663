use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::events::FeesUpdated;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct SetFees<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetFees>, stake_fee: u64, unstake_fee: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    engine::set_fees(pool, ctx.accounts.authority.key(), stake_fee, unstake_fee)?;
    
    emit!(FeesUpdated {
        pool: pool_key,
        stake_fee,
        unstake_fee,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Fees set: stake {} / unstake {} lamports", stake_fee, unstake_fee);
    
    Ok(())
}
