use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::events::AuthorityTransferred;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct TransferAuthority<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<TransferAuthority>, new_authority: Pubkey) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let old_authority = ctx.accounts.authority.key();
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    engine::transfer_authority(pool, old_authority, new_authority)?;
    
    emit!(AuthorityTransferred {
        pool: pool_key,
        old_authority,
        new_authority,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Authority: {} -> {}", old_authority, new_authority);
    
    Ok(())
}
