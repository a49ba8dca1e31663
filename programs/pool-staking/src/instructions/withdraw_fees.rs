use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::FeesWithdrawn;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// Holds the collected fee lamports on top of its rent
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    #[account(mut)]
    pub authority: Signer<'info>,
}

/// Move collected fee lamports from the pool account to the authority
pub fn handler(ctx: Context<WithdrawFees>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let authority = ctx.accounts.authority.key();
    let clock = Clock::get()?;
    
    let pool_info = ctx.accounts.staking_pool.to_account_info();
    let authority_info = ctx.accounts.authority.to_account_info();
    
    let pool = &mut ctx.accounts.staking_pool;
    
    engine::withdraw_fees(pool, authority, amount, move |amount| {
        let pool_lamports = pool_info
            .lamports()
            .checked_sub(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        let authority_lamports = authority_info
            .lamports()
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        **pool_info.try_borrow_mut_lamports()? = pool_lamports;
        **authority_info.try_borrow_mut_lamports()? = authority_lamports;
        Ok(())
    })?;
    
    emit!(FeesWithdrawn {
        pool: pool_key,
        authority,
        amount,
        fees_remaining: pool.fees_collected,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Withdrew {} fee lamports", amount);
    
    Ok(())
}
