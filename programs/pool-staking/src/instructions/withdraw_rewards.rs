use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::RewardsWithdrawn;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct WithdrawRewards<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = reward_vault @ StakingError::InvalidVault
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    /// Pool rewards vault (holds reward tokens)
    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,
    
    #[account(
        mut,
        constraint = destination.mint == staking_pool.reward_mint,
        constraint = destination.owner == authority.key()
    )]
    pub destination: Account<'info, TokenAccount>,
    
    /// CHECK: Pool authority for signing transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.authority_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,
    
    pub authority: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
}

/// Drain unreserved reward tokens from the vault (authority only)
pub fn handler(ctx: Context<WithdrawRewards>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let authority = ctx.accounts.authority.key();
    let clock = Clock::get()?;
    
    let authority_bump = [ctx.accounts.staking_pool.authority_bump];
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &authority_bump];
    let signer_seeds = &[seeds];
    
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.destination.to_account_info(),
        authority: ctx.accounts.pool_authority.to_account_info(),
    };
    
    engine::withdraw_rewards(
        &ctx.accounts.staking_pool,
        authority,
        amount,
        ctx.accounts.reward_vault.amount,
        clock.unix_timestamp,
        move |amount| {
            token::transfer(
                CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
                amount,
            )
        },
    )?;
    
    emit!(RewardsWithdrawn {
        pool: pool_key,
        authority,
        amount,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Withdrew {} reward tokens", amount);
    
    Ok(())
}
