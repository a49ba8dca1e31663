use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::RewardsClaimed;
use crate::state::{StakingPool, StakeAccount};

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = reward_vault @ StakingError::InvalidVault
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = stake_account.bump
    )]
    pub stake_account: Account<'info, StakeAccount>,
    
    /// Pool rewards vault (holds reward tokens)
    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,
    
    #[account(
        mut,
        constraint = user_reward_account.mint == staking_pool.reward_mint,
        constraint = user_reward_account.owner == user.key()
    )]
    pub user_reward_account: Account<'info, TokenAccount>,
    
    /// CHECK: Pool authority for signing transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.authority_bump
    )]
    pub pool_authority: UncheckedAccount<'info>,
    
    pub user: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let user = ctx.accounts.user.key();
    let vault_balance = ctx.accounts.reward_vault.amount;
    let clock = Clock::get()?;
    
    let authority_bump = [ctx.accounts.staking_pool.authority_bump];
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &authority_bump];
    let signer_seeds = &[seeds];
    
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.user_reward_account.to_account_info(),
        authority: ctx.accounts.pool_authority.to_account_info(),
    };
    
    let pool = &mut ctx.accounts.staking_pool;
    let stake_account = &mut ctx.accounts.stake_account;
    
    // Transfer reward tokens from vault to user
    let claimed = engine::claim(
        pool,
        stake_account,
        user,
        clock.unix_timestamp,
        vault_balance,
        move |amount| {
            token::transfer(
                CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds),
                amount,
            )
        },
    )?;
    
    emit!(RewardsClaimed {
        pool: pool_key,
        user,
        amount: claimed,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Claimed {} reward tokens", claimed);
    
    Ok(())
}
