use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::RewardsFunded;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct FundRewards<'info> {
    #[account(
        mut,
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
        constraint = funder_token_account.mint == staking_pool.reward_mint,
        constraint = funder_token_account.owner == funder.key()
    )]
    pub funder_token_account: Account<'info, TokenAccount>,
    
    /// Depositor (usually the pool authority or a treasury crank)
    pub funder: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let funder = ctx.accounts.funder.key();
    let clock = Clock::get()?;
    
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.reward_vault.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    
    let pool = &mut ctx.accounts.staking_pool;
    
    // Transfer reward tokens from funder to rewards vault
    engine::fund_rewards(pool, amount, move |amount| {
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)
    })?;
    
    emit!(RewardsFunded {
        pool: pool_key,
        funder,
        amount,
        rewards_funded: pool.rewards_funded,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Deposited {} reward tokens", amount);
    msg!("Total funded: {}", pool.rewards_funded);
    
    Ok(())
}
