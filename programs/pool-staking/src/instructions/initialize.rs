use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::engine;
use crate::errors::StakingError;
use crate::events::PoolInitialized;
use crate::state::StakingPool;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Allocated on first call. A second call fails here with
    /// `AlreadyInitialized`, before the vault constraints below are checked.
    #[account(
        init_if_needed,
        payer = authority,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, stake_mint.key().as_ref()],
        bump,
        constraint = !staking_pool.is_initialized() @ StakingError::AlreadyInitialized
    )]
    pub staking_pool: Account<'info, StakingPool>,
    
    /// The token mint stakers deposit
    pub stake_mint: Account<'info, Mint>,
    
    /// The token mint rewards are paid in
    pub reward_mint: Account<'info, Mint>,
    
    /// CHECK: Pool authority for signing vault transfers
    #[account(
        seeds = [POOL_AUTHORITY_SEED, staking_pool.key().as_ref()],
        bump
    )]
    pub pool_authority: UncheckedAccount<'info>,
    
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool_authority
    )]
    pub stake_vault: Account<'info, TokenAccount>,
    
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool_authority
    )]
    pub reward_vault: Account<'info, TokenAccount>,
    
    #[account(mut)]
    pub authority: Signer<'info>,
    
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePool>,
    reward_rate: u64,
    stake_fee: u64,
    unstake_fee: u64,
) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let pool = &mut ctx.accounts.staking_pool;
    let clock = Clock::get()?;
    
    engine::initialize(
        pool,
        ctx.accounts.authority.key(),
        reward_rate,
        stake_fee,
        unstake_fee,
        clock.unix_timestamp,
    )?;
    
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();
    pool.bump = ctx.bumps.staking_pool;
    pool.authority_bump = ctx.bumps.pool_authority;
    
    emit!(PoolInitialized {
        pool: pool_key,
        authority: pool.authority,
        stake_mint: pool.stake_mint,
        reward_mint: pool.reward_mint,
        reward_rate,
        stake_fee,
        unstake_fee,
        timestamp: clock.unix_timestamp,
    });
    
    msg!("Initialized staking pool for mint: {}", pool.stake_mint);
    msg!("Authority: {}", pool.authority);
    msg!("Reward mint: {}, rate: {}/s", pool.reward_mint, reward_rate);
    msg!("Fees: stake {} / unstake {} lamports", stake_fee, unstake_fee);
    
    Ok(())
}
