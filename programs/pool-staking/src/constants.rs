/// PDA: ["staking-pool", stake_mint]
pub const STAKING_POOL_SEED: &[u8] = b"staking-pool";

/// PDA: ["stake-account", staking_pool, owner]
pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake-account";

/// PDA: ["pool-authority", staking_pool]. Signs for both vaults.
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool-authority";

/// PDA: ["stake-vault", staking_pool]
pub const STAKE_VAULT_SEED: &[u8] = b"stake-vault";

/// PDA: ["reward-vault", staking_pool]
pub const REWARD_VAULT_SEED: &[u8] = b"reward-vault";

/// Fixed-point scale of `acc_reward_per_share` (1e12).
pub const SCALE: u128 = 1_000_000_000_000;
