use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Pool is already initialized")]
    AlreadyInitialized,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient staked balance")]
    InsufficientStake,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("No rewards to claim")]
    NothingToClaim,

    #[msg("Stake position not found")]
    PositionNotFound,

    #[msg("Pool is paused")]
    PoolPaused,

    #[msg("Stake position still holds stake or unclaimed rewards")]
    PositionNotEmpty,

    #[msg("Insufficient rewards in vault")]
    InsufficientRewards,

    #[msg("Invalid authority")]
    InvalidAuthority,

    #[msg("Vault does not belong to this pool")]
    InvalidVault,

    #[msg("Insufficient collected fees")]
    InsufficientFees,
}
