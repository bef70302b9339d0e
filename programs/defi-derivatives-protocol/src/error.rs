use anchor_lang::prelude::*;

#[error_code]
pub enum ProtocolError {
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Option has already been exercised.")]
    OptionAlreadyExercised,
    #[msg("Option has expired.")]
    OptionExpired,
    #[msg("Option has not expired yet.")]
    OptionNotExpired,
    #[msg("Invalid expiration time.")]
    InvalidExpiration,
    #[msg("Insufficient funds.")]
    InsufficientFunds,
    #[msg("Invalid amount.")]
    InvalidAmount,
    #[msg("Invalid pricing input.")]
    InvalidPricingInput,
}
