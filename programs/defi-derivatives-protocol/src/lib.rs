use anchor_lang::prelude::*;

pub mod error;
pub mod instructions;
pub mod math;
pub mod pricing;
pub mod state;

use instructions::*;

declare_id!("F8UMUHpN1TRPGTHoDUWbeNNhDSJtq2YR4wqjkLe3x9GL");

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "DeFi Derivatives Protocol",
    project_url: "https://github.com/defi-derivatives/defi-derivatives-protocol",
    contacts: "email:security@defi-derivatives.dev",
    policy: "https://github.com/defi-derivatives/defi-derivatives-protocol/blob/main/SECURITY.md"
}

#[program]
pub mod defi_derivatives_protocol {
    use super::*;

    /// Initialize the protocol state and record the admin
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::initialize(ctx)
    }

    /// Write a covered call: escrow the underlying and record the terms
    pub fn create_option(ctx: Context<CreateOption>, params: CreateOptionParams) -> Result<()> {
        instructions::create_option::create_option(ctx, &params)
    }

    /// Pay the strike and take delivery of the escrowed underlying
    pub fn exercise_option(ctx: Context<ExerciseOption>) -> Result<()> {
        instructions::exercise_option::exercise_option(ctx)
    }

    /// Wind down an exercised or expired option and reclaim the escrow
    pub fn close_option(ctx: Context<CloseOption>) -> Result<()> {
        instructions::close_option::close_option(ctx)
    }

    /// Rotate the protocol admin
    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::set_admin::set_admin(ctx, new_admin)
    }
}
