//! SetAdmin instruction handler

use {crate::state::ProtocolState, anchor_lang::prelude::*};

/// Accounts required for rotating the protocol admin
#[derive(Accounts)]
pub struct SetAdmin<'info> {
    /// Current admin (signer)
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin,
        seeds = [b"state"],
        bump = state.bump
    )]
    pub state: Account<'info, ProtocolState>,
}

/// Hand protocol administration to a new authority
pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let state = &mut ctx.accounts.state;
    state.admin = new_admin;

    msg!("Admin set to: {}", new_admin);

    Ok(())
}
