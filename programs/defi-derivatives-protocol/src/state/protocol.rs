use anchor_lang::prelude::*;

/// Global protocol state
///
/// Singleton PDA holding the admin authority. Created once by `initialize`.
#[account]
#[derive(Default, Debug)]
pub struct ProtocolState {
    /// Authority allowed to administer the protocol
    pub admin: Pubkey,
    /// Bump seed for the state PDA
    pub bump: u8,
}

impl ProtocolState {
    /// Account size in bytes (8 byte discriminator + data)
    pub const LEN: usize = 8 + std::mem::size_of::<ProtocolState>();
}
