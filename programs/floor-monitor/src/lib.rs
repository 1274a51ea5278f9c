use solana_program::{
    account_info::AccountInfo,
    entrypoint,
    entrypoint::ProgramResult,
    pubkey::Pubkey,
    msg,
};

pub mod classify;
pub mod config;
pub mod error;
pub mod instruction;
pub mod math;
pub mod oracle;
pub mod processor;
pub mod state;

use crate::processor::Processor;

solana_program::declare_id!("44444444444444444444444444444444444444444444");

entrypoint!(process);

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("Floor Monitor Program entrypoint");
    Processor::process(program_id, accounts, instruction_data)
}
