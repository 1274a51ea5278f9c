use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::state::ResponsePayload;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub enum FloorMonitorInstruction {
    /// Initialize the monitor
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Monitor config PDA
    /// 2. `[]` System program
    /// 3. `[]` Rent sysvar
    InitializeMonitor,

    /// Register a collection for monitoring
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[]` Monitor config PDA
    /// 2. `[writable]` Collection status PDA
    /// 3. `[writable]` Crash history PDA
    /// 4. `[]` System program
    /// 5. `[]` Rent sysvar
    RegisterCollection {
        collection_id: Pubkey,
    },

    /// Grant or revoke a detector's authorization
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[writable]` Monitor config PDA
    SetDetectorAuthorization {
        detector: Pubkey,
        authorized: bool,
    },

    /// Submit a crash response
    /// Accounts:
    /// 0. `[signer]` Detector
    /// 1. `[writable]` Monitor config PDA
    /// 2. `[writable]` Collection status PDA
    /// 3. `[writable]` Crash history PDA
    Respond {
        payload: ResponsePayload,
    },

    /// Force a collection's emergency flag with a recorded reason
    /// Accounts:
    /// 0. `[signer]` Owner
    /// 1. `[]` Monitor config PDA
    /// 2. `[writable]` Collection status PDA
    SetEmergencyOverride {
        collection_id: Pubkey,
        emergency: bool,
        reason: String,
    },
}

impl FloorMonitorInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&variant, rest) = input.split_first().ok_or(ProgramError::InvalidInstructionData)?;

        match variant {
            0 => Ok(Self::InitializeMonitor),
            1..=4 => Self::try_from_slice(rest).map_err(|_| ProgramError::InvalidInstructionData),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        match self {
            Self::InitializeMonitor => {
                buf.push(0);
            }
            Self::RegisterCollection { .. } => {
                buf.push(1);
                buf.extend_from_slice(&self.try_to_vec().unwrap());
            }
            Self::SetDetectorAuthorization { .. } => {
                buf.push(2);
                buf.extend_from_slice(&self.try_to_vec().unwrap());
            }
            Self::Respond { .. } => {
                buf.push(3);
                buf.extend_from_slice(&self.try_to_vec().unwrap());
            }
            Self::SetEmergencyOverride { .. } => {
                buf.push(4);
                buf.extend_from_slice(&self.try_to_vec().unwrap());
            }
        }
        buf
    }
}

// Helper functions to create instructions
pub fn initialize_monitor(
    program_id: &Pubkey,
    owner: &Pubkey,
    config_pda: &Pubkey,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*config_pda, false),
        AccountMeta::new_readonly(solana_program::system_program::id(), false),
        AccountMeta::new_readonly(solana_program::sysvar::rent::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: FloorMonitorInstruction::InitializeMonitor.pack(),
    }
}

pub fn register_collection(
    program_id: &Pubkey,
    owner: &Pubkey,
    config_pda: &Pubkey,
    status_pda: &Pubkey,
    history_pda: &Pubkey,
    collection_id: Pubkey,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new_readonly(*config_pda, false),
        AccountMeta::new(*status_pda, false),
        AccountMeta::new(*history_pda, false),
        AccountMeta::new_readonly(solana_program::system_program::id(), false),
        AccountMeta::new_readonly(solana_program::sysvar::rent::id(), false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: FloorMonitorInstruction::RegisterCollection { collection_id }.pack(),
    }
}

pub fn set_detector_authorization(
    program_id: &Pubkey,
    owner: &Pubkey,
    config_pda: &Pubkey,
    detector: Pubkey,
    authorized: bool,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*config_pda, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: FloorMonitorInstruction::SetDetectorAuthorization {
            detector,
            authorized,
        }
        .pack(),
    }
}

pub fn respond(
    program_id: &Pubkey,
    detector: &Pubkey,
    config_pda: &Pubkey,
    status_pda: &Pubkey,
    history_pda: &Pubkey,
    payload: ResponsePayload,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*detector, true),
        AccountMeta::new(*config_pda, false),
        AccountMeta::new(*status_pda, false),
        AccountMeta::new(*history_pda, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: FloorMonitorInstruction::Respond { payload }.pack(),
    }
}

pub fn set_emergency_override(
    program_id: &Pubkey,
    owner: &Pubkey,
    config_pda: &Pubkey,
    status_pda: &Pubkey,
    collection_id: Pubkey,
    emergency: bool,
    reason: String,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new_readonly(*config_pda, false),
        AccountMeta::new(*status_pda, false),
    ];

    Instruction {
        program_id: *program_id,
        accounts,
        data: FloorMonitorInstruction::SetEmergencyOverride {
            collection_id,
            emergency,
            reason,
        }
        .pack(),
    }
}
