use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};
use borsh::BorshDeserialize;

use crate::{
    config::MAX_REPORTER_TAG_LEN,
    error::FloorMonitorError,
    instruction::FloorMonitorInstruction,
    state::{CollectionStatus, CrashHistory, CrashKind, MonitorConfig, ResponsePayload},
};

pub struct Processor;

impl Processor {
    fn borsh_deserialize_unchecked<T: BorshDeserialize>(data: &[u8]) -> Result<T, ProgramError> {
        let mut cursor: &[u8] = data;
        T::deserialize(&mut cursor).map_err(|_| ProgramError::InvalidAccountData)
    }

    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = FloorMonitorInstruction::unpack(instruction_data)?;

        match instruction {
            FloorMonitorInstruction::InitializeMonitor => {
                msg!("Instruction: InitializeMonitor");
                Self::process_initialize_monitor(accounts, program_id)
            }
            FloorMonitorInstruction::RegisterCollection { collection_id } => {
                msg!("Instruction: RegisterCollection");
                Self::process_register_collection(accounts, program_id, collection_id)
            }
            FloorMonitorInstruction::SetDetectorAuthorization { detector, authorized } => {
                msg!("Instruction: SetDetectorAuthorization");
                Self::process_set_detector_authorization(accounts, program_id, detector, authorized)
            }
            FloorMonitorInstruction::Respond { payload } => {
                msg!("Instruction: Respond");
                Self::process_respond(accounts, program_id, payload)
            }
            FloorMonitorInstruction::SetEmergencyOverride { collection_id, emergency, reason } => {
                msg!("Instruction: SetEmergencyOverride");
                Self::process_set_emergency_override(
                    accounts,
                    program_id,
                    collection_id,
                    emergency,
                    reason,
                )
            }
        }
    }

    fn process_initialize_monitor(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let rent = &Rent::from_account_info(next_account_info(account_info_iter)?)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let (config_pubkey, config_bump) =
            Pubkey::find_program_address(&[MonitorConfig::SEED], program_id);

        if config_pubkey != *config_info.key {
            return Err(FloorMonitorError::InvalidPDA.into());
        }

        if config_info.owner == program_id {
            return Err(FloorMonitorError::AlreadyInitialized.into());
        }

        let config_lamports = rent.minimum_balance(MonitorConfig::LEN);

        invoke_signed(
            &system_instruction::create_account(
                owner_info.key,
                config_info.key,
                config_lamports,
                MonitorConfig::LEN as u64,
                program_id,
            ),
            &[owner_info.clone(), config_info.clone(), system_program.clone()],
            &[&[MonitorConfig::SEED, &[config_bump]]],
        )?;

        let config = MonitorConfig::new(*owner_info.key, config_bump);
        borsh::to_writer(&mut config_info.try_borrow_mut_data()?.as_mut(), &config)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        msg!("Floor monitor initialized, owner {}", owner_info.key);
        Ok(())
    }

    fn process_register_collection(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        collection_id: Pubkey,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let status_info = next_account_info(account_info_iter)?;
        let history_info = next_account_info(account_info_iter)?;
        let system_program = next_account_info(account_info_iter)?;
        let rent = &Rent::from_account_info(next_account_info(account_info_iter)?)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if collection_id == Pubkey::default() {
            return Err(FloorMonitorError::InvalidInput.into());
        }

        let config: MonitorConfig =
            Self::borsh_deserialize_unchecked(&config_info.try_borrow_data()?)?;

        if !config.is_initialized {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        if *owner_info.key != config.owner {
            return Err(FloorMonitorError::InvalidAuthority.into());
        }

        let (status_pubkey, status_bump) = Pubkey::find_program_address(
            &[CollectionStatus::SEED, collection_id.as_ref()],
            program_id,
        );

        if status_pubkey != *status_info.key {
            return Err(FloorMonitorError::InvalidPDA.into());
        }

        if status_info.owner == program_id {
            return Err(FloorMonitorError::AlreadyInitialized.into());
        }

        let (history_pubkey, history_bump) = Pubkey::find_program_address(
            &[CrashHistory::SEED, collection_id.as_ref()],
            program_id,
        );

        if history_pubkey != *history_info.key {
            return Err(FloorMonitorError::InvalidPDA.into());
        }

        let status_lamports = rent.minimum_balance(CollectionStatus::LEN);

        invoke_signed(
            &system_instruction::create_account(
                owner_info.key,
                status_info.key,
                status_lamports,
                CollectionStatus::LEN as u64,
                program_id,
            ),
            &[owner_info.clone(), status_info.clone(), system_program.clone()],
            &[&[CollectionStatus::SEED, collection_id.as_ref(), &[status_bump]]],
        )?;

        let status = CollectionStatus::new(collection_id, status_bump);
        borsh::to_writer(&mut status_info.try_borrow_mut_data()?.as_mut(), &status)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        let history_size = CrashHistory::calculate_size();
        let history_lamports = rent.minimum_balance(history_size);

        invoke_signed(
            &system_instruction::create_account(
                owner_info.key,
                history_info.key,
                history_lamports,
                history_size as u64,
                program_id,
            ),
            &[owner_info.clone(), history_info.clone(), system_program.clone()],
            &[&[CrashHistory::SEED, collection_id.as_ref(), &[history_bump]]],
        )?;

        let history = CrashHistory::new(collection_id, history_bump);
        borsh::to_writer(&mut history_info.try_borrow_mut_data()?.as_mut(), &history)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        msg!("Collection {} registered", collection_id);
        Ok(())
    }

    fn process_set_detector_authorization(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        detector: Pubkey,
        authorized: bool,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if config_info.owner != program_id {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        let mut config_data = config_info.try_borrow_mut_data()?;
        let mut config: MonitorConfig = Self::borsh_deserialize_unchecked(&config_data)?;

        if !config.is_initialized {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        if *owner_info.key != config.owner {
            return Err(FloorMonitorError::InvalidAuthority.into());
        }

        config.set_authorization(detector, authorized)?;

        borsh::to_writer(&mut config_data.as_mut(), &config)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        msg!("Detector {} authorization set to {}", detector, authorized);
        Ok(())
    }

    fn process_respond(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        payload: ResponsePayload,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let detector_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let status_info = next_account_info(account_info_iter)?;
        let history_info = next_account_info(account_info_iter)?;

        if !detector_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if config_info.owner != program_id || status_info.owner != program_id
            || history_info.owner != program_id
        {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        let mut config_data = config_info.try_borrow_mut_data()?;
        let mut config: MonitorConfig = Self::borsh_deserialize_unchecked(&config_data)?;

        if !config.is_initialized {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        if !config.is_authorized(detector_info.key) {
            return Err(FloorMonitorError::Unauthorized.into());
        }

        // Full input validation before any mutation: a rejected
        // response must leave every account untouched.
        let crash_kind = match CrashKind::from_u8(payload.crash_kind) {
            Some(CrashKind::None) | None => return Err(FloorMonitorError::InvalidInput.into()),
            Some(kind) => kind,
        };

        if payload.reporter_tag.is_empty()
            || payload.reporter_tag.len() > MAX_REPORTER_TAG_LEN
            || payload.collection_id == Pubkey::default()
            || payload.current_price == 0
            || payload.baseline_price == 0
        {
            return Err(FloorMonitorError::InvalidInput.into());
        }

        let mut status_data = status_info.try_borrow_mut_data()?;
        let mut status: CollectionStatus = Self::borsh_deserialize_unchecked(&status_data)?;

        if !status.is_initialized {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        if status.collection_id != payload.collection_id {
            return Err(FloorMonitorError::CollectionMismatch.into());
        }

        let (status_pubkey, _) = Pubkey::find_program_address(
            &[CollectionStatus::SEED, payload.collection_id.as_ref()],
            program_id,
        );
        if status_pubkey != *status_info.key {
            return Err(FloorMonitorError::InvalidPDA.into());
        }

        let mut history_data = history_info.try_borrow_mut_data()?;
        let mut history: CrashHistory = Self::borsh_deserialize_unchecked(&history_data)?;

        if !history.is_initialized || history.collection_id != payload.collection_id {
            return Err(FloorMonitorError::CollectionMismatch.into());
        }

        let sequence = history.append(
            payload.collection_id,
            payload.detected_at,
            payload.current_price,
            payload.baseline_price,
            crash_kind,
            payload.severity_bps,
            payload.reporter_tag.clone(),
        );

        status.record_crash(payload.detected_at, payload.current_price);
        config.total_crashes = config.total_crashes.saturating_add(1);

        let escalated = crash_kind.escalates(
            payload.current_price,
            payload.baseline_price,
            payload.severity_bps,
        );

        if escalated && !status.emergency_mode {
            status.emergency_mode = true;
            msg!(
                "Emergency mode activated for collection {} (kind {}, severity {} bps)",
                payload.collection_id,
                payload.crash_kind,
                payload.severity_bps
            );
        }

        borsh::to_writer(&mut history_data.as_mut(), &history)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        borsh::to_writer(&mut status_data.as_mut(), &status)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        borsh::to_writer(&mut config_data.as_mut(), &config)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        msg!(
            "Crash response {} recorded for collection {}",
            sequence,
            payload.collection_id
        );
        Ok(())
    }

    fn process_set_emergency_override(
        accounts: &[AccountInfo],
        program_id: &Pubkey,
        collection_id: Pubkey,
        emergency: bool,
        reason: String,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let owner_info = next_account_info(account_info_iter)?;
        let config_info = next_account_info(account_info_iter)?;
        let status_info = next_account_info(account_info_iter)?;

        if !owner_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        if config_info.owner != program_id || status_info.owner != program_id {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        let config: MonitorConfig =
            Self::borsh_deserialize_unchecked(&config_info.try_borrow_data()?)?;

        if !config.is_initialized {
            return Err(FloorMonitorError::NotInitialized.into());
        }

        if *owner_info.key != config.owner {
            return Err(FloorMonitorError::InvalidAuthority.into());
        }

        let mut status_data = status_info.try_borrow_mut_data()?;
        let mut status: CollectionStatus = Self::borsh_deserialize_unchecked(&status_data)?;

        if !status.is_initialized || status.collection_id != collection_id {
            return Err(FloorMonitorError::CollectionMismatch.into());
        }

        status.emergency_mode = emergency;

        borsh::to_writer(&mut status_data.as_mut(), &status)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        msg!(
            "Emergency override for collection {}: {} ({})",
            collection_id,
            emergency,
            reason
        );
        Ok(())
    }
}
