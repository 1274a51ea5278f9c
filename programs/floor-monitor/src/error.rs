use num_derive::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, FromPrimitive, PartialEq)]
pub enum FloorMonitorError {
    #[error("Invalid instruction")]
    InvalidInstruction = 0,

    #[error("Invalid account data")]
    InvalidAccountData = 1,

    #[error("Invalid PDA")]
    InvalidPDA = 2,

    #[error("Already initialized")]
    AlreadyInitialized = 3,

    #[error("Not initialized")]
    NotInitialized = 4,

    #[error("Invalid authority")]
    InvalidAuthority = 5,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 6,

    #[error("Feed reported a non-positive price")]
    InvalidPrice = 7,

    #[error("Feed data is stale")]
    StaleData = 8,

    #[error("Price feeds disagree beyond tolerance")]
    OracleDisagreement = 9,

    #[error("Caller is not an authorized detector")]
    Unauthorized = 10,

    #[error("Invalid response input")]
    InvalidInput = 11,

    #[error("Detector set is full")]
    TooManyDetectors = 12,

    #[error("Collection id does not match account")]
    CollectionMismatch = 13,
}

impl PrintProgramError for FloorMonitorError {
    fn print<E>(&self) {
        use solana_program::msg;
        msg!("FloorMonitorError: {}", self);
    }
}

impl From<FloorMonitorError> for ProgramError {
    fn from(e: FloorMonitorError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for FloorMonitorError {
    fn type_of() -> &'static str {
        "FloorMonitorError"
    }
}
