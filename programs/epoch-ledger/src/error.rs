use anchor_lang::prelude::*;

use crate::config::ValidationProfile;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum LedgerError {
    #[msg("Caller is not permitted to perform this action")]
    NotAuthorized,

    #[msg("Current epoch is closed or its submission window has expired")]
    EpochClosed,

    #[msg("Epoch is already closed")]
    AlreadyClosed,

    #[msg("Epoch window has not elapsed yet")]
    TooEarly,

    #[msg("Epoch must be closed before it can be finalized")]
    NotClosed,

    #[msg("Epoch has already been finalized")]
    AlreadyFinalized,

    #[msg("Epoch has no submissions to aggregate")]
    NoSubmissions,

    #[msg("Category is out of range")]
    InvalidCategory,

    #[msg("Value is outside the accepted bounds")]
    InvalidValue,

    #[msg("Location must be non-empty and at most 50 UTF-16 code units")]
    InvalidLocation,

    #[msg("Age range is out of range")]
    InvalidAgeRange,

    #[msg("Proof hash must be 32 bytes and not all zero")]
    InvalidProof,

    #[msg("Participant already submitted in this epoch")]
    DuplicateSubmission,

    #[msg("Commitment already registered for this epoch")]
    AlreadyRegistered,

    #[msg("Proof hash must be exactly 32 bytes")]
    InvalidProofLength,

    #[msg("Proof hash has already been used")]
    ProofReplayed,

    #[msg("No commitment registered for this epoch and submitter")]
    NoCommitment,

    #[msg("Revealed fields do not match the registered commitment")]
    HashMismatch,

    #[msg("Arithmetic overflow in running totals")]
    ArithmeticOverflow,

    #[msg("Ledger configuration is inconsistent")]
    InvalidConfig,

    #[msg("Record account is missing or not at its derived address")]
    RecordAccountMismatch,
}

/// Coarse failure taxonomy shared by all actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Authorization,
    LifecycleViolation,
    ValidationError,
    DuplicateWrite,
    IntegrityFailure,
    ReplayViolation,
}

/// Ledger actions, used to resolve legacy status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    CloseEpoch,
    FinalizeEpoch,
    ForceNewEpoch,
    UpdateAuthority,
    RegisterCommitment,
    VerifyProof,
}

impl LedgerError {
    pub fn class(self) -> ErrorClass {
        use LedgerError::*;
        match self {
            NotAuthorized => ErrorClass::Authorization,
            EpochClosed | AlreadyClosed | TooEarly | NotClosed | AlreadyFinalized
            | NoSubmissions => ErrorClass::LifecycleViolation,
            InvalidCategory | InvalidValue | InvalidLocation | InvalidAgeRange | InvalidProof
            | InvalidProofLength | ArithmeticOverflow | InvalidConfig | RecordAccountMismatch => {
                ErrorClass::ValidationError
            }
            DuplicateSubmission | AlreadyRegistered => ErrorClass::DuplicateWrite,
            NoCommitment | HashMismatch => ErrorClass::IntegrityFailure,
            ProofReplayed => ErrorClass::ReplayViolation,
        }
    }

    /// Numeric status code reported by the original contract surface.
    ///
    /// Submission codes differ between the two validation profiles, every other
    /// action has a single table. Combinations an action can never produce fall
    /// back to 0.
    pub fn status_code(self, action: Action, profile: ValidationProfile) -> u32 {
        use LedgerError::*;
        if let ArithmeticOverflow = self {
            return 111;
        }
        if let InvalidConfig = self {
            return 112;
        }
        match action {
            Action::Submit => match (profile, self) {
                (_, EpochClosed) => 101,
                (ValidationProfile::Aggregation, DuplicateSubmission) => 103,
                (ValidationProfile::Aggregation, InvalidProof) => 104,
                (ValidationProfile::Aggregation, InvalidCategory) => 105,
                (ValidationProfile::Aggregation, InvalidValue) => 106,
                (ValidationProfile::Aggregation, InvalidLocation) => 107,
                (ValidationProfile::Aggregation, InvalidAgeRange) => 108,
                (ValidationProfile::Demographic, InvalidCategory) => 103,
                (ValidationProfile::Demographic, InvalidValue) => 104,
                (ValidationProfile::Demographic, DuplicateSubmission) => 105,
                (ValidationProfile::Demographic, InvalidLocation) => 107,
                (ValidationProfile::Demographic, InvalidAgeRange) => 108,
                (ValidationProfile::Demographic, InvalidProof) => 109,
                _ => 0,
            },
            Action::CloseEpoch => match self {
                NotAuthorized => 100,
                AlreadyClosed => 101,
                TooEarly => 102,
                _ => 0,
            },
            Action::FinalizeEpoch => match self {
                NotAuthorized => 100,
                NotClosed => 102,
                NoSubmissions => 108,
                AlreadyFinalized => 110,
                _ => 0,
            },
            Action::ForceNewEpoch | Action::UpdateAuthority => match self {
                NotAuthorized => 100,
                _ => 0,
            },
            Action::RegisterCommitment => match self {
                NotAuthorized => 100,
                AlreadyRegistered => 104,
                _ => 0,
            },
            Action::VerifyProof => match self {
                NotAuthorized => 100,
                InvalidProofLength => 102,
                ProofReplayed => 103,
                InvalidCategory => 106,
                InvalidValue => 107,
                HashMismatch => 108,
                NoCommitment => 109,
                _ => 0,
            },
        }
    }
}
