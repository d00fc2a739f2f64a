//! Protocol error definitions.

use odra::prelude::*;

/// Lending protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LendError {
    // Accounting errors (1xx)
    AmountZero = 100,
    InsufficientCollateral = 101,
    HealthFactorBelowOne = 102,
    InsufficientLiquidity = 103,

    // Oracle errors (2xx)
    NoOracleRegistered = 200,
    UnsupportedAsset = 201,
    DecimalsExceeded = 202,
    StaleOraclePrice = 203,
    StaleProtocolPrice = 204,

    // Cross-chain messaging errors (3xx)
    NotEndpoint = 300,
    UntrustedSource = 301,
    Replay = 302,
    InvalidPayload = 303,
    UnknownMessageType = 304,
    ValueMismatch = 305,
    LedgerNotLinked = 306,
    LedgerAlreadyLinked = 307,

    // Access control errors (4xx)
    Unauthorized = 400,

    // Token errors (5xx)
    InsufficientTokenBalance = 500,
    InsufficientAllowance = 501,

    // Configuration errors (9xx)
    InvalidConfig = 900,
}

impl LendError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Accounting
            LendError::AmountZero => "Amount must be greater than zero",
            LendError::InsufficientCollateral => "Insufficient collateral for requested debt",
            LendError::HealthFactorBelowOne => "Withdrawal would push health factor below 1",
            LendError::InsufficientLiquidity => "Insufficient reserve liquidity",

            // Oracle
            LendError::NoOracleRegistered => "No oracle registered for asset",
            LendError::UnsupportedAsset => "Asset not supported by this adapter",
            LendError::DecimalsExceeded => "Feed decimals exceed 18",
            LendError::StaleOraclePrice => "Price older than feed heartbeat",
            LendError::StaleProtocolPrice => "Price older than protocol max delay",

            // Cross-chain messaging
            LendError::NotEndpoint => "Caller is not the messaging endpoint",
            LendError::UntrustedSource => "Sender not trusted for source chain",
            LendError::Replay => "Message nonce already processed",
            LendError::InvalidPayload => "Malformed message payload",
            LendError::UnknownMessageType => "Unknown message type",
            LendError::ValueMismatch => "Payload amount does not match delivered value",
            LendError::LedgerNotLinked => "Receiver not linked to a ledger",
            LendError::LedgerAlreadyLinked => "Ledger already linked",

            // Access control
            LendError::Unauthorized => "Unauthorized: caller is not admin",

            // Token
            LendError::InsufficientTokenBalance => "Insufficient token balance",
            LendError::InsufficientAllowance => "Insufficient token allowance",

            // Config
            LendError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for LendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<LendError> for OdraError {
    fn from(error: LendError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
