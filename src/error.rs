//! Unified error types for the EzSwap core.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, so callers can match exact failure causes regardless of
//! whether the factory, a pair, or a token collaborator rejected the call.
//!
//! Errors fall into four groups:
//!
//! - **Validation**: [`IdenticalAddresses`](AmmError::IdenticalAddresses),
//!   [`ZeroAddress`](AmmError::ZeroAddress),
//!   [`InvalidToken`](AmmError::InvalidToken),
//!   [`ZeroAmount`](AmmError::ZeroAmount),
//!   [`InvalidConfiguration`](AmmError::InvalidConfiguration).
//! - **State conflict**: [`PairExists`](AmmError::PairExists),
//!   [`AlreadyInitialized`](AmmError::AlreadyInitialized),
//!   [`NotInitialized`](AmmError::NotInitialized),
//!   [`Locked`](AmmError::Locked),
//!   [`IndexOutOfBounds`](AmmError::IndexOutOfBounds).
//! - **Economic invariants**: [`InsufficientLiquidity`](AmmError::InsufficientLiquidity),
//!   [`InsufficientInputAmount`](AmmError::InsufficientInputAmount),
//!   [`InsufficientLiquidityBalance`](AmmError::InsufficientLiquidityBalance),
//!   [`InsufficientAllowance`](AmmError::InsufficientAllowance),
//!   [`KInvariant`](AmmError::KInvariant).
//! - **Collaborators and arithmetic**: [`UnknownToken`](AmmError::UnknownToken),
//!   [`TransferFailed`](AmmError::TransferFailed),
//!   [`Overflow`](AmmError::Overflow),
//!   [`DivisionByZero`](AmmError::DivisionByZero).
//!
//! A failed call never leaves partially applied pool state behind.

use alloy_primitives::Address;

/// Every error the AMM core can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// Both token identities of a pair are the same.
    #[error("token addresses are identical")]
    IdenticalAddresses,

    /// A token identity is the zero address.
    #[error("token address is the zero address")]
    ZeroAddress,

    /// A pair for the token set has already been created.
    #[error("pair already exists")]
    PairExists,

    /// `initialize` was called on an initialized pair.
    #[error("pair is already initialized")]
    AlreadyInitialized,

    /// A state-changing call reached a pair that was never initialized.
    #[error("pair is not initialized")]
    NotInitialized,

    /// A token argument is not acceptable for this pair.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A required amount is zero, or a deposit would mint zero shares.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// The pool cannot cover the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A swap was requested without sending any input first.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// The caller holds fewer liquidity shares than requested.
    #[error("insufficient liquidity share balance")]
    InsufficientLiquidityBalance,

    /// The spender's allowance does not cover the transfer.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The constant product of the reserves would decrease.
    #[error("constant product invariant violated")]
    KInvariant,

    /// A state-changing call re-entered a pair that is mid-operation.
    #[error("reentrant call rejected")]
    Locked,

    /// `all_pairs(index)` was asked for a position past the end.
    #[error("pair index {index} out of bounds (length {length})")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of pairs created so far.
        length: usize,
    },

    /// No token handle is registered for the address.
    #[error("unknown token {0}")]
    UnknownToken(Address),

    /// A token collaborator refused a transfer.
    #[error("transfer of token {token} failed")]
    TransferFailed {
        /// The token whose transfer failed.
        token: Address,
    },

    /// An intermediate computation exceeded the 256-bit range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;
