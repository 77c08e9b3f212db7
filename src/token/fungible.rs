//! The fungible-token interface pairs consume.

use crate::domain::{Address, Amount};

/// A fungible token as seen by the exchange core.
///
/// This is the only surface through which pairs move tokens. Calls that
/// move value report success as a `bool`, so a non-conforming token can
/// refuse a transfer without the pair trusting it. The acting account is
/// always passed explicitly.
///
/// Implementations must be callable from several threads and must not
/// hold internal locks while calling back into other components, or a
/// reentrant call from a callback could deadlock.
pub trait FungibleToken: Send + Sync {
    /// Identity of the token.
    fn address(&self) -> Address;

    /// Balance held by `owner`.
    fn balance_of(&self, owner: &Address) -> Amount;

    /// Amount `spender` may still move on behalf of `owner`.
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Moves `amount` from `from` to `to`, acting as `from`.
    fn transfer(&self, from: Address, to: Address, amount: Amount) -> bool;

    /// Sets `spender`'s allowance over `owner`'s balance to `amount`.
    fn approve(&self, owner: Address, spender: Address, amount: Amount) -> bool;

    /// Moves `amount` from `owner` to `to` against the allowance granted
    /// to `spender`.
    fn transfer_from(&self, spender: Address, owner: Address, to: Address, amount: Amount)
        -> bool;
}
