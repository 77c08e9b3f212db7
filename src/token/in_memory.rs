//! Reference in-memory fungible token.

use parking_lot::Mutex;

use super::ledger::Ledger;
use super::FungibleToken;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::mul_div;

/// Basis-point denominator for the transfer fee.
const BPS_DENOMINATOR: u64 = 10_000;

/// An ERC-20 style token living in memory.
///
/// Supports open minting for test setups and an optional fee on
/// transfer: a token configured with `fee_bps` delivers
/// `amount − amount × fee_bps / 10_000` to the recipient and burns the
/// rest. Transfers to the zero address are refused.
///
/// # Examples
///
/// ```
/// use ezswap_core::domain::{Address, Amount};
/// use ezswap_core::token::{FungibleToken, InMemoryToken};
///
/// let alice = Address::repeat_byte(0xa1);
/// let bob = Address::repeat_byte(0xb0);
/// let token = InMemoryToken::new(Address::repeat_byte(1), "Token A", "TKA", 18);
///
/// token.mint(alice, Amount::from(100u64)).expect("mint");
/// assert!(token.transfer(alice, bob, Amount::from(40u64)));
/// assert_eq!(token.balance_of(&bob), Amount::from(40u64));
/// ```
#[derive(Debug)]
pub struct InMemoryToken {
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    fee_bps: u16,
    ledger: Mutex<Ledger<Amount>>,
}

impl InMemoryToken {
    /// Creates a token with no supply and no transfer fee.
    #[must_use]
    pub fn new(address: Address, name: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address,
            name: name.to_owned(),
            symbol: symbol.to_owned(),
            decimals,
            fee_bps: 0,
            ledger: Mutex::new(Ledger::new()),
        }
    }

    /// Charges `fee_bps` basis points on every transfer, burned from the
    /// transferred amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee_bps` is 10 000
    /// or more.
    pub fn with_transfer_fee(mut self, fee_bps: u16) -> Result<Self, AmmError> {
        if u64::from(fee_bps) >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(
                "transfer fee must be below 10000 bps",
            ));
        }
        self.fee_bps = fee_bps;
        Ok(self)
    }

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Decimal places used for display.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Transfer fee in basis points.
    #[must_use]
    pub const fn transfer_fee_bps(&self) -> u16 {
        self.fee_bps
    }

    /// Total supply.
    pub fn total_supply(&self) -> Amount {
        self.ledger.lock().total()
    }

    /// Creates `amount` new tokens owned by `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `to` is the zero address.
    /// - [`AmmError::Overflow`] if the supply overflows.
    pub fn mint(&self, to: Address, amount: Amount) -> Result<(), AmmError> {
        if to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.ledger.lock().mint(to, amount)?;
        tracing::debug!(token = %self.address, %to, %amount, "minted");
        Ok(())
    }

    fn fee_on(&self, amount: Amount) -> Result<Amount, AmmError> {
        if self.fee_bps == 0 {
            return Ok(Amount::ZERO);
        }
        mul_div(
            amount.get(),
            Amount::from(u64::from(self.fee_bps)).get(),
            Amount::from(BPS_DENOMINATOR).get(),
        )
        .map(Amount::new)
    }

    fn move_tokens(
        &self,
        ledger: &mut Ledger<Amount>,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if to.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let fee = self.fee_on(amount)?;
        if fee.is_zero() {
            return ledger.transfer(from, to, amount);
        }
        ledger.burn(from, fee)?;
        ledger.transfer(from, to, amount.saturating_sub(&fee))
    }
}

impl FungibleToken for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, owner: &Address) -> Amount {
        self.ledger.lock().balance_of(owner)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.ledger.lock().allowance(owner, spender)
    }

    fn transfer(&self, from: Address, to: Address, amount: Amount) -> bool {
        let mut ledger = self.ledger.lock();
        let mut staged = ledger.clone();
        match self.move_tokens(&mut staged, from, to, amount) {
            Ok(()) => {
                *ledger = staged;
                true
            }
            Err(err) => {
                tracing::debug!(token = %self.address, %from, %to, %amount, %err, "transfer refused");
                false
            }
        }
    }

    fn approve(&self, owner: Address, spender: Address, amount: Amount) -> bool {
        if spender.is_zero() {
            return false;
        }
        self.ledger.lock().approve(owner, spender, amount);
        true
    }

    fn transfer_from(
        &self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> bool {
        let mut ledger = self.ledger.lock();
        let mut staged = ledger.clone();
        let result = staged
            .spend_allowance(owner, spender, amount)
            .and_then(|()| self.move_tokens(&mut staged, owner, to, amount));
        match result {
            Ok(()) => {
                *ledger = staged;
                true
            }
            Err(err) => {
                tracing::debug!(token = %self.address, %spender, %owner, %to, %amount, %err, "transfer_from refused");
                false
            }
        }
    }
}
