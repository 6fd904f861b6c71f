//! In-memory token ledger.

use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;

use crate::domain::{Amount, Decimals, Token};
use crate::error::TokenError;
use crate::traits::TokenLedger;

#[derive(Debug, Clone, Default)]
struct ContractToken {
    decimals: Decimals,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<Address, HashMap<Address, Amount>>,
}

/// A [`TokenLedger`] backed by hash maps.
///
/// Token contracts must be registered before use.  The native currency is
/// always available with 18 decimals.  Accounts can be marked as refusing
/// native payments to exercise failure paths.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_swap::domain::{Amount, Decimals, Token};
/// use hydra_swap::ledger::InMemoryLedger;
/// use hydra_swap::traits::TokenLedger;
///
/// let usdc = Address::repeat_byte(0x11);
/// let alice = Address::repeat_byte(0xa1);
/// let bob = Address::repeat_byte(0xb0);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.register_token(usdc, Decimals::new(6).expect("valid")).expect("new token");
/// ledger.mint(Token::Contract(usdc), alice, Amount::new(500)).expect("minted");
/// ledger.transfer(usdc, alice, bob, Amount::new(200)).expect("funded");
///
/// assert_eq!(ledger.balance_of(Token::Contract(usdc), bob), Amount::new(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    contracts: HashMap<Address, ContractToken>,
    native: HashMap<Address, Amount>,
    refuses_native: HashSet<Address>,
}

impl InMemoryLedger {
    /// Creates an empty ledger with no registered contracts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token contract.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::AlreadyRegistered`] if `token` is known.
    pub fn register_token(&mut self, token: Address, decimals: Decimals) -> Result<(), TokenError> {
        if self.contracts.contains_key(&token) {
            return Err(TokenError::AlreadyRegistered(token));
        }
        self.contracts.insert(
            token,
            ContractToken {
                decimals,
                ..ContractToken::default()
            },
        );
        Ok(())
    }

    /// Credits `amount` of `token` to `to` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::UnknownToken`] for an unregistered contract or
    /// [`TokenError::Overflow`] if the balance would exceed 256 bits.
    pub fn mint(&mut self, token: Token, to: Address, amount: Amount) -> Result<(), TokenError> {
        let balance = match token {
            Token::Native => self.native.entry(to).or_default(),
            Token::Contract(address) => self
                .contract_mut(address)?
                .balances
                .entry(to)
                .or_default(),
        };
        *balance = balance.checked_add(&amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Makes `account` refuse incoming native payments.
    pub fn refuse_native(&mut self, account: Address) {
        self.refuses_native.insert(account);
    }

    fn contract(&self, token: Address) -> Result<&ContractToken, TokenError> {
        self.contracts
            .get(&token)
            .ok_or(TokenError::UnknownToken(token))
    }

    fn contract_mut(&mut self, token: Address) -> Result<&mut ContractToken, TokenError> {
        self.contracts
            .get_mut(&token)
            .ok_or(TokenError::UnknownToken(token))
    }
}

fn move_balance(
    balances: &mut HashMap<Address, Amount>,
    token: Token,
    from: Address,
    to: Address,
    amount: Amount,
) -> Result<(), TokenError> {
    let available = balances.get(&from).copied().unwrap_or_default();
    let remaining = available
        .checked_sub(&amount)
        .ok_or(TokenError::InsufficientBalance {
            token,
            account: from,
            needed: amount,
            available,
        })?;
    if from == to {
        return Ok(());
    }
    let credited = balances
        .get(&to)
        .copied()
        .unwrap_or_default()
        .checked_add(&amount)
        .ok_or(TokenError::Overflow)?;
    balances.insert(from, remaining);
    balances.insert(to, credited);
    Ok(())
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: Token, account: Address) -> Amount {
        let balance = match token {
            Token::Native => self.native.get(&account).copied(),
            Token::Contract(address) => self
                .contracts
                .get(&address)
                .and_then(|c| c.balances.get(&account).copied()),
        };
        balance.unwrap_or_default()
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.contracts
            .get(&token)
            .and_then(|c| c.allowances.get(&owner))
            .and_then(|by_spender| by_spender.get(&spender).copied())
            .unwrap_or_default()
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.contract_mut(token)?
            .allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let contract = self.contract_mut(token)?;
        move_balance(
            &mut contract.balances,
            Token::Contract(token),
            from,
            to,
            amount,
        )
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let contract = self.contract_mut(token)?;
        let allowance = contract
            .allowances
            .get(&from)
            .and_then(|by_spender| by_spender.get(&spender).copied())
            .unwrap_or_default();
        let left = allowance
            .checked_sub(&amount)
            .ok_or(TokenError::InsufficientAllowance {
                token,
                owner: from,
                spender,
                needed: amount,
                allowance,
            })?;
        move_balance(
            &mut contract.balances,
            Token::Contract(token),
            from,
            to,
            amount,
        )?;
        contract
            .allowances
            .entry(from)
            .or_default()
            .insert(spender, left);
        Ok(())
    }

    fn send_native(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        if self.refuses_native.contains(&to) {
            return Err(TokenError::NativeTransferFailed(to));
        }
        move_balance(&mut self.native, Token::Native, from, to, amount)
    }

    fn decimals(&self, token: Token) -> Result<Decimals, TokenError> {
        match token {
            Token::Native => Ok(Decimals::MAX),
            Token::Contract(address) => Ok(self.contract(address)?.decimals),
        }
    }
}
