use anyhow::{Result, anyhow};
use rand::Rng;
use std::fmt;

/// Smallest number handed out to a new card
pub const CARD_NUMBER_MIN: u64 = 100_000_000_000;
/// Largest number handed out to a new card
pub const CARD_NUMBER_MAX: u64 = 999_999_999_999;

const CARD_NUMBER_DIGITS: usize = 12;
const MOBILE_NUMBER_DIGITS: usize = 10;

/// A 12-digit card number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    /// Draws a uniformly distributed number in `CARD_NUMBER_MIN..=CARD_NUMBER_MAX`.
    /// Not cryptographically strong, collisions are left to the storage layer.
    pub fn generate() -> Self {
        let value = rand::rng().random_range(CARD_NUMBER_MIN..=CARD_NUMBER_MAX);
        Self(value.to_string())
    }

    pub fn parse(s: &str) -> Result<Self> {
        if !is_all_digits(s, CARD_NUMBER_DIGITS) {
            return Err(anyhow!("Card number must be {} digits", CARD_NUMBER_DIGITS));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of card numbers for newly issued cards
pub trait CardNumberGenerator: Send + Sync {
    fn next_card_number(&self) -> CardNumber;
}

/// Default generator backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCardNumbers;

impl CardNumberGenerator for RandomCardNumbers {
    fn next_card_number(&self) -> CardNumber {
        CardNumber::generate()
    }
}

/// Mobile numbers are either empty or exactly ten digits.
pub fn is_valid_mobile_number(s: &str) -> bool {
    s.is_empty() || is_all_digits(s, MOBILE_NUMBER_DIGITS)
}

pub fn is_valid_card_number(s: &str) -> bool {
    is_all_digits(s, CARD_NUMBER_DIGITS)
}

fn is_all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
