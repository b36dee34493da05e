use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::card_number::{is_valid_card_number, is_valid_mobile_number};

/// Stored card row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Card {
    pub card_id: i64,
    pub mobile_number: String,
    pub card_number: String,
    pub card_type: String,
    pub total_limit: i64,
    pub amount_used: i64,
    pub available_amount: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Card {
    /// Replaces the business fields with the ones from `view`.
    /// `card_id`, `mobile_number` and `card_number` are left alone.
    pub fn apply_update(&mut self, view: &CardView) {
        self.card_type = view.card_type.clone();
        self.total_limit = view.total_limit;
        self.amount_used = view.amount_used;
        self.available_amount = view.available_amount;
    }
}

/// A card that has not been stored yet, `card_id` is assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub mobile_number: String,
    pub card_number: String,
    pub card_type: String,
    pub total_limit: i64,
    pub amount_used: i64,
    pub available_amount: i64,
}

/// Caller-facing projection of a card, also the input of an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    #[serde(default)]
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,

    #[validate(custom(function = "validate_card_number"))]
    pub card_number: String,

    #[validate(length(min = 1, message = "CardType can not be a null or empty"))]
    pub card_type: String,

    #[validate(range(min = 1, message = "Total card limit should be greater than zero"))]
    pub total_limit: i64,

    #[validate(range(min = 0, message = "Total amount used should be equal or greater than zero"))]
    pub amount_used: i64,

    #[validate(range(min = 0, message = "Total available amount should be equal or greater than zero"))]
    pub available_amount: i64,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        Self {
            mobile_number: card.mobile_number,
            card_number: card.card_number,
            card_type: card.card_type,
            total_limit: card.total_limit,
            amount_used: card.amount_used,
            available_amount: card.available_amount,
        }
    }
}

pub fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_mobile_number(value) {
        Ok(())
    } else {
        Err(ValidationError::new("mobile_number").with_message("Mobile number must be 10 digits".into()))
    }
}

pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_card_number(value) {
        Ok(())
    } else {
        Err(ValidationError::new("card_number").with_message("CardNumber must be 12 digits".into()))
    }
}
