use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::{
    card_number::{CardNumberGenerator, RandomCardNumbers},
    db::models::{Card, CardView, NewCard},
    error::{CardError, UniqueViolation},
};

#[cfg(test)]
pub mod memory;

pub const DEFAULT_CARD_TYPE: &str = "Place Holder";
pub const DEFAULT_TOTAL_LIMIT: i64 = 1_000_000;
pub const DEFAULT_AMOUNT_USED: i64 = 0;
// Kept as issued, not derived from the limit
pub const DEFAULT_AVAILABLE_AMOUNT: i64 = 2_000_000;

/// Storage of card records
///
/// Implementations must enforce uniqueness of `mobile_number` and
/// `card_number` and report a rejected insert as [`UniqueViolation`].
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>>;
    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>>;
    async fn insert(&self, card: &NewCard) -> Result<Card>;
    /// Returns `None` when no row with `card.card_id` exists anymore
    async fn update(&self, card: &Card) -> Result<Option<Card>>;
    async fn delete_by_id(&self, card_id: i64) -> Result<()>;
}

/// Card lifecycle operations exposed to the transport layer
#[async_trait]
pub trait CardManager: Send + Sync {
    async fn create_card(&self, mobile_number: &str) -> Result<(), CardError>;
    async fn fetch_card(&self, mobile_number: &str) -> Result<CardView, CardError>;
    async fn update_card(&self, view: &CardView) -> Result<bool, CardError>;
    async fn delete_card(&self, mobile_number: &str) -> Result<bool, CardError>;
}

/// Card service backed by a repository
pub struct CardService<R: CardRepository, G: CardNumberGenerator = RandomCardNumbers> {
    repo: R,
    numbers: G,
}

impl<R: CardRepository> CardService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_generator(repo, RandomCardNumbers)
    }
}

impl<R: CardRepository, G: CardNumberGenerator> CardService<R, G> {
    pub fn with_generator(repo: R, numbers: G) -> Self {
        Self { repo, numbers }
    }

    fn new_card(&self, mobile_number: &str) -> NewCard {
        NewCard {
            mobile_number: mobile_number.to_string(),
            card_number: self.numbers.next_card_number().into_string(),
            card_type: DEFAULT_CARD_TYPE.to_string(),
            total_limit: DEFAULT_TOTAL_LIMIT,
            amount_used: DEFAULT_AMOUNT_USED,
            available_amount: DEFAULT_AVAILABLE_AMOUNT,
        }
    }
}

#[async_trait]
impl<R: CardRepository, G: CardNumberGenerator> CardManager for CardService<R, G> {
    #[instrument(skip(self))]
    async fn create_card(&self, mobile_number: &str) -> Result<(), CardError> {
        if self.repo.find_by_mobile_number(mobile_number).await?.is_some() {
            warn!("Card already exists");
            return Err(CardError::AlreadyExists(mobile_number.to_string()));
        }

        let card = match self.repo.insert(&self.new_card(mobile_number)).await {
            Ok(card) => card,
            // Lost a race with a concurrent create for the same number
            Err(e) if is_unique_violation_on(&e, "mobile_number") => {
                warn!("Concurrent create rejected by storage");
                return Err(CardError::AlreadyExists(mobile_number.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!(card_id = card.card_id, "Card created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_card(&self, mobile_number: &str) -> Result<CardView, CardError> {
        let card = self
            .repo
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| CardError::card_not_found("mobileNumber", mobile_number))?;

        Ok(card.into())
    }

    #[instrument(skip(self, view), fields(card_number = %view.card_number))]
    async fn update_card(&self, view: &CardView) -> Result<bool, CardError> {
        let mut card = self
            .repo
            .find_by_card_number(&view.card_number)
            .await?
            .ok_or_else(|| CardError::card_not_found("CardNumber", view.card_number.as_str()))?;

        card.apply_update(view);

        let updated = self
            .repo
            .update(&card)
            .await?
            .ok_or_else(|| CardError::card_not_found("CardNumber", view.card_number.as_str()))?;

        info!(card_id = updated.card_id, "Card updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete_card(&self, mobile_number: &str) -> Result<bool, CardError> {
        let card = self
            .repo
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| CardError::card_not_found("mobileNumber", mobile_number))?;

        self.repo.delete_by_id(card.card_id).await?;

        info!(card_id = card.card_id, "Card deleted");
        Ok(true)
    }
}

fn is_unique_violation_on(err: &anyhow::Error, column: &str) -> bool {
    err.downcast_ref::<UniqueViolation>()
        .is_some_and(|v| v.column == column)
}
