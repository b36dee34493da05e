use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicI64, Ordering},
    },
};

use crate::{
    db::models::{Card, NewCard},
    error::UniqueViolation,
    service::CardRepository,
};

/// HashMap backed repository with the same uniqueness rules as the database
#[derive(Default)]
pub struct InMemoryCardRepository {
    cards: Mutex<HashMap<i64, Card>>,
    next_id: AtomicI64,
    hide_lookups: bool,
    failing: bool,
}

impl InMemoryCardRepository {
    /// Lookups by mobile number never see stored cards, inserts still check
    pub fn hide_lookups(mut self) -> Self {
        self.hide_lookups = true;
        self
    }

    /// Every call fails as if the storage were down
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn len(&self) -> usize {
        self.cards.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(anyhow!("storage unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Card>> {
        self.check()?;
        if self.hide_lookups {
            return Ok(None);
        }
        let cards = self.cards.lock().unwrap();
        Ok(cards.values().find(|c| c.mobile_number == mobile_number).cloned())
    }

    async fn find_by_card_number(&self, card_number: &str) -> Result<Option<Card>> {
        self.check()?;
        let cards = self.cards.lock().unwrap();
        Ok(cards.values().find(|c| c.card_number == card_number).cloned())
    }

    async fn insert(&self, card: &NewCard) -> Result<Card> {
        self.check()?;
        let mut cards = self.cards.lock().unwrap();

        for existing in cards.values() {
            if existing.mobile_number == card.mobile_number {
                return Err(UniqueViolation { column: "mobile_number".into() }.into());
            }
            if existing.card_number == card.card_number {
                return Err(UniqueViolation { column: "card_number".into() }.into());
            }
        }

        let card_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Card {
            card_id,
            mobile_number: card.mobile_number.clone(),
            card_number: card.card_number.clone(),
            card_type: card.card_type.clone(),
            total_limit: card.total_limit,
            amount_used: card.amount_used,
            available_amount: card.available_amount,
            created_at: None,
            updated_at: None,
        };
        cards.insert(card_id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, card: &Card) -> Result<Option<Card>> {
        self.check()?;
        let mut cards = self.cards.lock().unwrap();
        let Some(stored) = cards.get_mut(&card.card_id) else {
            return Ok(None);
        };

        stored.card_type = card.card_type.clone();
        stored.total_limit = card.total_limit;
        stored.amount_used = card.amount_used;
        stored.available_amount = card.available_amount;

        Ok(Some(stored.clone()))
    }

    async fn delete_by_id(&self, card_id: i64) -> Result<()> {
        self.check()?;
        self.cards.lock().unwrap().remove(&card_id);
        Ok(())
    }
}
