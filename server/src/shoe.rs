//! The working deck of a session

use crate::error::ShoeError;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shared::{standard_deck, Card, DECK_RESET_THRESHOLD};
use std::collections::VecDeque;
use std::fmt;

/// Ordered cards dealt from the front
///
/// Holds at most the 52 distinct cards of one deck. Its count only goes
/// down as cards are dealt until [`Shoe::reset`] refills it.
#[derive(Debug)]
pub struct Shoe {
    cards: VecDeque<Card>,
    rng: StdRng,
    reset_threshold: usize,
}

impl Shoe {
    /// Full, unshuffled deck seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Full, unshuffled deck whose shuffles are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            cards: standard_deck().into(),
            rng,
            reset_threshold: DECK_RESET_THRESHOLD,
        }
    }

    /// Shoe that deals `cards` in the given order
    ///
    /// A reset refills it with a regular deck.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            cards: cards.into(),
            rng: StdRng::seed_from_u64(seed),
            reset_threshold: DECK_RESET_THRESHOLD,
        }
    }

    pub fn with_reset_threshold(mut self, threshold: usize) -> Self {
        self.reset_threshold = threshold;
        self
    }

    pub fn shuffle(&mut self) {
        self.cards.make_contiguous().shuffle(&mut self.rng);
    }

    /// Refills the shoe with all 52 cards in deck order
    pub fn reset(&mut self) {
        self.cards = standard_deck().into();
    }

    /// Removes the front card and returns it with the requested visibility
    pub fn deal(&mut self, hidden: bool) -> Result<Card, ShoeError> {
        let card = self.cards.pop_front().ok_or(ShoeError::Empty)?;
        let card = card.with_hidden(hidden);
        debug!("Dealt {} ({} left)", card, self.cards.len());
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn needs_reset(&self) -> bool {
        self.cards.len() < self.reset_threshold
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Shoe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shoe({} cards left)", self.cards.len())
    }
}
