use crate::card::{Card, Rank};
use crate::BLACKJACK;
use std::fmt;

/// An ordered collection of cards held by the dealer or a player
///
/// The hand keeps insertion order. Its value only counts face-up cards,
/// so a dealer hand with a hole card reports the value of its up-cards
/// until [`Hand::reveal_all`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_hidden(&self) -> bool {
        self.cards.iter().any(|card| card.hidden)
    }

    /// Best value of the face-up cards
    ///
    /// Every Ace starts at 1, then Aces are promoted to 11 one at a time
    /// while the total stays at or below 21.
    pub fn value(&self) -> u32 {
        let mut total = 0;
        let mut aces = 0;

        for card in self.cards.iter().filter(|card| !card.hidden) {
            if card.rank == Rank::Ace {
                aces += 1;
            }
            total += card.rank.points();
        }

        while aces > 0 && total + 10 <= BLACKJACK {
            total += 10;
            aces -= 1;
        }

        total
    }

    /// Natural 21: exactly two face-up cards, an Ace and a ten-valued card
    pub fn is_blackjack(&self) -> bool {
        if self.cards.len() != 2 || self.has_hidden() {
            return false;
        }

        let has_ace = self.cards.iter().any(|card| card.rank == Rank::Ace);
        let has_ten = self.cards.iter().any(|card| card.rank.is_ten_valued());
        has_ace && has_ten
    }

    pub fn is_busted(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Turns every card face up. Calling it twice changes nothing.
    pub fn reveal_all(&mut self) {
        for card in self.cards.iter_mut() {
            *card = card.face_up();
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|card| card.to_string()).collect();
        if self.has_hidden() {
            write!(f, "[{}] (?)", cards.join(", "))
        } else {
            write!(f, "[{}] ({})", cards.join(", "), self.value())
        }
    }
}
