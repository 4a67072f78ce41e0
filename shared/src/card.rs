use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suits in deck order
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

/// Card ranks, Ace low
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Blackjack point value with the Ace counted as 1.
    ///
    /// Hands promote Aces to 11 on their own, see [`crate::Hand::value`].
    pub fn points(&self) -> u32 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn is_ten_valued(&self) -> bool {
        self.points() == 10
    }
}

/// A playing card as it travels on the wire
///
/// Cards are plain values. Turning a card over produces a new card
/// through [`Card::face_down`] / [`Card::face_up`] instead of mutating it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    /// Face-down flag. Hidden cards count for nothing in a hand's visible value.
    #[serde(default)]
    pub hidden: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            hidden: false,
        }
    }

    pub fn with_hidden(self, hidden: bool) -> Self {
        Self { hidden, ..self }
    }

    pub fn face_down(self) -> Self {
        self.with_hidden(true)
    }

    pub fn face_up(self) -> Self {
        self.with_hidden(false)
    }

    /// Two cards are the same card when rank and suit match, whatever their visibility
    pub fn same_card(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hidden {
            write!(f, "[HIDDEN]")
        } else {
            write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
        }
    }
}

/// Builds the 52 distinct cards, suit by suit, unshuffled
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(crate::DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rank_points() {
        assert_eq!(Rank::Ace.points(), 1);
        assert_eq!(Rank::Seven.points(), 7);
        assert_eq!(Rank::Ten.points(), 10);
        assert_eq!(Rank::Jack.points(), 10);
        assert_eq!(Rank::Queen.points(), 10);
        assert_eq!(Rank::King.points(), 10);
        assert!(Rank::King.is_ten_valued());
        assert!(!Rank::Ace.is_ten_valued());
    }

    #[test]
    fn test_standard_deck_is_complete() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 52);

        let unique: HashSet<(Rank, Suit)> = deck.iter().map(|c| (c.rank, c.suit)).collect();
        assert_eq!(unique.len(), 52);
        assert!(deck.iter().all(|c| !c.hidden));
    }

    #[test]
    fn test_flip_produces_new_value() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        let hidden = card.face_down();

        assert!(!card.hidden);
        assert!(hidden.hidden);
        assert_ne!(card, hidden);
        assert!(card.same_card(&hidden));
        assert_eq!(hidden.face_up(), card);
    }

    #[test]
    fn test_card_display() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "A♠");
        assert_eq!(card.face_down().to_string(), "[HIDDEN]");
        assert_eq!(Card::new(Rank::Ten, Suit::Diamonds).to_string(), "10♦");
        assert_eq!(Suit::Clubs.display_name(), "Clubs");
    }

    #[test]
    fn test_card_json_shape() {
        let card = Card::new(Rank::King, Suit::Clubs).face_down();
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"rank":"KING","suit":"CLUBS","hidden":true}"#);

        let parsed: Card = serde_json::from_str(r#"{"rank":"ACE","suit":"HEARTS"}"#).unwrap();
        assert_eq!(parsed, Card::new(Rank::Ace, Suit::Hearts));
    }
}
