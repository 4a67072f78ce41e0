//! Per-connection round state machine
//!
//! A session owns one shoe, the dealer hand and the player hands, and
//! walks a round through `WAITING -> PLAYER_TURN -> DEALER_TURN -> GAME_OVER`.
//! `DEALER_TURN` never outlives the call that entered it.

use crate::error::SessionError;
use crate::rules;
use crate::shoe::Shoe;
use log::{info, warn};
use shared::{Card, GamePhase, GameResultType, Hand, ServerMessage, BLACKJACK};
use std::collections::HashMap;

/// Final result of a round, ready to be sent and recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub result: GameResultType,
    pub player_score: u32,
    pub dealer_score: u32,
    pub text: String,
    pub dealer_hand: Vec<Card>,
}

impl RoundOutcome {
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::GameResult {
            result: self.result,
            player_score: self.player_score,
            dealer_score: self.dealer_score,
            text: self.text.clone(),
            dealer_full_hand: self.dealer_hand.clone(),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    player_id: String,
    shoe: Shoe,
    dealer: Hand,
    players: HashMap<String, Hand>,
    phase: GamePhase,
    rounds_started: u32,
}

impl Session {
    /// Creates a session and shuffles its shoe
    pub fn new(player_id: impl Into<String>, mut shoe: Shoe) -> Self {
        shoe.shuffle();
        Self::with_shoe(player_id, shoe)
    }

    /// Creates a session that deals the shoe in its current order
    pub fn with_shoe(player_id: impl Into<String>, shoe: Shoe) -> Self {
        let player_id = player_id.into();
        let mut players = HashMap::new();
        players.insert(player_id.clone(), Hand::new());

        Self {
            player_id,
            shoe,
            dealer: Hand::new(),
            players,
            phase: GamePhase::Waiting,
            rounds_started: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.rounds_started > 0
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_hand(&self) -> &Hand {
        // The entry is inserted at construction and never removed
        &self.players[&self.player_id]
    }

    fn player_hand_mut(&mut self) -> &mut Hand {
        self.players.entry(self.player_id.clone()).or_default()
    }

    /// Deals a fresh round: player, dealer, player, dealer (face down)
    ///
    /// A natural on the deal ends the round at once with the hole card
    /// revealed and no dealer draws.
    pub fn start_round(&mut self) -> Result<GamePhase, SessionError> {
        if matches!(self.phase, GamePhase::PlayerTurn | GamePhase::DealerTurn) {
            return Err(SessionError::RoundInProgress);
        }

        if self.shoe.needs_reset() {
            info!("Shoe low on cards ({} left), reshuffling", self.shoe.remaining());
            self.shoe.reset();
            self.shoe.shuffle();
        }

        self.dealer.clear();
        self.player_hand_mut().clear();
        self.rounds_started += 1;

        let card = self.draw(false)?;
        self.player_hand_mut().add(card);
        let card = self.draw(false)?;
        self.dealer.add(card);
        let card = self.draw(false)?;
        self.player_hand_mut().add(card);
        let card = self.draw(true)?;
        self.dealer.add(card);

        info!(
            "Round {} for {}: player {} dealer {}",
            self.rounds_started,
            self.player_id,
            self.player_hand(),
            self.dealer
        );

        if self.player_hand().is_blackjack() {
            info!("Natural blackjack for {}", self.player_id);
            self.dealer.reveal_all();
            self.phase = GamePhase::GameOver;
        } else {
            self.phase = GamePhase::PlayerTurn;
        }

        Ok(self.phase)
    }

    pub fn hit(&mut self) -> Result<GamePhase, SessionError> {
        self.require_player_turn()?;

        let card = self.draw(false)?;
        self.player_hand_mut().add(card);

        let value = self.player_hand().value();
        info!("{} hits {} (total {})", self.player_id, card, value);

        if self.player_hand().is_busted() {
            info!("{} busts with {}", self.player_id, value);
            self.dealer.reveal_all();
            self.phase = GamePhase::GameOver;
        } else if value == BLACKJACK {
            self.play_dealer_turn()?;
        }

        Ok(self.phase)
    }

    pub fn stand(&mut self) -> Result<GamePhase, SessionError> {
        self.require_player_turn()?;
        info!("{} stands on {}", self.player_id, self.player_hand().value());
        self.play_dealer_turn()?;
        Ok(self.phase)
    }

    fn require_player_turn(&self) -> Result<(), SessionError> {
        if !self.has_started() {
            return Err(SessionError::RoundNotStarted);
        }
        if self.phase != GamePhase::PlayerTurn {
            return Err(SessionError::NotPlayerTurn(self.phase));
        }
        Ok(())
    }

    fn play_dealer_turn(&mut self) -> Result<(), SessionError> {
        self.phase = GamePhase::DealerTurn;
        self.dealer.reveal_all();
        info!("Dealer reveals {}", self.dealer);

        while rules::dealer_should_hit(&self.dealer) {
            let card = self.draw(false)?;
            self.dealer.add(card);
        }

        if self.dealer.is_busted() {
            info!("Dealer busts with {}", self.dealer.value());
        } else {
            info!("Dealer stands on {}", self.dealer.value());
        }

        self.phase = GamePhase::GameOver;
        Ok(())
    }

    /// Deals one card, aborting the round when the shoe is empty
    fn draw(&mut self, hidden: bool) -> Result<Card, SessionError> {
        match self.shoe.deal(hidden) {
            Ok(card) => Ok(card),
            Err(e) => {
                warn!("Aborting round for {}: {}", self.player_id, e);
                self.dealer.clear();
                self.player_hand_mut().clear();
                self.phase = GamePhase::Waiting;
                Err(e.into())
            }
        }
    }

    /// Snapshot for the client. The dealer score is the up-card only until the round is over.
    pub fn view(&self) -> ServerMessage {
        let player = self.player_hand();
        let dealer_score = if self.phase == GamePhase::GameOver {
            self.dealer.value()
        } else {
            self.dealer
                .cards()
                .iter()
                .find(|card| !card.hidden)
                .map(|card| card.rank.points())
                .unwrap_or(0)
        };

        ServerMessage::GameState {
            player_hand: player.cards().to_vec(),
            dealer_hand: self.dealer.cards().to_vec(),
            player_score: player.value(),
            dealer_score,
            phase: self.phase,
            can_hit: rules::player_can_hit(self.phase, player),
            can_stand: rules::player_can_stand(self.phase, player),
        }
    }

    /// The round's result once it is over
    pub fn outcome(&self) -> Option<RoundOutcome> {
        if self.phase != GamePhase::GameOver {
            return None;
        }

        let player = self.player_hand();
        let result = rules::determine_winner(player, &self.dealer);
        let player_score = player.value();
        let dealer_score = self.dealer.value();

        Some(RoundOutcome {
            result,
            player_score,
            dealer_score,
            text: rules::result_message(result, player_score, dealer_score),
            dealer_hand: self.dealer.cards().to_vec(),
        })
    }
}
