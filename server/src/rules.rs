//! Blackjack rules as pure functions over hands
//!
//! The dealer hits below 17 and stands on every 17, soft or hard.
//! Simultaneous naturals push; a dealer natural beats any other player 21.

use shared::{GamePhase, GameResultType, Hand, BLACKJACK, DEALER_STAND_THRESHOLD};

pub fn dealer_should_hit(dealer: &Hand) -> bool {
    dealer.value() < DEALER_STAND_THRESHOLD
}

fn player_can_act(phase: GamePhase, player: &Hand) -> bool {
    phase == GamePhase::PlayerTurn && !player.is_busted() && player.value() < BLACKJACK
}

pub fn player_can_hit(phase: GamePhase, player: &Hand) -> bool {
    player_can_act(phase, player)
}

pub fn player_can_stand(phase: GamePhase, player: &Hand) -> bool {
    player_can_act(phase, player)
}

/// Outcome of a finished round from the player's side
pub fn determine_winner(player: &Hand, dealer: &Hand) -> GameResultType {
    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => return GameResultType::Push,
        (true, false) => return GameResultType::Blackjack,
        _ => {}
    }

    if player.is_busted() {
        return GameResultType::Lose;
    }
    if dealer.is_blackjack() {
        return GameResultType::Lose;
    }
    if dealer.is_busted() {
        return GameResultType::Win;
    }

    let (player_value, dealer_value) = (player.value(), dealer.value());
    if player_value > dealer_value {
        GameResultType::Win
    } else if player_value < dealer_value {
        GameResultType::Lose
    } else {
        GameResultType::Push
    }
}

/// Display text for a result. Not authoritative.
pub fn result_message(result: GameResultType, player_score: u32, dealer_score: u32) -> String {
    match result {
        GameResultType::Blackjack => format!("Blackjack! You win with {}", player_score),
        GameResultType::Win if dealer_score > BLACKJACK => {
            format!("You win! Dealer busts with {}", dealer_score)
        }
        GameResultType::Win => format!("You win! {} against {}", player_score, dealer_score),
        GameResultType::Lose if player_score > BLACKJACK => {
            format!("You bust with {}. Dealer wins", player_score)
        }
        GameResultType::Lose => format!("Dealer wins. {} against {}", dealer_score, player_score),
        GameResultType::Push => format!("Push. Both have {}", player_score),
    }
}
