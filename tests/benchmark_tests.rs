//! Performance benchmarks for the hot paths of a Blackjack round

use server::records::RecordsStore;
use server::rules::{determine_winner, result_message};
use server::session::Session;
use server::shoe::Shoe;
use shared::{standard_deck, Card, GamePhase, GameResultType, Hand, Rank, Suit, ServerMessage};
use std::time::Instant;

/// Benchmarks hand valuation with several Aces
#[test]
fn benchmark_hand_value() {
    let hand = Hand::from_cards(vec![
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::Ace, Suit::Hearts),
        Card::new(Rank::Five, Suit::Clubs),
        Card::new(Rank::Ace, Suit::Diamonds),
    ]);

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        assert_eq!(hand.value(), 18);
    }

    let duration = start.elapsed();
    println!(
        "Hand value: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    // Should complete in under 100ms for 100k iterations
    assert!(duration.as_millis() < 100);
}

/// Benchmarks resetting, shuffling and draining a shoe
#[test]
fn benchmark_shoe_cycle() {
    let mut shoe = Shoe::with_seed(42);

    let iterations = 1_000;
    let start = Instant::now();

    for _ in 0..iterations {
        shoe.reset();
        shoe.shuffle();
        while shoe.deal(false).is_ok() {}
    }

    let duration = start.elapsed();
    println!(
        "Shoe cycle: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    assert_eq!(shoe.remaining(), 0);
    assert!(duration.as_millis() < 500);
}

/// Benchmarks complete rounds played with the dealer's policy
#[test]
fn benchmark_full_rounds() {
    let mut session = Session::new("player-1", Shoe::with_seed(7));
    let mut results = [0u32; 4];

    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let mut phase = session.start_round().unwrap();
        while phase == GamePhase::PlayerTurn {
            phase = if session.player_hand().value() < 17 {
                session.hit().unwrap()
            } else {
                session.stand().unwrap()
            };
        }

        let outcome = session.outcome().unwrap();
        let slot = match outcome.result {
            GameResultType::Win => 0,
            GameResultType::Lose => 1,
            GameResultType::Push => 2,
            GameResultType::Blackjack => 3,
        };
        results[slot] += 1;
    }

    let duration = start.elapsed();
    println!(
        "Full rounds: {} iterations in {:?} ({:.2} μs/iter), W/L/P/BJ = {:?}",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64,
        results
    );

    assert_eq!(results.iter().sum::<u32>(), iterations);
    assert!(results.iter().all(|&count| count > 0));
    assert!(duration.as_millis() < 2_000);
}

/// Benchmarks the decision table and result text
#[test]
fn benchmark_determine_winner() {
    let deck = standard_deck();
    let hands: Vec<Hand> = deck
        .chunks(2)
        .map(|pair| Hand::from_cards(pair.to_vec()))
        .collect();

    let iterations = 100;
    let start = Instant::now();
    let mut decided = 0usize;

    for _ in 0..iterations {
        for player in &hands {
            for dealer in &hands {
                let result = determine_winner(player, dealer);
                let text = result_message(result, player.value(), dealer.value());
                decided += text.len().min(1);
            }
        }
    }

    let duration = start.elapsed();
    println!(
        "Determine winner: {} decisions in {:?}",
        decided, duration
    );

    assert_eq!(decided, iterations * hands.len() * hands.len());
    assert!(duration.as_millis() < 1_000);
}

/// Benchmarks game state encoding for the wire
#[test]
fn benchmark_game_state_encoding() {
    let mut session = Session::new("player-1", Shoe::with_seed(3));
    session.start_round().unwrap();
    let view = session.view();

    let iterations = 10_000;
    let start = Instant::now();

    for _ in 0..iterations {
        let line = serde_json::to_string(&view).unwrap();
        let decoded: ServerMessage = serde_json::from_str(&line).unwrap();
        assert_eq!(decoded, view);
    }

    let duration = start.elapsed();
    println!(
        "Game state encoding: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 1_000);
}

/// Benchmarks concurrent leaderboard reads against a stream of writes
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn benchmark_records_contention() {
    let path = std::env::temp_dir().join(format!(
        "blackjack-bench-records-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let store = std::sync::Arc::new(RecordsStore::load(&path, 100).await);

    let start = Instant::now();
    let mut tasks = Vec::new();
    for i in 0..20 {
        let store = std::sync::Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let name = format!("Bench{}", i % 5);
            for _ in 0..10 {
                store.record_result(&name, GameResultType::Win).await;
                assert!(store.top_records(10).await.len() <= 5);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let duration = start.elapsed();
    println!("Records contention: 200 writes in {:?}", duration);

    let total: u32 = store.top_records(10).await.iter().map(|r| r.wins).sum();
    assert_eq!(total, 200);
    assert!(duration.as_secs() < 10);

    let _ = std::fs::remove_file(&path);
}
