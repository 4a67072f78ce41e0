use clap::Parser;
use serde::Serialize;
use shared::{ClientMessage, GameMode, GamePhase, Hand, ServerMessage, DEALER_STAND_THRESHOLD};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Plays rounds against a running Blackjack server using the dealer's own policy
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:9999")]
    server: String,
    /// Player name sent with JoinGame
    #[arg(short, long, default_value = "TestBot")]
    name: String,
    /// Rounds to play before asking for the leaderboard
    #[arg(short, long, default_value_t = 3)]
    rounds: u32,
}

async fn send<T: Serialize>(writer: &mut OwnedWriteHalf, message: &T) -> std::io::Result<()> {
    let mut line = serde_json::to_string(message)?;
    println!(">> {}", line);
    line.push('\n');
    writer.write_all(line.as_bytes()).await
}

async fn receive(
    lines: &mut Lines<BufReader<OwnedReadHalf>>,
) -> Result<ServerMessage, Box<dyn std::error::Error>> {
    let line = lines
        .next_line()
        .await?
        .ok_or("Server closed the connection")?;
    Ok(serde_json::from_str(&line)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let stream = TcpStream::connect(&args.server).await?;
    println!("Connected to {}", args.server);
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    send(
        &mut writer,
        &ClientMessage::JoinGame {
            name: args.name.clone(),
            mode: GameMode::Pve,
        },
    )
    .await?;

    let mut rounds_played = 0;
    while rounds_played < args.rounds {
        match receive(&mut lines).await? {
            ServerMessage::JoinConfirmation { id, text } => {
                println!("Joined as {}: {}", id, text);
            }
            ServerMessage::GameState {
                player_hand,
                dealer_hand,
                player_score,
                dealer_score,
                phase,
                can_hit,
                ..
            } => {
                println!(
                    "You: {} | Dealer: {} ({}) | {:?}",
                    Hand::from_cards(player_hand),
                    Hand::from_cards(dealer_hand),
                    dealer_score,
                    phase
                );

                if phase == GamePhase::PlayerTurn {
                    // Same policy the dealer plays
                    let next = if can_hit && player_score < DEALER_STAND_THRESHOLD {
                        ClientMessage::RequestCard
                    } else {
                        ClientMessage::Stand
                    };
                    send(&mut writer, &next).await?;
                }
            }
            ServerMessage::GameResult {
                result,
                player_score,
                dealer_score,
                text,
                ..
            } => {
                println!("Result: {:?} ({} vs {}): {}", result, player_score, dealer_score, text);
                rounds_played += 1;
                if rounds_played < args.rounds {
                    send(&mut writer, &ClientMessage::NewGame).await?;
                }
            }
            ServerMessage::Error { text } => {
                println!("Server error: {}", text);
                break;
            }
            other => println!("Unexpected message: {:?}", other),
        }
    }

    send(&mut writer, &ClientMessage::RequestRecords).await?;
    if let ServerMessage::RecordsList { records } = receive(&mut lines).await? {
        println!("Leaderboard:");
        for (rank, record) in records.iter().enumerate() {
            println!(
                "  {}. {} {}W-{}L ({} blackjacks)",
                rank + 1,
                record.name,
                record.wins,
                record.losses,
                record.blackjacks
            );
        }
    }

    writer.shutdown().await?;
    println!("Test client finished");
    Ok(())
}
