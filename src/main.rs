//! ZK Battleship Demo
//!
//! Runs one scripted match end to end through the turn protocol, then a
//! short cancellation/forfeit demonstration. Proof bytes are accepted by
//! the stub verifier; everything else is the real protocol.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use zk_battleship::{
    Commitment, Coordinate, GamePhase, LeaveOutcome, PlayerId, StubVerifier, TurnProtocol,
    TOTAL_SHIP_CELLS, VERSION,
};

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("ZK Battleship Protocol v{}", VERSION);
    info!("Fleet size: {} cells", TOTAL_SHIP_CELLS);

    demo_match();
    demo_forfeit();
}

/// Alice's shot sequence: the 17 cells of Bob's fleet, laid out as five
/// horizontal ships on rows 0-4 starting at column 1.
fn winning_shots() -> Vec<Coordinate> {
    let mut shots = Vec::new();
    for (y, len) in [5u8, 4, 3, 3, 2].into_iter().enumerate() {
        for dx in 0..len {
            shots.push(Coordinate::new(1 + dx, y as u8));
        }
    }
    shots
}

/// Bob's shot sequence: sixteen misses into empty water.
fn missing_shots() -> Vec<Coordinate> {
    (0u8..16).map(|i| Coordinate::new(9 - i / 10, i % 10)).collect()
}

/// Scripted full match: Alice sinks Bob's fleet in 17 straight hits.
fn demo_match() {
    info!("=== Scripted Match ===");

    let mut protocol = TurnProtocol::new(StubVerifier);
    let proof = b"stub proof".as_slice();

    let alice = PlayerId::random();
    let bob = PlayerId::random();
    let alice_board = Commitment::new([0xa1; 32]);
    let bob_board = Commitment::new([0xb0; 32]);

    let game_id = protocol
        .new_game(alice, alice_board, proof)
        .expect("demo game creation");
    protocol
        .join_game(bob, game_id, bob_board, proof)
        .expect("demo game join");

    let alice_shots = winning_shots();
    let bob_shots = missing_shots();

    protocol
        .first_turn(alice, game_id, alice_shots[0])
        .expect("demo opening shot");

    let mut winner = None;
    for round in 0.. {
        // Bob truthfully confirms the hit and returns fire.
        let outcome = protocol
            .turn(bob, game_id, true, bob_shots[round % bob_shots.len()], proof)
            .expect("demo hit resolution");
        if let Some(id) = outcome.winner {
            winner = Some(id);
            break;
        }

        // Alice confirms Bob's miss and fires at the next fleet cell.
        protocol
            .turn(alice, game_id, false, alice_shots[round + 1], proof)
            .expect("demo miss resolution");
    }

    info!("Winner: {}", winner.expect("scripted match always finishes"));

    let game = protocol.game(game_id).expect("demo game exists");
    assert_eq!(game.phase, GamePhase::Finished);
    let record = serde_json::to_string_pretty(game).expect("game record serializes");
    info!("Final game record:\n{}", record);
}

/// Cancellation before an opponent joins, then a forfeit mid-game.
fn demo_forfeit() {
    info!("=== Leave Semantics ===");

    let mut protocol = TurnProtocol::new(StubVerifier);
    let proof = b"stub proof".as_slice();

    let carol = PlayerId::random();
    let dave = PlayerId::random();

    // Nobody joined yet, so leaving voids the game.
    let lonely = protocol
        .new_game(carol, Commitment::new([0xc0; 32]), proof)
        .expect("demo game creation");
    let outcome = protocol.leave_game(carol, lonely).expect("demo cancel");
    assert_eq!(outcome, LeaveOutcome::Cancelled);
    info!("Unjoined game cancelled");

    // Mid-game, leaving forfeits.
    let game_id = protocol
        .new_game(carol, Commitment::new([0xc0; 32]), proof)
        .expect("demo game creation");
    protocol
        .join_game(dave, game_id, Commitment::new([0xd0; 32]), proof)
        .expect("demo game join");
    protocol
        .first_turn(carol, game_id, Coordinate::new(0, 0))
        .expect("demo opening shot");

    match protocol.leave_game(carol, game_id).expect("demo forfeit") {
        LeaveOutcome::Forfeited { winner } => info!("Forfeit awarded to {}", winner),
        LeaveOutcome::Cancelled => unreachable!("active games forfeit"),
    }
}
