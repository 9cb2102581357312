use game_core::{Action, ObjectKind, WorldState};
use runtime::{
    FnProvider, IdleProvider, Phase, RandomShooter, ReadError, Runtime, RuntimeError,
    TerminationReason,
};
use serde_json::{Value, json};

const HANDSHAKE: &str = r#"{"message":{"your-tank-id":"A","enemy-tank-id":"B"}}"#;
const BOUNDARY_BATCH: &str = r#"{"message":{"updated_objects":{"obj1":{"type":5,"position":[[0,0],[10,0],[10,10],[0,10]]}}}}"#;

fn stream(lines: &[&str]) -> Vec<u8> {
    let mut bytes = lines.join("\n").into_bytes();
    bytes.push(b'\n');
    bytes
}

fn output_lines(output: &[u8]) -> Vec<Value> {
    std::str::from_utf8(output)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is JSON"))
        .collect()
}

/// End-to-End Game Scenario Test
///
/// 1. Handshake assigns tank ids
/// 2. One init batch with a 10x10 boundary, then END_INIT
/// 3. Turn 1 deletes the boundary and spawns a bullet
/// 4. Turn 2 moves our tank
/// 5. END closes the game with no output for that turn
#[tokio::test]
async fn test_complete_game_scenario() {
    let input = stream(&[
        HANDSHAKE,
        BOUNDARY_BATCH,
        r#""END_INIT""#,
        r#"{"message":{"deleted_objects":["obj1"],"updated_objects":{"obj2":{"type":2,"position":[5,5]}}}}"#,
        r#"{"message":{"updated_objects":{"A":{"type":1,"position":[3,4]}}}}"#,
        r#""END""#,
    ]);
    let mut output = Vec::new();

    let mut runtime = Runtime::builder()
        .provider(FnProvider(|state: &WorldState| {
            Action::shoot(state.len() as u16)
        }))
        .build();

    let report = runtime
        .run(input.as_slice(), &mut output)
        .await
        .expect("game should end gracefully");

    // Initialization
    assert_eq!(report.init.batches, 1);
    assert_eq!(report.init.bounds.width, 10.0);
    assert_eq!(report.init.bounds.height, 10.0);

    // Turns
    assert_eq!(report.turns, 2);
    assert_eq!(report.reason, TerminationReason::Sentinel);

    let world = &report.world;
    assert_eq!(world.own_tank_id(), "A");
    assert_eq!(world.enemy_tank_id(), "B");
    assert!(!world.contains("obj1"));
    assert!(world.object("obj2").unwrap().is(ObjectKind::Bullet));
    assert_eq!(world.own_tank().unwrap().position(), Some(&json!([3, 4])));

    // One action per continuing turn, none for END. The provider saw the
    // table after each merge: 1 object after turn 1, 2 after turn 2.
    assert_eq!(
        output_lines(&output),
        vec![json!({"shoot": 1}), json!({"shoot": 2})]
    );
}

#[tokio::test]
async fn end_right_after_init_writes_nothing() {
    let input = stream(&[HANDSHAKE, BOUNDARY_BATCH, r#""END_INIT""#, r#""END""#]);
    let mut output = Vec::new();

    let report = Runtime::builder()
        .provider(RandomShooter::with_seed(1))
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(report.turns, 0);
    assert_eq!(report.reason, TerminationReason::Sentinel);
    assert!(output.is_empty());
}

#[tokio::test]
async fn stream_closing_during_turns_is_graceful() {
    let input = stream(&[
        HANDSHAKE,
        r#""END_INIT""#,
        r#"{"message":{"updated_objects":{"t":{"type":1}}}}"#,
    ]);
    let mut output = Vec::new();

    let report = Runtime::builder()
        .provider(IdleProvider)
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(report.turns, 1);
    assert_eq!(report.reason, TerminationReason::StreamClosed);
    assert_eq!(output_lines(&output), vec![json!({})]);
}

#[tokio::test]
async fn unparsable_turn_ends_game_without_error() {
    let input = stream(&[HANDSHAKE, r#""END_INIT""#, "{\"message\": {", r#"{"message":{}}"#]);
    let mut output = Vec::new();

    let report = Runtime::builder()
        .provider(IdleProvider)
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(report.reason, TerminationReason::Malformed);
    assert_eq!(report.turns, 0);
    assert!(output.is_empty());
}

#[tokio::test]
async fn random_shooter_emits_one_shot_per_turn() {
    let empty_turn = r#"{"message":{}}"#;
    let input = stream(&[
        HANDSHAKE,
        r#""END_INIT""#,
        empty_turn,
        empty_turn,
        empty_turn,
        r#""END""#,
    ]);
    let mut output = Vec::new();

    Runtime::builder()
        .provider(RandomShooter::with_seed(99))
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    let lines = output_lines(&output);
    assert_eq!(lines.len(), 3);
    for line in lines {
        let object = line.as_object().expect("action is an object");
        assert_eq!(object.len(), 1);
        let angle = object["shoot"].as_u64().expect("integer angle");
        assert!(angle < 360);
    }
}

#[tokio::test]
async fn turn_limit_stops_early() {
    let turn = r#"{"message":{}}"#;
    let input = stream(&[HANDSHAKE, r#""END_INIT""#, turn, turn, turn, turn]);
    let mut output = Vec::new();

    let report = Runtime::builder()
        .provider(IdleProvider)
        .turn_limit(2)
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(report.turns, 2);
    assert_eq!(report.reason, TerminationReason::TurnLimit);
    assert_eq!(output_lines(&output).len(), 2);
}

#[tokio::test]
async fn fatal_init_error_writes_nothing() {
    let input = stream(&[HANDSHAKE, r#"{"message":{"updated_objects":[]}}"#]);
    let mut output = Vec::new();

    let err = Runtime::builder()
        .provider(IdleProvider)
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Protocol {
            phase: Phase::Initialization,
            ..
        }
    ));
    assert!(output.is_empty());
}

#[tokio::test]
async fn empty_input_is_a_handshake_failure() {
    let mut output = Vec::new();

    let err = Runtime::builder()
        .provider(IdleProvider)
        .build()
        .run(&b""[..], &mut output)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Read {
            phase: Phase::Handshake,
            source: ReadError::Closed,
        }
    ));
}

#[tokio::test]
async fn provider_state_reflects_delete_before_update() {
    let input = stream(&[
        HANDSHAKE,
        BOUNDARY_BATCH,
        r#""END_INIT""#,
        r#"{"message":{"deleted_objects":["obj1","missing"],"updated_objects":{"obj1":{"type":3}}}}"#,
        r#""END""#,
    ]);
    let mut output = Vec::new();
    let mut seen = Vec::new();

    let report = Runtime::builder()
        .provider(FnProvider(move |state: &WorldState| {
            seen.push(state.object("obj1").and_then(|record| record.kind()));
            assert_eq!(seen, vec![Some(ObjectKind::Wall)]);
            Action::idle()
        }))
        .build()
        .run(input.as_slice(), &mut output)
        .await
        .unwrap();

    assert_eq!(report.world.len(), 1);
    assert!(report.world.object("obj1").unwrap().is(ObjectKind::Wall));
    // Bounds are fixed at initialization.
    assert_eq!(report.world.width(), 10.0);
}
