//! Tests for replaying recorded JSON traces

use dicetray::dice3d::trace::RollTrace;

fn frame(delta: f32, shaking: bool, throw: bool, samples: &[(&str, &str)]) -> String {
    let samples: Vec<String> = samples
        .iter()
        .map(|(v, q)| format!(r#"{{ "velocity": {v}, "orientation": {q} }}"#))
        .collect();
    format!(
        r#"{{ "delta": {delta}, "shaking": {shaking}, "throw": {throw}, "samples": [{}] }}"#,
        samples.join(", ")
    )
}

const STILL: &str = "[0.0, 0.0, 0.0]";
const MOVING: &str = "[1.0, -3.0, 0.0]";
const IDENTITY: &str = "[0.0, 0.0, 0.0, 1.0]";
// 180 degrees about X: the 5 face is up.
const UPSIDE_DOWN: &str = "[1.0, 0.0, 0.0, 0.0]";

fn trace_json(dice: usize, frames: &[String]) -> String {
    format!(r#"{{ "dice": {dice}, "frames": [{}] }}"#, frames.join(", "))
}

#[test]
fn test_replay_two_dice() {
    let mut frames = vec![frame(0.1, true, false, &[(MOVING, IDENTITY), (MOVING, IDENTITY)])];
    frames.push(frame(0.1, false, true, &[(MOVING, IDENTITY), (MOVING, IDENTITY)]));
    for _ in 0..3 {
        frames.push(frame(0.1, false, false, &[(MOVING, IDENTITY), (STILL, UPSIDE_DOWN)]));
    }
    for _ in 0..10 {
        frames.push(frame(0.1, false, false, &[(STILL, IDENTITY), (STILL, UPSIDE_DOWN)]));
    }

    let trace = RollTrace::from_json(&trace_json(2, &frames)).unwrap();
    let outcome = trace.replay();

    assert_eq!(outcome.completions.len(), 2);
    // The second die stopped first.
    assert_eq!(outcome.completions[0].die, 1);
    assert_eq!(outcome.completions[0].value, 5);
    assert_eq!(outcome.completions[1].die, 0);
    assert_eq!(outcome.completions[1].value, 2);
    assert_eq!(outcome.results.total(), 7);
}

#[test]
fn test_rethrow_clears_previous_results() {
    let mut frames = vec![frame(0.1, false, true, &[(STILL, IDENTITY)])];
    for _ in 0..8 {
        frames.push(frame(0.1, false, false, &[(STILL, IDENTITY)]));
    }
    frames.push(frame(0.1, false, true, &[(MOVING, IDENTITY)]));
    frames.push(frame(0.1, false, false, &[(MOVING, IDENTITY)]));

    let outcome = RollTrace::from_json(&trace_json(1, &frames)).unwrap().replay();
    assert_eq!(outcome.completions.len(), 1);
    assert_eq!(outcome.results.results, vec![None]);
}

#[test]
fn test_missing_flags_default_to_false() {
    let json = r#"{ "dice": 1, "frames": [
        { "delta": 0.016, "samples": [{ "velocity": [0, 0, 0], "orientation": [0, 0, 0, 1] }] }
    ] }"#;
    let trace = RollTrace::from_json(json).unwrap();
    assert!(!trace.frames[0].shaking);
    assert!(!trace.frames[0].throw);
    assert!(trace.replay().completions.is_empty());
}

#[test]
fn test_invalid_traces_are_rejected() {
    assert!(RollTrace::from_json("not json").unwrap_err().contains("Failed to parse trace"));

    let wrong_count = trace_json(2, &[frame(0.1, false, false, &[(STILL, IDENTITY)])]);
    assert!(RollTrace::from_json(&wrong_count).unwrap_err().contains("expected 2 samples"));

    let negative = trace_json(1, &[frame(-0.1, false, false, &[(STILL, IDENTITY)])]);
    assert!(RollTrace::from_json(&negative).unwrap_err().contains("invalid delta"));

    let too_many = trace_json(7, &[]);
    assert!(RollTrace::from_json(&too_many).is_err());
}
