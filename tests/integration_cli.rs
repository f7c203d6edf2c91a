// Drives the compiled binary and checks what lands on stdout.

use assert_cmd::Command;
use std::path::Path;

fn recite(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("recite").unwrap();
    cmd.arg("--config").arg(config_dir.join("recite.json"));
    cmd
}

fn write_tone(path: &Path, secs: f64) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..(secs * 16_000.0) as usize {
        let s = 0.3 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 16_000.0).sin();
        let sample = (s * i16::MAX as f32) as i16;
        writer.write_sample(sample).unwrap();
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn json_report_without_audio() {
    let dir = tempfile::tempdir().unwrap();
    let out = recite(dir.path())
        .args(["--expected", "The cat sits on the mat"])
        .args(["--transcript", "the cat sits on the mat", "--seed", "3"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let analysis = &value["analysis"];
    assert_eq!(analysis["pronunciation"]["score"], 100.0);
    assert_eq!(analysis["fluency"]["score"], 75.0);
    assert_eq!(analysis["overall_score"], 90.0);
    assert_eq!(analysis["recognition_method"], "degraded");
    assert_eq!(value["feedback"]["message"], "Perfect! You nailed it! 🏆");
}

#[test]
fn csv_report_with_audio() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("reading.wav");
    write_tone(&wav, 2.4);

    let out = recite(dir.path())
        .args(["-e", "The cat sits on the mat", "-t", "the cat sits on the mat"])
        .arg("--audio")
        .arg(&wav)
        .args(["--format", "csv"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let mut reader = csv::Reader::from_reader(out.stdout.as_slice());
    let headers = reader.headers().unwrap().clone();
    let row = reader.records().next().unwrap().unwrap();
    let field = |name: &str| {
        let i = headers.iter().position(|h| h == name).unwrap();
        row[i].to_string()
    };
    assert_eq!(field("recognition_method"), "primary");
    assert_eq!(field("overall_score"), "100.0");
    assert_eq!(field("speaking_rate"), "150.0");
}

#[test]
fn second_transcript_is_the_fallback_engine() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("reading.wav");
    write_tone(&wav, 1.2);

    let out = recite(dir.path())
        .args(["-e", "Open the window", "-t", "", "-t", "open the window"])
        .arg("-a")
        .arg(&wav)
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["analysis"]["recognition_method"], "fallback-engine");
}

#[test]
fn practice_level_draws_a_sentence() {
    let dir = tempfile::tempdir().unwrap();
    let out = recite(dir.path())
        .args(["--level", "beginner", "--seed", "11"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let expected = value["analysis"]["expected_text"].as_str().unwrap();
    assert!(!expected.is_empty());
    assert_eq!(value["analysis"]["pronunciation"]["score"], 20.0);
}

#[test]
fn quick_check_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = recite(dir.path())
        .args(["--quick", "-e", "I like to play in the park", "-t", "I like play in a park"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["score"], 71);
    assert_eq!(value["missed_words"][0], "to");
}

#[test]
fn unknown_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    recite(dir.path())
        .args(["--level", "expert"])
        .assert()
        .failure();
}

#[test]
fn markup_in_sentence_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    recite(dir.path())
        .args(["--expected", "<b>bold</b>", "-t", "bold"])
        .assert()
        .failure();
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recite.json"), r#"{ "hop_ms": 0 }"#).unwrap();
    recite(dir.path())
        .args(["-e", "hello world", "-t", "hello world"])
        .assert()
        .failure();
}

#[test]
fn sentence_is_required() {
    let dir = tempfile::tempdir().unwrap();
    recite(dir.path()).args(["-t", "hello"]).assert().failure();
}
