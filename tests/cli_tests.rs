use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn out(&self) -> &Path {
        self.dir.path()
    }

    fn files_with_ext(&self, ext: &str) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(self.out())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().map(|e| e == ext).unwrap_or(false))
            .collect();
        files.sort();
        files
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_psylab"))
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .expect("Failed to execute binary")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).to_string()
}

#[test]
fn test_catalog_lists_words() {
    let o = run(&["catalog", "--category", "neutral"]);
    assert!(o.status.success());
    let text = stdout(&o);
    assert!(text.contains("책상"));
    assert!(!text.contains("기쁨"));
}

#[test]
fn test_catalog_rejects_unknown_category() {
    let o = run(&["catalog", "--category", "spicy"]);
    assert!(!o.status.success());
}

#[test]
fn test_gamble_session_writes_outputs() {
    let ctx = TestContext::new();
    let out = ctx.out().to_str().unwrap();
    let o = run(&[
        "gamble",
        "--total-trials",
        "12",
        "--choices",
        "AAABBCCCCDDD",
        "--log-csv",
        "--out",
        out,
    ]);
    assert!(o.status.success(), "{}", String::from_utf8_lossy(&o.stderr));

    let json = ctx.files_with_ext("json");
    assert_eq!(json.len(), 1);
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json[0]).unwrap()).unwrap();
    assert_eq!(v["total_trials_completed"], 12);
    assert!(v["session_id"].as_str().unwrap().starts_with("IGT_"));

    let events = fs::read_to_string(ctx.out().join("events.csv")).unwrap();
    assert!(events.contains("SessionStart"));
    assert!(events.contains("Net Score: 2"));

    let trials = fs::read_to_string(ctx.out().join("trials.csv")).unwrap();
    assert_eq!(trials.lines().count(), 13);
}

#[test]
fn test_gamble_skips_bad_symbols() {
    let ctx = TestContext::new();
    let out = ctx.out().to_str().unwrap();
    let o = run(&["gamble", "--choices", "AXCZ", "--out", out]);
    assert!(o.status.success());

    let json = ctx.files_with_ext("json");
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json[0]).unwrap()).unwrap();
    assert_eq!(v["total_trials_completed"], 2);
}

#[test]
fn test_recall_fixed_list_scores() {
    let ctx = TestContext::new();
    let out = ctx.out().to_str().unwrap();
    let o = run(&[
        "recall",
        "--fixed",
        "--recalled",
        "기쁨,우산,바나나",
        "--out",
        out,
    ]);
    assert!(o.status.success(), "{}", String::from_utf8_lossy(&o.stderr));

    let csv = ctx.files_with_ext("csv");
    assert_eq!(csv.len(), 1);
    let mut rdr = csv::Reader::from_path(&csv[0]).unwrap();
    let row = rdr.records().next().unwrap().unwrap();
    assert_eq!(&row[7], "2");
    assert_eq!(&row[9], "1");
}

#[test]
fn test_recall_rejects_unknown_condition() {
    let o = run(&["recall", "--condition", "happy"]);
    assert!(!o.status.success());
}

#[test]
fn test_config_file_is_applied() {
    let ctx = TestContext::new();
    let cfg = ctx.out().join("cfg.json");
    fs::write(&cfg, r#"{ "gamble": { "total_trials": 5 } }"#).unwrap();
    let data = ctx.out().join("data");
    let o = run(&[
        "gamble",
        "--config",
        cfg.to_str().unwrap(),
        "--choices",
        "CCCCCCCCCC",
        "--out",
        data.to_str().unwrap(),
    ]);
    assert!(o.status.success());

    let json: Vec<PathBuf> = fs::read_dir(&data)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json[0]).unwrap()).unwrap();
    assert_eq!(v["total_trials_completed"], 5);
}

#[test]
fn test_simulate_reports_strategies() {
    let o = run(&[
        "simulate",
        "--participants",
        "8",
        "--strategy",
        "random,reckless",
        "--seed",
        "1",
    ]);
    assert!(o.status.success());
    let text = stdout(&o);
    assert!(text.contains("random"));
    assert!(text.contains("reckless"));
    assert!(!text.contains("learner"));
}

#[test]
fn test_simulate_accepts_max_seed() {
    let o = run(&[
        "simulate",
        "--participants",
        "4",
        "--strategy",
        "random,learner,reckless",
        "--seed",
        "18446744073709551615",
    ]);
    assert!(o.status.success(), "{}", String::from_utf8_lossy(&o.stderr));
    assert!(stdout(&o).contains("learner"));
}
