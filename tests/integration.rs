use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn scripture_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("scripture");
    path
}

fn setup_test_env() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let corpus_path = root.join("corpus.json");
    fs::write(
        &corpus_path,
        r#"[
  { "book": "Gênesis", "chapter": 1, "verse": 1, "text": "No princípio criou Deus os céus e a terra;" },
  { "book": "Gênesis", "chapter": 1, "verse": 2, "text": "e a terra era sem forma e vazia," },
  { "book": "Gênesis", "chapter": 1, "verse": 3, "text": "e disse Deus: Haja luz; e houve luz." },
  { "book": "Gênesis", "chapter": 1, "verse": 4, "text": "E viu Deus que era boa a luz" },
  { "book": "Gênesis", "chapter": 2, "verse": 1, "text": "Assim os céus e a terra foram acabados." }
]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/scripture.sqlite"

[server]
bind = "127.0.0.1:0"
"#,
        root.display()
    );

    let config_path = config_dir.join("scripture.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path, corpus_path)
}

fn run_scripture(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = scripture_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run scripture binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn setup_imported() -> (TempDir, PathBuf) {
    let (tmp, config_path, corpus_path) = setup_test_env();
    let (stdout, stderr, success) =
        run_scripture(&config_path, &["import", corpus_path.to_str().unwrap()]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    (tmp, config_path)
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path, _) = setup_test_env();

    let (stdout, stderr, success) = run_scripture(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path, _) = setup_test_env();

    let (_, _, success1) = run_scripture(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_scripture(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_import_reports_counts() {
    let (_tmp, config_path, corpus_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_scripture(&config_path, &["import", corpus_path.to_str().unwrap()]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("books:  1"));
    assert!(stdout.contains("verses: 5"));
}

#[test]
fn test_import_twice_requires_replace() {
    let (_tmp, config_path, corpus_path) = setup_test_env();
    let corpus = corpus_path.to_str().unwrap();

    let (_, _, first) = run_scripture(&config_path, &["import", corpus]);
    assert!(first);

    let (_, stderr, second) = run_scripture(&config_path, &["import", corpus]);
    assert!(!second, "second import should be refused");
    assert!(stderr.contains("--replace"), "stderr: {}", stderr);

    let (stdout, _, third) = run_scripture(&config_path, &["import", corpus, "--replace"]);
    assert!(third);
    assert!(stdout.contains("verses: 5"));
}

#[test]
fn test_import_rejects_out_of_order_corpus() {
    let (tmp, config_path, _) = setup_test_env();
    let bad = tmp.path().join("bad.json");
    fs::write(
        &bad,
        r#"[{ "book": "Rute", "chapter": 1, "verse": 2, "text": "Texto." }]"#,
    )
    .unwrap();

    let (_, stderr, success) = run_scripture(&config_path, &["import", bad.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Invalid corpus"), "stderr: {}", stderr);
}

#[test]
fn test_get_single_verse() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, stderr, success) = run_scripture(&config_path, &["get", "2"]);
    assert!(success, "get failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Gênesis 1:2\n"), "stdout: {}", stdout);
    assert!(stdout.contains("next id: 3"));
}

#[test]
fn test_get_find_end() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, _, success) = run_scripture(&config_path, &["get", "1", "--find-end"]);
    assert!(success);
    assert!(stdout.starts_with("Gênesis 1:1-3\n"), "stdout: {}", stdout);
    assert!(stdout.contains("next id: 4"));
}

#[test]
fn test_get_invalid_and_missing() {
    let (_tmp, config_path) = setup_imported();

    let (_, stderr, success) = run_scripture(&config_path, &["get", "0"]);
    assert!(!success);
    assert!(stderr.contains("ID inválido"));

    let (_, stderr, success) = run_scripture(&config_path, &["get", "-3"]);
    assert!(!success);
    assert!(stderr.contains("ID inválido"));

    let (_, stderr, success) = run_scripture(&config_path, &["get", "42"]);
    assert!(!success);
    assert!(stderr.contains("Versículo inicial não encontrado"));

    let (_, stderr, success) = run_scripture(&config_path, &["get", "5", "--find-end"]);
    assert!(!success);
    assert!(stderr.contains("Nenhum versículo encontrado"));
}

#[test]
fn test_invalid_input_does_not_create_database() {
    let (tmp, config_path, _) = setup_test_env();
    let data_dir = tmp.path().join("data");

    let (_, stderr, success) = run_scripture(&config_path, &["get", "0"]);
    assert!(!success);
    assert!(stderr.contains("ID inválido"));

    let (_, stderr, success) = run_scripture(&config_path, &["range", "gênesis", "1", "5-2"]);
    assert!(!success);
    assert!(stderr.contains("Parâmetros inválidos"));

    assert!(!data_dir.exists(), "validation failure created {:?}", data_dir);
}

#[test]
fn test_range_command() {
    let (_tmp, config_path) = setup_imported();

    let (stdout, stderr, success) = run_scripture(&config_path, &["range", "GÊNESIS", "1", "2-4"]);
    assert!(success, "range failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Gênesis 1:2-4\n"), "stdout: {}", stdout);
    assert!(stdout.contains("[id 4]"));

    let (_, stderr, success) = run_scripture(&config_path, &["range", "gênesis", "1", "5-2"]);
    assert!(!success);
    assert!(stderr.contains("Parâmetros inválidos"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (_, stderr, success) = run_scripture(&missing, &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
