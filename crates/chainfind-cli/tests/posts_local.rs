use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_posts_list_seeds_original_logs() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOG_001"))
        .stdout(predicate::str::contains("LOG_002"))
        .stdout(predicate::str::contains("LOG_003"))
        .stdout(predicate::str::contains("AI_WEB3"));

    assert!(dir.path().join("posts.json").exists());
}

#[test]
fn test_posts_show_prints_full_entry() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "show", "LOG_002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zero-Knowledge Proofs"))
        .stdout(predicate::str::contains("CRYPTOGRAPHY"))
        .stdout(predicate::str::contains("[END_OF_LOG]"));
}

#[test]
fn test_posts_show_unknown_id_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "show", "LOG_404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOG_404"));
}

#[test]
fn test_posts_delete_then_reset_restores_seed() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "delete", "LOG_003"])
        .assert()
        .success()
        .stdout(predicate::str::contains("purged"));

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOG_003").not());

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "reset"])
        .assert()
        .success();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOG_003"));
}

#[test]
fn test_posts_delete_unknown_id_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("chainfind")
        .env("CHAINFIND_HOME", dir.path())
        .args(["posts", "delete", "LOG_404"])
        .assert()
        .failure();
}
