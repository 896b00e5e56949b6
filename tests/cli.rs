//! CLI integration tests for polyglot's local commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use polyglot::store::{SqliteStore, Store};
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A context with an initialized database, domain "payments" and
    /// languages French (fr) and German (de).
    fn seeded() -> Self {
        let ctx = Self::new();
        ctx.init().success();
        ctx.run(&["domain", "add", "--name", "payments", "--non-interactive"])
            .success();
        ctx.run(&[
            "language",
            "add",
            "--name",
            "French",
            "--code",
            "fr",
            "--non-interactive",
        ])
        .success();
        ctx.run(&[
            "language",
            "add",
            "--name",
            "German",
            "--code",
            "de",
            "--non-interactive",
        ])
        .success();
        ctx
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["init", "--data-dir", &self.data_dir_str()])
            .assert()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("polyglot").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Runs `polyglot <group> <action> --data-dir <dir> <rest...>`.
    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        let (head, rest) = args.split_at(2.min(args.len()));
        self.cmd()
            .args(head)
            .args(["--data-dir", &self.data_dir_str()])
            .args(rest)
            .assert()
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.run(args).success().get_output().stdout.clone();
        serde_json::from_slice(&output).expect("failed to parse JSON")
    }

    fn add_pre_auth(&self) -> assert_cmd::assert::Assert {
        self.run(&[
            "source",
            "add",
            "--key",
            "PRE_AUTH",
            "--text",
            "Pre-authorized Payments",
            "--domain",
            "payments",
            "--translation",
            "fr=Paiements Préautorisé",
            "--non-interactive",
        ])
    }

    fn store(&self) -> SqliteStore {
        SqliteStore::new(self.data_dir().join("polyglot.db")).expect("open store")
    }
}

#[test]
fn test_init_creates_database() {
    let ctx = TestContext::new();
    ctx.init()
        .success()
        .stdout(predicate::str::contains("Created database"));

    assert!(ctx.data_dir().join("polyglot.db").exists());
    assert!(ctx.store().is_initialized().unwrap());
}

#[test]
fn test_init_twice_fails() {
    let ctx = TestContext::new();
    ctx.init().success();
    ctx.init()
        .failure()
        .stderr(predicate::str::contains("Already initialized"));
}

#[test]
fn test_commands_require_init() {
    let ctx = TestContext::new();
    ctx.run(&["domain", "list"])
        .failure()
        .stderr(predicate::str::contains("polyglot init"));
}

#[test]
fn test_domain_add_list_remove() {
    let ctx = TestContext::seeded();

    let domains = ctx.json(&["domain", "list", "--json"]);
    let domains = domains.as_array().expect("domains not an array");
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0]["name"], "payments");
    assert_eq!(domains[0]["sources"], 0);

    ctx.run(&["domain", "add", "--name", "payments", "--non-interactive"])
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ctx.run(&[
        "domain",
        "remove",
        "--name",
        "payments",
        "--non-interactive",
        "--yes",
    ])
    .success();

    let domains = ctx.json(&["domain", "list", "--json"]);
    assert!(domains.as_array().unwrap().is_empty());
}

#[test]
fn test_remove_requires_yes_when_non_interactive() {
    let ctx = TestContext::seeded();

    ctx.run(&["domain", "remove", "--name", "payments", "--non-interactive"])
        .failure()
        .stderr(predicate::str::contains("--yes"));

    assert!(ctx.store().get_domain_by_name("payments").unwrap().is_some());
}

#[test]
fn test_add_requires_flags_when_non_interactive() {
    let ctx = TestContext::seeded();

    ctx.run(&["domain", "add", "--non-interactive"])
        .failure()
        .stderr(predicate::str::contains("--name"));

    ctx.run(&["language", "add", "--name", "Dutch", "--non-interactive"])
        .failure()
        .stderr(predicate::str::contains("--code"));
}

#[test]
fn test_language_list_and_code_validation() {
    let ctx = TestContext::seeded();

    let languages = ctx.json(&["language", "list", "--json"]);
    let codes: Vec<&str> = languages
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["fr", "de"]);

    ctx.run(&[
        "language",
        "add",
        "--name",
        "Serbian (Latin)",
        "--code",
        "sr@latin",
        "--non-interactive",
    ])
    .success();

    ctx.run(&[
        "language",
        "add",
        "--name",
        "Klingon",
        "--code",
        "   ",
        "--non-interactive",
    ])
    .failure()
    .stderr(predicate::str::contains("Language code cannot be empty"));
}

#[test]
fn test_source_add_and_show() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth()
        .success()
        .stdout(predicate::str::contains("1 translation(s)"));

    let detail = ctx.json(&["source", "show", "PRE_AUTH", "--json"]);
    assert_eq!(detail["key"], "PRE_AUTH");
    assert_eq!(detail["domain"]["name"], "payments");
    assert_eq!(detail["translations"][0]["text"], "Paiements Préautorisé");
    assert_eq!(detail["translations"][0]["language"]["code"], "fr");

    assert_eq!(
        ctx.store().resolve_translation("PRE_AUTH", "fr").unwrap(),
        Some("Paiements Préautorisé".to_string())
    );
}

#[test]
fn test_source_add_duplicate_key_fails() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();
    ctx.add_pre_auth()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_source_add_unknown_language_writes_nothing() {
    let ctx = TestContext::seeded();

    ctx.run(&[
        "source",
        "add",
        "--key",
        "REFUND",
        "--text",
        "Refund",
        "--domain",
        "payments",
        "--translation",
        "xx=Nope",
        "--non-interactive",
    ])
    .failure()
    .stderr(predicate::str::contains("Language not found"));

    assert!(ctx.store().get_source_by_key("REFUND").unwrap().is_none());
}

#[test]
fn test_source_list_filters() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();
    ctx.run(&["domain", "add", "--name", "account", "--non-interactive"])
        .success();
    ctx.run(&[
        "source",
        "add",
        "--key",
        "LOGIN",
        "--text",
        "Log in",
        "--domain",
        "account",
        "--translation",
        "de=Anmelden",
        "--non-interactive",
    ])
    .success();

    let keys = |value: Value| -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["key"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(
        keys(ctx.json(&["source", "list", "--json"])),
        ["LOGIN", "PRE_AUTH"]
    );
    assert_eq!(
        keys(ctx.json(&["source", "list", "--desc", "--json"])),
        ["PRE_AUTH", "LOGIN"]
    );
    assert_eq!(
        keys(ctx.json(&["source", "list", "--domain", "payments", "--json"])),
        ["PRE_AUTH"]
    );
    assert_eq!(
        keys(ctx.json(&["source", "list", "--language", "de", "--json"])),
        ["LOGIN"]
    );
    assert_eq!(
        keys(ctx.json(&["source", "list", "--search", "pre-auth", "--json"])),
        ["PRE_AUTH"]
    );

    ctx.run(&["source", "list", "--sort", "bogus"])
        .failure()
        .stderr(predicate::str::contains("Unknown sort column"));
}

#[test]
fn test_source_edit() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();
    ctx.run(&["domain", "add", "--name", "checkout", "--non-interactive"])
        .success();

    ctx.run(&[
        "source",
        "edit",
        "PRE_AUTH",
        "--text",
        "Preauthorized payments",
        "--domain",
        "checkout",
    ])
    .success();

    let detail = ctx.json(&["source", "show", "PRE_AUTH", "--json"]);
    assert_eq!(detail["text"], "Preauthorized payments");
    assert_eq!(detail["domain"]["name"], "checkout");

    ctx.run(&["source", "edit", "PRE_AUTH"])
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_translation_set_and_remove() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();

    ctx.run(&[
        "translation",
        "set",
        "--key",
        "PRE_AUTH",
        "--code",
        "de",
        "--text",
        "Vorautorisierte Zahlungen",
    ])
    .success()
    .stdout(predicate::str::contains("Added German translation"));

    ctx.run(&[
        "translation",
        "set",
        "--key",
        "PRE_AUTH",
        "--code",
        "fr",
        "--text",
        "Paiements préautorisés",
    ])
    .success()
    .stdout(predicate::str::contains("Updated French translation"));

    let store = ctx.store();
    assert_eq!(
        store.resolve_translation("PRE_AUTH", "de").unwrap(),
        Some("Vorautorisierte Zahlungen".to_string())
    );
    assert_eq!(
        store.resolve_translation("PRE_AUTH", "fr").unwrap(),
        Some("Paiements préautorisés".to_string())
    );
    drop(store);

    ctx.run(&[
        "translation",
        "remove",
        "--key",
        "PRE_AUTH",
        "--code",
        "de",
        "--non-interactive",
        "--yes",
    ])
    .success();

    assert_eq!(
        ctx.store().resolve_translation("PRE_AUTH", "de").unwrap(),
        None
    );
}

#[test]
fn test_language_in_use_cannot_be_removed() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();

    ctx.run(&[
        "language",
        "remove",
        "--code",
        "fr",
        "--non-interactive",
        "--yes",
    ])
    .failure();

    ctx.run(&[
        "language",
        "remove",
        "--code",
        "de",
        "--non-interactive",
        "--yes",
    ])
    .success();
}

#[test]
fn test_source_remove_cascades() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();

    ctx.run(&["source", "remove", "PRE_AUTH", "--non-interactive", "--yes"])
        .success();

    let store = ctx.store();
    assert!(store.get_source_by_key("PRE_AUTH").unwrap().is_none());
    assert_eq!(store.resolve_translation("PRE_AUTH", "fr").unwrap(), None);
    let french = store.get_language_by_code("fr").unwrap().unwrap();
    assert_eq!(store.count_language_translations(&french.id).unwrap(), 0);
}

#[test]
fn test_snippet_formats() {
    let ctx = TestContext::seeded();
    ctx.add_pre_auth().success();

    ctx.cmd()
        .args(["snippet", "--data-dir", &ctx.data_dir_str(), "PRE_AUTH"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<trans-unit id=\"PRE_AUTH\">"))
        .stdout(predicate::str::contains("<target>Paiements Préautorisé</target>"));

    ctx.cmd()
        .args([
            "snippet",
            "--data-dir",
            &ctx.data_dir_str(),
            "PRE_AUTH",
            "--format",
            "properties",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("// messages_fr.properties"))
        .stdout(predicate::str::contains("payments.PRE_AUTH="));

    ctx.cmd()
        .args([
            "snippet",
            "--data-dir",
            &ctx.data_dir_str(),
            "PRE_AUTH",
            "--format",
            "endpoint",
            "--base-url",
            "https://i18n.example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://i18n.example.com/api/translations?key=PRE_AUTH&code=fr",
        ));

    ctx.cmd()
        .args([
            "snippet",
            "--data-dir",
            &ctx.data_dir_str(),
            "PRE_AUTH",
            "--format",
            "yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}
