//! End-to-end tests driving the `crane-landing` binary.
//!
//! Run with: `cargo test --test cli`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crane-landing"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run crane-landing")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn site_with_config(toml: &str) -> TempDir {
    let site = TempDir::new().unwrap();
    fs::write(site.path().join("config.toml"), toml).unwrap();
    site
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// gen-config / check
// ---------------------------------------------------------------------------

#[test]
fn gen_config_output_is_a_valid_config() {
    let out = run(&["gen-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[carousel]"));
    assert!(text.contains("swipe_threshold = 50.0"));

    let site = site_with_config(&text);
    let out = run(&["check", "--config", path_str(site.path())]);
    assert!(out.status.success(), "check failed: {}", stderr(&out));
    assert!(stdout(&out).contains("==> Config is valid"));
}

#[test]
fn check_without_config_uses_stock_defaults() {
    let site = TempDir::new().unwrap();
    let out = run(&["check", "--config", path_str(site.path())]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("001 Dizalica 1"));
    assert!(text.contains("(stock defaults)"));
}

#[test]
fn check_reports_short_spec_list() {
    let site = site_with_config(
        r#"
[carousel]
specs = [["Nosivost: 40 t"]]
"#,
    );
    let out = run(&["check", "--config", path_str(site.path())]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Warnings"));
    assert!(text.contains("slides past the end show the first entry"));
}

#[test]
fn unknown_keys_are_rejected() {
    let site = site_with_config(
        r#"
[carousel]
swipe = 80
"#,
    );
    let out = run(&["check", "--config", path_str(site.path())]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("unknown field"));
}

#[test]
fn invalid_values_are_rejected() {
    let site = site_with_config(
        r#"
[carousel]
swipe_threshold = 0.0
"#,
    );
    let out = run(&["check", "--config", path_str(site.path())]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("swipe_threshold"));
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_writes_page_stylesheet_and_assets() {
    let site = site_with_config(
        r#"
[site]
name = "Gruž Dizalice"

[[equipment]]
image = "img/kran.jpg"
alt = "Toranjski kran"

[[equipment]]
image = "img/auto.jpg"
alt = "Autodizalica"

[carousel]
specs = [["Nosivost: 8 t"], ["Nosivost: 40 t"]]
"#,
    );
    fs::create_dir_all(site.path().join("assets/img")).unwrap();
    fs::write(site.path().join("assets/img/kran.jpg"), b"jpg").unwrap();
    let out_dir = TempDir::new().unwrap();

    let out = run(&[
        "build",
        "--config",
        path_str(site.path()),
        "--output",
        path_str(out_dir.path()),
    ]);
    assert!(out.status.success(), "build failed: {}", stderr(&out));
    assert!(stdout(&out).contains("Generated 2 slides"));

    let html = fs::read_to_string(out_dir.path().join("index.html")).unwrap();
    assert!(html.contains("Gruž Dizalice"));
    assert!(html.contains("<li>Nosivost: 8 t</li>"));
    assert!(!html.contains("<li>Nosivost: 40 t</li>"));
    assert!(html.contains("[[\"Nosivost: 8 t\"],[\"Nosivost: 40 t\"]]"));

    let stylesheets: Vec<_> = fs::read_dir(out_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("style.") && name.ends_with(".css"))
        .collect();
    assert_eq!(stylesheets.len(), 1);
    assert!(html.contains(&stylesheets[0]));

    assert_eq!(fs::read(out_dir.path().join("img/kran.jpg")).unwrap(), b"jpg");
}

#[test]
fn build_is_deterministic() {
    let site = TempDir::new().unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        let out = run(&[
            "build",
            "--config",
            path_str(site.path()),
            "--output",
            path_str(dir.path()),
        ]);
        assert!(out.status.success());
    }
    assert_eq!(
        fs::read_to_string(first.path().join("index.html")).unwrap(),
        fs::read_to_string(second.path().join("index.html")).unwrap()
    );
}

// ---------------------------------------------------------------------------
// mailto
// ---------------------------------------------------------------------------

#[test]
fn mailto_prints_encoded_link() {
    let site = TempDir::new().unwrap();
    let out = run(&[
        "mailto",
        "--config",
        path_str(site.path()),
        "--name",
        "Ana",
        "--phone",
        "091 000 000",
        "--location",
        "Lapad",
        "--message",
        "Podizanje klima uređaja",
    ]);
    assert!(out.status.success());
    let link = stdout(&out);
    assert!(link.starts_with("mailto:info@dubrovnikdizalica.com?subject=Upit%20%E2%80%93"));
    assert!(link.contains("Lokacija%3A%20Lapad"));
}

#[test]
fn mailto_with_missing_fields_fails_with_alert() {
    let site = TempDir::new().unwrap();
    let out = run(&["mailto", "--config", path_str(site.path()), "--name", "Ana"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    let err = stderr(&out);
    assert!(err.contains("Molim ispuni sva polja."));
    assert!(err.contains("missing: phone, location, message"));
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

#[test]
fn theme_toggle_persists_between_runs() {
    let site = TempDir::new().unwrap();
    let store = site.path().join("state/theme.json");
    let store = path_str(&store);
    let config = path_str(site.path());

    let out = run(&["theme", "show", "--config", config, "--store", store]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Theme: light (nothing stored, default)"));

    let out = run(&["theme", "toggle", "--config", config, "--store", store]);
    assert!(stdout(&out).contains("Theme: dark"));

    let saved = fs::read_to_string(site.path().join("state/theme.json")).unwrap();
    assert!(saved.contains("\"theme\": \"dark\""));

    let out = run(&["theme", "toggle", "--config", config, "--store", store]);
    assert!(stdout(&out).starts_with("Theme: light"));
}
