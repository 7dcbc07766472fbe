//! End-to-end tests of the bxtools binary against a fake bxc script

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn bxtools() -> Command {
    Command::cargo_bin("bxtools").unwrap()
}

/// A site with the settings sentinel and one page including a menu
fn make_site() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("bitrix")).unwrap();
    fs::write(root.join("bitrix/.settings.php"), "<?php return [];").unwrap();

    let page = root.join("about/index.php");
    fs::create_dir_all(page.parent().unwrap()).unwrap();
    fs::write(
        &page,
        "<?php\n$APPLICATION->IncludeComponent(\"bitrix:menu\", \"top\", array());\n    bitrix:news.list\n",
    )
    .unwrap();
    (temp_dir, page)
}

#[cfg(unix)]
fn install_fake_bxc(root: &Path, template_dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let script = root.join("fake-bxc");
    fs::write(
        &script,
        format!(
            r#"#!/bin/sh
case "$1" in
  generate:include) printf '%s' "<?php \$APPLICATION->IncludeComponent(\"${{3#--component=}}\");?>" ;;
  component:list) printf 'bitrix:menu\nbitrix:news.list\n' ;;
  templates:list) printf '%s\n' "{}" ;;
  *) echo "unknown command $1" >&2; exit 1 ;;
esac
"#,
            template_dir.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let config = serde_json::json!({ "tool": { "program": script } });
    fs::write(root.join(".bxtools.json"), config.to_string()).unwrap();
}

#[test]
fn root_prints_site_root() {
    let (temp_dir, page) = make_site();
    bxtools()
        .args(["root", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(temp_dir.path().to_str().unwrap()));
}

#[test]
fn root_outside_site_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("index.php");
    bxtools()
        .args(["root", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You are not in a bitrix web root!"));
}

#[test]
fn expand_outside_site_reports_status() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("index.php");
    fs::write(&file, "bitrix:menu").unwrap();
    bxtools()
        .args(["expand", format!("{}:1:5", file.display()).as_str(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"action":"status","message":"You are not in a bitrix web root!"}"#,
        ));
}

#[cfg(unix)]
#[test]
fn expand_replaces_reference_with_generated_code() {
    let (temp_dir, page) = make_site();
    install_fake_bxc(temp_dir.path(), temp_dir.path());

    let output = bxtools()
        .args(["expand", format!("{}:3:10", page.display()).as_str(), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(outcome["action"], "replace");
    assert_eq!(
        outcome["text"],
        "<?php $APPLICATION->IncludeComponent(\"bitrix:news.list\");?>"
    );
    let text = fs::read_to_string(&page).unwrap();
    let start = outcome["start"].as_u64().unwrap() as usize;
    let end = outcome["end"].as_u64().unwrap() as usize;
    assert_eq!(&text[start..end], "bitrix:news.list");
}

#[cfg(unix)]
#[test]
fn expand_from_stdin_offers_components_then_inserts_choice() {
    let (temp_dir, page) = make_site();
    install_fake_bxc(temp_dir.path(), temp_dir.path());

    bxtools()
        .args(["expand", format!("{}:1:1", page.display()).as_str(), "--stdin"])
        .write_stdin("<div></div>")
        .assert()
        .success()
        .stdout(predicate::str::contains("bitrix:news.list"));

    bxtools()
        .args([
            "expand",
            format!("{}:1:6", page.display()).as_str(),
            "--stdin",
            "--choose",
            "0",
            "--format",
            "json",
        ])
        .write_stdin("<div></div>")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""action":"insert","at":5"#));
}

#[cfg(unix)]
#[test]
fn open_template_resolves_template_file() {
    let (temp_dir, page) = make_site();
    let template_dir = temp_dir
        .path()
        .join("local/templates/main/components/bitrix/menu/top");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(template_dir.join("template.php"), "<ul></ul>").unwrap();
    install_fake_bxc(temp_dir.path(), &template_dir);

    bxtools()
        .args(["open-template", format!("{}:2", page.display()).as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            template_dir.join("template.php").to_str().unwrap(),
        ));
}

#[cfg(unix)]
#[test]
fn cancelled_choice_does_nothing() {
    let (temp_dir, page) = make_site();
    install_fake_bxc(temp_dir.path(), temp_dir.path());

    bxtools()
        .args([
            "expand",
            format!("{}:1:1", page.display()).as_str(),
            "--choose",
            "-1",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"action":"nothing"}"#));
}

#[test]
fn missing_tool_is_reported_not_fatal() {
    let (temp_dir, page) = make_site();
    fs::write(
        temp_dir.path().join(".bxtools.json"),
        r#"{"tool": {"program": "bxtools-test-no-such-bxc"}}"#,
    )
    .unwrap();

    bxtools()
        .args(["expand", format!("{}:3:10", page.display()).as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "`bxtools-test-no-such-bxc` is not installed or not runnable",
        ));
}

#[test]
fn complete_lists_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("template.php");
    fs::write(&file, "<?=$arItem[\"DETAIL_P").unwrap();

    bxtools()
        .args(["complete", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("DETAIL_PICTURE\nDETAIL_PAGE_URL\n");
}

#[test]
fn init_writes_default_config_once() {
    let (temp_dir, _page) = make_site();
    let nested = temp_dir.path().join("about");

    bxtools()
        .args(["init", "--cwd", nested.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let written = fs::read_to_string(temp_dir.path().join(".bxtools.json")).unwrap();
    assert!(written.contains("\"program\": \"bxc\""));

    bxtools()
        .args(["init", "--cwd", nested.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to overwrite"));
}
