use anyhow::Result;
use fetchfox::test_utils::firefox_archive;
use predicates::prelude::*;
use std::fs;

use crate::common::TestEnv;

const STABLE: &str = "stable-linux64-en-US";

#[test]
fn test_fresh_install_of_latest_stable() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_stable_version("100.0")?;
    env.publish_stable_archive("100.0")?;

    env.command()
        .arg("stable")
        .assert()
        .success()
        .stdout(predicate::str::contains("Will install stable at 100.0"))
        .stdout(predicate::str::contains(
            "pub/firefox/releases/100.0/linux-x86_64/en-US/firefox-100.0.tar.bz2",
        ))
        .stdout(predicate::str::contains("Done"));

    let manifest = fs::read_to_string(env.manifest_path(STABLE))?;
    assert!(manifest.contains("Milestone=100.0"));
    assert!(env.install_dir(STABLE).join("firefox/firefox").is_file());

    let entry = fs::read_to_string(env.desktop_entry_path(STABLE))?;
    let executable = env.install_dir(STABLE).join("firefox/firefox");
    assert!(entry.starts_with("# Managed by Fetchfox - do not edit."));
    assert!(entry.contains(&format!("Exec={} --class Fetchfox-{STABLE} %u", executable.display())));
    assert!(entry.contains(&format!("StartupWMClass=Fetchfox-{STABLE}")));
    Ok(())
}

#[test]
fn test_second_run_is_up_to_date() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_stable_version("100.0")?;
    env.publish_stable_archive("100.0")?;

    env.command().arg("stable").assert().success();
    let entry_before = fs::metadata(env.desktop_entry_path(STABLE))?.modified()?;

    env.command()
        .arg("stable")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local version is up to date (100.0)"))
        .stdout(predicate::str::contains("Downloading").not());

    let entry_after = fs::metadata(env.desktop_entry_path(STABLE))?.modified()?;
    assert_eq!(entry_before, entry_after, "launcher must not be rewritten");
    Ok(())
}

#[test]
fn test_pinned_up_to_date_needs_no_mirror() -> Result<()> {
    let env = TestEnv::new()?;
    env.seed_install(STABLE, "[Build]\nMilestone=100.0\n")?;

    env.command()
        .args(["stable", "--pin", "100.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100.0"))
        .stdout(predicate::str::contains("Done").not());

    assert!(!env.desktop_entry_path(STABLE).exists());
    Ok(())
}

#[test]
fn test_force_reinstalls_same_version() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_stable_archive("100.0")?;
    env.seed_install(STABLE, "[Build]\nMilestone=100.0\n")?;
    let stale = env.install_dir(STABLE).join("firefox/stale.so");
    fs::write(&stale, "old")?;

    env.command()
        .args(["stable", "--pin", "100.0", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("but will force reinstall"))
        .stdout(predicate::str::contains("Done"));

    assert!(!stale.exists(), "previous installation must be removed");
    assert!(env.desktop_entry_path(STABLE).is_file());
    Ok(())
}

#[test]
fn test_upgrade_replaces_previous_version() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_stable_archive("101.0")?;
    env.seed_install(STABLE, "[Build]\nMilestone=100.0\n")?;

    env.command()
        .args(["stable", "--pin", "101.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Will install stable at 101.0"));

    let manifest = fs::read_to_string(env.manifest_path(STABLE))?;
    assert!(manifest.contains("Milestone=101.0"));
    Ok(())
}

#[test]
fn test_esr_i686_german_install() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_archive_bytes(
        "firefox",
        "78.0.2esr",
        "linux-i686",
        "de",
        &firefox_archive("78.0.2esr"),
    )?;

    env.command()
        .args(["esr", "--arch", "linux", "--locale", "de", "--pin", "78.0.2esr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linux-i686/de/firefox-78.0.2esr.tar.bz2"));

    let slug = "esr-linux-de";
    assert!(env.manifest_path(slug).is_file());
    let entry = fs::read_to_string(env.desktop_entry_path(slug))?;
    assert!(entry.contains("Name=Firefox  ESR"));
    Ok(())
}

#[test]
fn test_devedition_uses_its_own_distribution_root() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_archive_bytes(
        "devedition",
        "79.0b3",
        "linux-x86_64",
        "en-US",
        &firefox_archive("79.0b3"),
    )?;
    env.publish_stable_version("78.0.2")?;

    env.command()
        .arg("devedition")
        .assert()
        .success()
        .stdout(predicate::str::contains("pub/devedition/releases/79.0b3/"));

    assert!(env.manifest_path("devedition-linux64-en-US").is_file());
    Ok(())
}

#[test]
fn test_missing_archive_keeps_existing_install() -> Result<()> {
    let env = TestEnv::new()?;
    env.seed_install(STABLE, "[Build]\nMilestone=100.0\n")?;

    env.command().args(["stable", "--pin", "101.0"]).assert().code(1);

    let manifest = fs::read_to_string(env.manifest_path(STABLE))?;
    assert!(manifest.contains("Milestone=100.0"));
    Ok(())
}

#[test]
fn test_corrupt_archive_leaves_no_manifest() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_archive_bytes("firefox", "100.0", "linux-x86_64", "en-US", b"not an archive")?;

    env.command()
        .args(["stable", "--pin", "100.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to extract archive"));

    assert!(env.install_dir(STABLE).is_dir());
    assert!(!env.manifest_path(STABLE).exists());
    assert!(!env.desktop_entry_path(STABLE).exists());
    Ok(())
}

#[test]
fn test_menu_refresh_failure_is_not_fatal() -> Result<()> {
    let env = TestEnv::new()?;
    env.write_config(true)?;
    env.publish_stable_archive("100.0")?;

    // PATH holds no update-desktop-database.
    env.command()
        .args(["stable", "--pin", "100.0"])
        .env("PATH", env.applications_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    assert!(env.desktop_entry_path(STABLE).is_file());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_undeletable_leftovers_do_not_block_install() -> Result<()> {
    use fetchfox::test_utils::{lock_dir_with_file, unlock_dir};

    let env = TestEnv::new()?;
    env.seed_install(STABLE, "[Build]\nMilestone=99.0\n")?;
    env.publish_stable_archive("100.0")?;
    let install_dir = env.install_dir(STABLE);
    if !lock_dir_with_file(&install_dir) {
        return Ok(());
    }

    let assert = env.command().args(["stable", "--pin", "100.0"]).assert();
    unlock_dir(&install_dir);

    assert
        .success()
        .stdout(predicate::str::contains("of the previous installation could not be removed"))
        .stdout(predicate::str::contains("Done"));

    let manifest = fs::read_to_string(env.manifest_path(STABLE))?;
    assert!(manifest.contains("Milestone=100.0"));
    Ok(())
}

#[test]
fn test_empty_pin_installs_latest() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_stable_version("100.0")?;
    env.publish_stable_archive("100.0")?;

    env.command()
        .args(["stable", "--pin", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Will install stable at 100.0"))
        .stdout(predicate::str::contains("releases//").not());
    Ok(())
}
