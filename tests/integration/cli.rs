use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn test_unknown_release_is_rejected() -> Result<()> {
    let env = TestEnv::new()?;

    env.command()
        .arg("beta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'beta'"));

    assert!(!env.data_dir().exists(), "nothing may be created for a usage error");
    Ok(())
}

#[test]
fn test_unknown_arch_is_rejected() -> Result<()> {
    let env = TestEnv::new()?;

    env.command()
        .args(["stable", "--arch", "arm64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'arm64'"));

    assert!(!env.data_dir().exists());
    Ok(())
}

#[test]
fn test_release_is_required() -> Result<()> {
    let env = TestEnv::new()?;
    env.command().assert().failure();
    Ok(())
}

#[test]
fn test_help_lists_install_flags() {
    assert_cmd::Command::cargo_bin("fetchfox")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--locale"))
        .stdout(predicate::str::contains("--arch"))
        .stdout(predicate::str::contains("--pin"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_corrupt_manifest_aborts() -> Result<()> {
    let env = TestEnv::new()?;
    env.seed_install("stable-linux64-en-US", "[Build]\nBuildID=1\n")?;

    env.command()
        .args(["stable", "--pin", "100.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("Milestone"));

    assert!(!env.desktop_entry_path("stable-linux64-en-US").exists());
    Ok(())
}

#[test]
fn test_corrupt_manifest_recovers_after_suggested_removal() -> Result<()> {
    let env = TestEnv::new()?;
    let slug = "stable-linux64-en-US";
    env.seed_install(slug, "[Build]\nBuildID=1\n")?;
    env.publish_stable_archive("100.0")?;

    let install_dir = env.install_dir(slug);
    env.command()
        .args(["stable", "--pin", "100.0", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("Remove {}", install_dir.display())));

    std::fs::remove_dir_all(&install_dir)?;

    env.command()
        .args(["stable", "--pin", "100.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));
    assert!(env.manifest_path(slug).is_file());
    Ok(())
}

#[test]
fn test_missing_channel_in_versions_response() -> Result<()> {
    let env = TestEnv::new()?;
    env.publish_versions(r#"{"LATEST_FIREFOX_VERSION": "78.0.2"}"#)?;

    env.command()
        .arg("nightly")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FIREFOX_NIGHTLY"));

    assert!(!env.install_dir("nightly-linux64-en-US").exists());
    Ok(())
}

#[test]
fn test_unreachable_versions_endpoint() -> Result<()> {
    let env = TestEnv::new()?;

    env.command().arg("esr").assert().code(1).stderr(predicate::str::contains("error:"));

    assert!(!env.install_dir("esr-linux64-en-US").exists());
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let env = TestEnv::new()?;
    let config = tempfile::NamedTempFile::new()?;
    std::fs::write(config.path(), "refresh_menu_database = \"sometimes\"\n")?;

    env.command()
        .env("FETCHFOX_CONFIG_PATH", config.path())
        .args(["stable", "--pin", "100.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}
