use anyhow::Result;
use fetchfox::config::{GlobalConfig, Layout};
use fetchfox::core::{Architecture, InstallTarget, ReleaseChannel};
use fetchfox::installer::{InstallOutcome, InstallRequest, Installer, MenuRefresh};
use fetchfox::test_utils::{
    FakeTransport, RecordingRefresher, firefox_archive, init_test_logging, versions_json,
};
use fetchfox::version::VersionRequest;
use tempfile::TempDir;

fn request(channel: ReleaseChannel, version: VersionRequest) -> InstallRequest {
    InstallRequest {
        target: InstallTarget::new(channel, Architecture::Linux64, "en-US"),
        version,
        force: false,
    }
}

#[tokio::test]
async fn test_run_installs_then_reports_up_to_date() -> Result<()> {
    init_test_logging(None);
    let temp = TempDir::new()?;
    let layout = Layout::new(temp.path().join("data"), temp.path().join("apps"));
    let installer = Installer::new(
        layout,
        FakeTransport::new()
            .with_versions(versions_json("78.0.2"))
            .with_archive(firefox_archive("78.0.2")),
        RecordingRefresher::new(),
    );
    let request = request(ReleaseChannel::Stable, VersionRequest::Latest);

    let InstallOutcome::Installed(report) = installer.run(&request).await? else {
        panic!("first run must install");
    };
    assert_eq!(report.version, "78.0.2");
    assert_eq!(report.menu_refresh, MenuRefresh::Refreshed);
    assert!(report.cleanup.is_clean());
    assert!(report.desktop_entry_path.is_file());

    let outcome = installer.run(&request).await?;
    assert_eq!(
        outcome,
        InstallOutcome::UpToDate {
            version: "78.0.2".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_installer_from_config_honors_directories() -> Result<()> {
    let temp = TempDir::new()?;
    let config = GlobalConfig {
        data_dir: Some(temp.path().join("installs")),
        applications_dir: Some(temp.path().join("launchers")),
        refresh_menu_database: false,
        ..GlobalConfig::default()
    };
    let installer = Installer::from_config(
        &config,
        FakeTransport::new().with_archive(firefox_archive("80.0a1")),
        RecordingRefresher::new(),
    )?;

    let outcome = installer
        .run(&request(ReleaseChannel::Nightly, VersionRequest::Pinned("80.0a1".to_string())))
        .await?;

    let InstallOutcome::Installed(report) = outcome else {
        panic!("expected an install");
    };
    assert_eq!(report.install_dir, temp.path().join("installs/nightly-linux64-en-US"));
    assert_eq!(
        report.desktop_entry_path,
        temp.path().join("launchers/Fetchfox-nightly-linux64-en-US.desktop")
    );
    assert_eq!(report.menu_refresh, MenuRefresh::Skipped);
    Ok(())
}

#[tokio::test]
async fn test_pinned_version_skips_versions_endpoint() -> Result<()> {
    let temp = TempDir::new()?;
    let layout = Layout::new(temp.path().join("data"), temp.path().join("apps"));
    let installer = Installer::new(
        layout,
        FakeTransport::new().with_archive(firefox_archive("68.10.0esr")),
        RecordingRefresher::new(),
    )
    .distribution_url("https://mirror.example");

    let plan = installer
        .plan(&request(ReleaseChannel::Esr, VersionRequest::Pinned("68.10.0esr".to_string())))
        .await?;
    assert_eq!(
        plan.url,
        "https://mirror.example/pub/firefox/releases/68.10.0esr/linux-x86_64/en-US/firefox-68.10.0esr.tar.bz2"
    );
    assert!(plan.local_version.is_none());

    installer.install(&plan).await?;
    Ok(())
}
