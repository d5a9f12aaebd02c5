use std::{path::Path, process::ExitCode, sync::Arc};

use anyhow::Context;
use glazed_core::{
    app::App,
    configs::Settings,
    fs::write_toml_config,
    game_paths::ModsLocation,
    installer::InstallRequest,
    manifest::Manifest,
    presenter::Presenter,
    version_store::VersionStore,
    INSTALLER_NAME,
};
use tracing::info;

use crate::{
    args::{Cli, Command},
    presenter::TerminalPresenter,
};

pub async fn process_args(args: &Cli) -> anyhow::Result<ExitCode> {
    let mut settings = Settings::load(&args.config).await?;
    if let Some(dir) = &args.mods_dir {
        settings.mods_dir = Some(dir.clone());
    }

    match &args.command {
        Command::Versions => versions(&settings),
        Command::Check => check(settings).await,
        Command::Install {
            target,
            yes,
            no_update_check,
        } => install(settings, target, *yes, !no_update_check).await,
        Command::Status => status(&settings),
        Command::InitConfig => init_config(&args.config).await,
    }
}

pub fn versions(settings: &Settings) -> anyhow::Result<ExitCode> {
    let manifest = settings.manifest.clone().map_or_else(Manifest::builtin, Arc::new);

    for target in manifest.targets() {
        println!("{target}");
    }

    Ok(ExitCode::SUCCESS)
}

pub async fn check(settings: Settings) -> anyhow::Result<ExitCode> {
    let mut app = App::from_settings(TerminalPresenter::new(false), settings)?;

    let task = app.check_for_updates(true);
    app.settle(task).await;

    Ok(ExitCode::SUCCESS)
}

pub async fn install(settings: Settings, target: &str, assume_yes: bool, update_check: bool) -> anyhow::Result<ExitCode> {
    let presenter = TerminalPresenter::new(assume_yes);
    if !presenter.confirm(&format!("Install {INSTALLER_NAME} for Minecraft {target}?")) {
        info!("Installation cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let mut app = App::from_settings(presenter, settings)?;

    let result = app
        .install_after_startup_check(&InstallRequest::new(target), update_check)
        .await;

    // The presenter has already shown the outcome.
    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

pub fn status(settings: &Settings) -> anyhow::Result<ExitCode> {
    let store = VersionStore::new(settings.marker_file.clone().unwrap_or_else(VersionStore::default_path));
    let record = store.read();

    let target = match record.target_version.as_str() {
        "" => "none",
        target => target,
    };
    println!("Installer version: {}", record.tool_version);
    println!("Minecraft version: {target}");
    println!("Marker file: {}", store.path().display());

    match ModsLocation::from_override(settings.mods_dir.clone()).resolve() {
        Some(dir) => println!("Mods folder: {}", dir.display()),
        None => println!("Mods folder: not found"),
    }

    Ok(ExitCode::SUCCESS)
}

pub async fn init_config(path: &Path) -> anyhow::Result<ExitCode> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        anyhow::bail!("{} already exists", path.display());
    }

    write_toml_config(&Settings::default(), path)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;

    Ok(ExitCode::SUCCESS)
}
