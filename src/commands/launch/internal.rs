//! Internal implementation of the launch command.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::ffi::OsStr;
use std::path::{Component, Path};
use tracing::{debug, info};

use super::{LaunchOptions, LaunchReport};
use crate::config::{GithubSettings, Settings};
use crate::forge::{
    CloneProtocol, ForgeWriter, GitHubWriter, RemoteRepo, RepoRequest, Visibility,
    GITIGNORE_TEMPLATE,
};
use crate::git;
use crate::paths;
use crate::scaffold::{Scaffold, GENERATED_FILES};

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial setup from templates";

pub(super) fn execute_launch(options: LaunchOptions) -> Result<LaunchReport> {
    let settings_path = paths::settings_file()?;
    let templates_dir = paths::templates_dir()?;
    info!(
        settings = %settings_path.display(),
        templates = %templates_dir.display(),
        "resolved paperlaunch files"
    );

    let settings = Settings::load(&settings_path)?;
    let base_dir = std::env::current_dir().context("Failed to read current directory")?;

    run_launch(&settings, &options, &base_dir, &templates_dir)
}

pub(super) fn run_launch(
    settings: &Settings,
    options: &LaunchOptions,
    base_dir: &Path,
    templates_dir: &Path,
) -> Result<LaunchReport> {
    launch_with(settings, options, base_dir, templates_dir, connect_github)
}

fn connect_github(github: &GithubSettings) -> Result<Box<dyn ForgeWriter>> {
    let writer = GitHubWriter::new(github.api_url(), github.token()?)?;
    Ok(Box::new(writer))
}

/// The launch itself. `connect` is only called for `--github`.
fn launch_with<F>(
    settings: &Settings,
    options: &LaunchOptions,
    base_dir: &Path,
    templates_dir: &Path,
    connect: F,
) -> Result<LaunchReport>
where
    F: FnOnce(&GithubSettings) -> Result<Box<dyn ForgeWriter>>,
{
    validate_name(&options.name)?;

    let scaffold = Scaffold::new(templates_dir);
    scaffold.verify()?;

    let substitutions = settings.substitutions(&options.name)?;
    let target = base_dir.join(&options.name);
    debug!(target = %target.display(), github = options.github, "launching project");

    let remote = if options.github {
        if !git::is_vacant(&target)? {
            bail!(
                "Target directory already exists and is not empty: {}",
                target.display()
            );
        }

        let writer = connect(&settings.github)?;
        let request = RepoRequest {
            name: options.name.clone(),
            description: settings
                .github
                .description_or(substitutions.title())
                .to_string(),
            gitignore_template: GITIGNORE_TEMPLATE.to_string(),
            visibility: Visibility::from_public_flag(options.public),
            owner: settings.github.owner(),
        };
        Some(provision_remote(
            writer.as_ref(),
            &request,
            settings.github.clone_protocol,
            &target,
        )?)
    } else {
        git::init(&target)?;
        println!(
            "{} Initialized git repository in {}",
            "✓".green(),
            target.display()
        );
        None
    };

    let files = scaffold.materialize(&target, &substitutions)?;
    println!("{} Wrote {} files from templates", "✓".green(), files.len());

    git::add_paths(&target, &GENERATED_FILES)?;
    git::commit(&target, INITIAL_COMMIT_MESSAGE)?;
    let commit = git::head_sha(&target)?;
    println!(
        "{} Committed \"{}\" ({})",
        "✓".green(),
        INITIAL_COMMIT_MESSAGE,
        &commit[..commit.len().min(7)]
    );

    if remote.is_some() {
        println!("  Push with: git -C {} push origin HEAD", target.display());
    }

    Ok(LaunchReport {
        path: target,
        remote,
        commit,
        files,
    })
}

/// Create the hosted repository, then clone it to `target`.
fn provision_remote(
    writer: &dyn ForgeWriter,
    request: &RepoRequest,
    protocol: CloneProtocol,
    target: &Path,
) -> Result<RemoteRepo> {
    let remote = writer.create_repo(request)?;
    let visibility = if remote.private { "private" } else { "public" };
    println!(
        "{} Created {} repository {}",
        "✓".green(),
        visibility,
        remote.html_url.bold()
    );

    let url = remote.clone_url_for(protocol);
    git::clone(url, target)
        .with_context(|| format!("Failed to clone {} into {}", url, target.display()))?;
    println!("{} Cloned into {}", "✓".green(), target.display());

    Ok(remote)
}

/// A project name must be a single directory name.
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == OsStr::new(name) => Ok(()),
        _ => bail!(
            "Invalid project name '{}': expected a single directory name",
            name
        ),
    }
}
