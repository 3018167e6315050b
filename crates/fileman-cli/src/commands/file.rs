//! File and folder mutation commands.

use std::path::PathBuf;

use clap::Args;

use fileman_core::config::{AppConfig, UploadMode};
use fileman_core::types::{ResourcePath, UploadFile};
use fileman_core::{AppError, AppResult};
use fileman_service::RenameOutcome;

use super::App;
use crate::output;

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// File or folder relative to the account root
    pub path: String,
    /// New name
    pub name: String,
}

/// Arguments for `mv`
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// File or folder relative to the account root
    pub source: String,
    /// Destination folder relative to the account root
    pub destination: String,
    /// Give the resource a new name in the destination folder
    #[arg(long = "as", value_name = "NAME")]
    pub new_name: Option<String>,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// File or folder relative to the account root
    pub path: String,
}

/// Arguments for `mkdir`
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Parent folder relative to the account root
    pub parent: String,
    /// Name of the new folder
    pub name: String,
}

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Destination folder relative to the account root
    pub folder: String,
    /// Local files to send
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Override the configured upload mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Upload mode choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Replace files with the same name
    Overwrite,
    /// Let the server pick a free name
    Autoname,
    /// Stream each file with a plain PUT
    Raw,
}

impl From<ModeArg> for UploadMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Overwrite => Self::Overwrite,
            ModeArg::Autoname => Self::Autoname,
            ModeArg::Raw => Self::Raw,
        }
    }
}

/// Rename a file or folder.
pub async fn rename(app: &mut App, args: &RenameArgs) -> AppResult<()> {
    let path = app.locate(&args.path).await?;
    match app
        .files
        .rename(&mut app.ctx, &mut app.view, &path, &args.name)
        .await?
    {
        RenameOutcome::Unchanged => output::print_warning("Name unchanged, nothing to do"),
        RenameOutcome::Renamed(_) => {}
    }
    Ok(())
}

/// Move a file or folder into another folder, optionally renaming it, then
/// show the refreshed source folder.
pub async fn move_to(app: &mut App, args: &MoveArgs) -> AppResult<()> {
    let source = app.locate(&args.source).await?;
    let folder = ResourcePath::folder(args.destination.as_str());
    match &args.new_name {
        Some(name) => {
            let destination = folder.child_file(name.trim());
            app.files
                .move_to(&mut app.ctx, &mut app.view, &source, &destination)
                .await?
        }
        None => {
            app.files
                .move_into(&mut app.ctx, &mut app.view, &source, &folder)
                .await?
        }
    };
    app.loader.refresh(&mut app.ctx, &mut app.view).await?;
    Ok(())
}

/// Delete a file or folder after confirmation.
pub async fn remove(app: &mut App, args: &RemoveArgs) -> AppResult<()> {
    let path = app.locate(&args.path).await?;
    let deleted = app.files.delete(&mut app.ctx, &mut app.view, &path).await?;
    if !deleted {
        output::print_warning("Cancelled");
    }
    Ok(())
}

/// Create a folder and show the refreshed parent.
pub async fn mkdir(app: &mut App, args: &MkdirArgs) -> AppResult<()> {
    app.load_quietly(&ResourcePath::folder(args.parent.as_str()))
        .await?;
    let created = app
        .files
        .create_folder(&mut app.ctx, &mut app.view, &args.name)
        .await?;
    output::print_success(&format!("Created '{created}'"));
    Ok(())
}

/// Read local files and upload them into a folder.
pub async fn upload(app: &mut App, args: &UploadArgs, config: &AppConfig) -> AppResult<()> {
    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation(format!("'{}' has no file name", path.display())))?;
        let data = tokio::fs::read(path).await?;
        files.push(UploadFile::new(name, data));
    }

    app.load_quietly(&ResourcePath::folder(args.folder.as_str()))
        .await?;

    let uploads = match args.mode {
        Some(mode) => {
            let mut upload = config.upload.clone();
            upload.mode = mode.into();
            fileman_service::UploadService::new(
                app.client.clone(),
                app.loader.clone(),
                upload,
            )
        }
        None => app.uploads.clone(),
    };

    let report = uploads.upload(&mut app.ctx, &mut app.view, files).await?;
    output::print_kv("Uploaded", &report.uploaded.len().to_string());
    if !report.is_complete() {
        return Err(AppError::internal(format!(
            "{} of {} uploads failed",
            report.failed.len(),
            args.files.len()
        )));
    }
    Ok(())
}
