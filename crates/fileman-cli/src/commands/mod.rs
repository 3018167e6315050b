//! CLI command definitions and dispatch.

pub mod account;
pub mod browse;
pub mod config;
pub mod file;
pub mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use fileman_client::DavHttpClient;
use fileman_core::config::AppConfig;
use fileman_core::traits::DavClient;
use fileman_core::types::ResourcePath;
use fileman_core::{AppError, AppResult};
use fileman_service::{
    AccountService, BrowserContext, EntrySelector, FileOperations, FolderLoader, FormService,
    Listing, SessionService, UploadService,
};

use crate::output::OutputFormat;
use crate::view::TerminalView;

/// fileman: browse and manage a WebDAV file store
#[derive(Debug, Parser)]
#[command(name = "fileman", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List a folder
    Ls(browse::LsArgs),
    /// Print the folder tree
    Tree(browse::TreeArgs),
    /// Open a deep link such as `#Documents/Photos/`
    Open(browse::OpenArgs),
    /// Show the context menu of a folder
    Menu(browse::MenuArgs),
    /// Rename a file or folder
    Rename(file::RenameArgs),
    /// Move a file or folder into another folder, optionally renaming it
    Mv(file::MoveArgs),
    /// Delete a file or folder
    Rm(file::RemoveArgs),
    /// Create a folder
    Mkdir(file::MkdirArgs),
    /// Upload local files into a folder
    Upload(file::UploadArgs),
    /// Sign in
    Login(session::LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show storage usage
    Usage,
    /// Account management
    Account(account::AccountArgs),
    /// Submit a form
    Post(account::PostArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Pretty-print an XML file
    FormatXml(config::FormatXmlArgs),
}

impl Cli {
    /// Execute against an already loaded configuration.
    pub async fn execute_with(&self, config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Config(args) => return config::execute(args, &config, self.format),
            Commands::FormatXml(args) => return config::pretty_print_xml(args).await,
            _ => {}
        }

        let mut app = App::connect(&config, self.format, self.yes)?;
        match &self.command {
            Commands::Ls(args) => browse::ls(&mut app, args).await,
            Commands::Tree(args) => browse::tree(&mut app, args).await,
            Commands::Open(args) => browse::open(&mut app, args).await,
            Commands::Menu(args) => browse::menu(&mut app, args).await,
            Commands::Rename(args) => file::rename(&mut app, args).await,
            Commands::Mv(args) => file::move_to(&mut app, args).await,
            Commands::Rm(args) => file::remove(&mut app, args).await,
            Commands::Mkdir(args) => file::mkdir(&mut app, args).await,
            Commands::Upload(args) => file::upload(&mut app, args, &config).await,
            Commands::Login(args) => session::login(&mut app, args).await,
            Commands::Logout => session::logout(&mut app).await,
            Commands::Whoami => session::whoami(&mut app),
            Commands::Usage => account::usage(&mut app).await,
            Commands::Account(args) => account::execute(&mut app, args).await,
            Commands::Post(args) => account::post(&mut app, args).await,
            Commands::Config(_) | Commands::FormatXml(_) => Ok(()),
        }
    }
}

/// Everything a command needs: the client, the services, the browser state
/// and the terminal view.
#[derive(Debug)]
pub struct App {
    pub client: Arc<DavHttpClient>,
    pub ctx: BrowserContext,
    pub view: TerminalView,
    pub format: OutputFormat,
    pub loader: FolderLoader,
    pub files: FileOperations,
    pub uploads: UploadService,
    pub selector: EntrySelector,
    pub session: SessionService,
    pub forms: FormService,
    pub account: AccountService,
}

impl App {
    /// Wire the services around one HTTP client.
    pub fn connect(config: &AppConfig, format: OutputFormat, assume_yes: bool) -> AppResult<Self> {
        let client = Arc::new(DavHttpClient::new(config)?);
        let dav: Arc<dyn DavClient> = client.clone();
        let loader = FolderLoader::new(Arc::clone(&dav));

        let mut ctx = BrowserContext::new(&config.account);
        let session = SessionService::new(Arc::clone(&dav), config.session.clone());
        session.refresh_user(&mut ctx);

        Ok(Self {
            client,
            ctx,
            view: TerminalView::new(format, assume_yes, config.account.root.as_str()),
            format,
            files: FileOperations::new(Arc::clone(&dav), loader.clone()),
            uploads: UploadService::new(Arc::clone(&dav), loader.clone(), config.upload.clone()),
            selector: EntrySelector::new(loader.clone()),
            forms: FormService::new(Arc::clone(&dav)),
            account: AccountService::new(dav),
            session,
            loader,
        })
    }

    /// Load `folder` without printing it.
    pub async fn load_quietly(&mut self, folder: &ResourcePath) -> AppResult<Listing> {
        self.view.show_listing = false;
        let result = self.loader.load(&mut self.ctx, &mut self.view, folder).await;
        self.view.show_listing = true;
        result
    }

    /// Find `path` in its parent's listing, returning it in the server's
    /// folder/file form. The parent becomes the current folder.
    pub async fn locate(&mut self, path: &str) -> AppResult<ResourcePath> {
        let wanted = ResourcePath::new(path);
        if wanted.is_root() {
            return Err(AppError::validation("The account root cannot be changed"));
        }
        let listing = self.load_quietly(&wanted.parent()).await?;

        let root = self.ctx.account_root().to_string();
        listing
            .entries
            .iter()
            .find(|entry| entry.name == wanted.name())
            .map(|entry| entry.path(&root))
            .ok_or_else(|| AppError::not_found(format!("'{path}' not found")))
    }
}
