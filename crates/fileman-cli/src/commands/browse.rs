//! Browsing commands: listings, the tree, deep links and menus.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fileman_core::types::{ResourcePath, TreeNode};
use fileman_core::{AppError, AppResult};
use fileman_service::menu::{MenuAction, OpenMode, node_menu};
use fileman_service::InitialPathOpener;

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder relative to the account root
    #[arg(default_value = "")]
    pub path: String,
}

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Levels to expand
    #[arg(short, long, default_value_t = 2)]
    pub depth: usize,
}

/// Arguments for `open`
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Location fragment, e.g. `#Documents/Photos/`
    #[arg(default_value = "")]
    pub fragment: String,
    /// Select this entry of the opened folder
    #[arg(short, long)]
    pub entry: Option<String>,
    /// Open the selected entry for editing
    #[arg(long, requires = "entry")]
    pub edit: bool,
}

/// Arguments for `menu`
#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Folder relative to the account root
    pub path: String,
}

/// Tree row for table output
#[derive(Debug, Serialize, Tabled)]
struct TreeRow {
    /// Indented folder name
    folder: String,
    /// Node id
    id: String,
    /// Path relative to the account root
    path: String,
}

/// Context-menu row for table output
#[derive(Debug, Serialize, Tabled)]
struct MenuRow {
    /// Action
    action: String,
    /// Template, for new pages
    template: String,
    /// URL, for new pages
    url: String,
}

/// List a folder.
pub async fn ls(app: &mut App, args: &LsArgs) -> AppResult<()> {
    let folder = ResourcePath::folder(args.path.as_str());
    app.loader.load(&mut app.ctx, &mut app.view, &folder).await?;
    Ok(())
}

/// Print the folder tree down to `depth` levels.
pub async fn tree(app: &mut App, args: &TreeArgs) -> AppResult<()> {
    let top = app.loader.expand_root(&mut app.ctx, &mut app.view).await?;
    let mut stack: Vec<(TreeNode, usize)> = top.into_iter().rev().map(|n| (n, 0)).collect();
    let mut rows = Vec::new();

    while let Some((node, depth)) = stack.pop() {
        if depth + 1 < args.depth {
            // A failed level is reported by the loader; keep walking its siblings.
            if let Ok(children) = app.loader.expand(&mut app.ctx, &mut app.view, node.id).await {
                stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
            }
        }
        rows.push(TreeRow {
            folder: format!("{}{}/", "  ".repeat(depth), node.name),
            id: node.id.to_string(),
            path: node.path.to_string(),
        });
    }

    output::print_list(&rows, app.format);
    Ok(())
}

/// Walk a deep link, then optionally select one of its entries.
pub async fn open(app: &mut App, args: &OpenArgs) -> AppResult<()> {
    app.loader.expand_root(&mut app.ctx, &mut app.view).await?;
    let mut opener = InitialPathOpener::new(app.loader.clone());
    let outcome = opener.run(&mut app.ctx, &mut app.view, &args.fragment).await?;
    if app.format == OutputFormat::Table {
        output::print_kv("Opened", &format!("/{}", outcome.opened));
        output::print_kv("Steps", &outcome.steps.to_string());
    }

    let Some(name) = &args.entry else {
        return Ok(());
    };
    let entry = outcome
        .listing
        .entries
        .iter()
        .find(|e| &e.name == name)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("'{name}' is not in /{}", outcome.opened)))?;
    let mode = if args.edit { OpenMode::Edit } else { OpenMode::View };
    app.selector
        .select(&mut app.ctx, &mut app.view, &entry, mode)
        .await
}

/// Show the context menu of a folder.
pub async fn menu(app: &mut App, args: &MenuArgs) -> AppResult<()> {
    let path = ResourcePath::folder(args.path.as_str());
    if path.is_root() {
        return Err(AppError::validation("The account root has no menu"));
    }
    let listing = app.load_quietly(&path.parent()).await?;
    let node = listing
        .folders
        .iter()
        .find(|n| n.path == path)
        .ok_or_else(|| AppError::not_found(format!("Folder '{path}' not found")))?;

    let mut rows = Vec::new();
    for action in node_menu(&app.ctx, node) {
        match action {
            MenuAction::Delete => rows.push(MenuRow::plain("delete")),
            MenuAction::Refresh => rows.push(MenuRow::plain("refresh")),
            MenuAction::Add(links) => rows.extend(links.into_iter().map(|link| MenuRow {
                action: "add".to_string(),
                template: link.template,
                url: link.url,
            })),
        }
    }
    output::print_list(&rows, app.format);
    Ok(())
}

impl MenuRow {
    fn plain(action: &str) -> Self {
        Self {
            action: action.to_string(),
            template: String::new(),
            url: String::new(),
        }
    }
}
