//! Walks a deep link (`#a/b/c/`) down the lazily loaded folder tree.
//!
//! Each step expands one more path segment so the tree shows the whole
//! chain, then the final folder is loaded into the grid. A segment that is
//! not in the tree stops the walk and the deepest folder reached is opened
//! instead.

use tracing::{debug, warn};

use fileman_core::traits::{BrowserView, Notice};
use fileman_core::types::ResourcePath;
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;
use crate::folder::loader::{FolderLoader, Listing};

/// Where the opener is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenerState {
    /// Not started.
    Idle,
    /// About to expand segment `i`.
    ExpandingSegment(usize),
    /// Walk finished; the folder has been (or is about to be) loaded.
    Done,
}

/// Result of a completed walk.
#[derive(Debug, Clone)]
pub struct OpenOutcome {
    /// Folder that ended up open.
    pub opened: ResourcePath,
    /// Number of expansion steps performed.
    pub steps: usize,
    /// Whether the walk stopped short of the requested path.
    pub fell_back: bool,
    /// The listing of the opened folder.
    pub listing: Listing,
}

/// One-shot deep-link opener.
#[derive(Debug)]
pub struct InitialPathOpener {
    loader: FolderLoader,
    state: OpenerState,
    segments: Vec<String>,
    cumulative: ResourcePath,
    steps: usize,
    stopped_at: Option<String>,
}

impl InitialPathOpener {
    /// Creates an idle opener.
    pub fn new(loader: FolderLoader) -> Self {
        Self {
            loader,
            state: OpenerState::Idle,
            segments: Vec::new(),
            cumulative: ResourcePath::root(),
            steps: 0,
            stopped_at: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> OpenerState {
        self.state
    }

    /// Deepest folder resolved so far.
    pub fn cumulative(&self) -> &ResourcePath {
        &self.cumulative
    }

    /// Begin a walk for `fragment`. A leading `#` or `/` is ignored.
    pub fn start(&mut self, fragment: &str) -> AppResult<()> {
        if self.state != OpenerState::Idle {
            return Err(AppError::validation("Initial path has already been opened"));
        }
        let path = fragment.trim_start_matches('#').trim_start_matches('/');
        self.segments = path.split('/').map(str::to_string).collect();
        self.state = OpenerState::ExpandingSegment(0);
        debug!(fragment = path, segments = self.segments.len(), "Opening initial path");
        Ok(())
    }

    /// Perform one transition and return the new state.
    pub async fn step(
        &mut self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
    ) -> AppResult<OpenerState> {
        let OpenerState::ExpandingSegment(i) = self.state else {
            return Ok(self.state);
        };

        let segment = match self.segments.get(i) {
            Some(s) if !s.is_empty() => s.clone(),
            _ => {
                self.state = OpenerState::Done;
                return Ok(self.state);
            }
        };

        let candidate = self.cumulative.child_folder(&segment);
        let Some(node) = ctx.registry.resolve_id(candidate.as_str()) else {
            warn!(path = %candidate, "Initial path segment is not in the tree");
            self.stop(candidate);
            return Ok(self.state);
        };

        if let Err(e) = self.loader.expand(ctx, view, node).await {
            warn!(path = %candidate, error = %e, "Initial path segment failed to expand");
            self.stop(candidate);
            return Ok(self.state);
        }

        self.steps += 1;
        self.cumulative = candidate;
        self.state = if i + 1 >= self.segments.len() {
            OpenerState::Done
        } else {
            OpenerState::ExpandingSegment(i + 1)
        };
        Ok(self.state)
    }

    /// Run a whole walk for `fragment` and load the folder it ends on.
    ///
    /// The account root must already be expanded so first-level folders
    /// have node ids.
    pub async fn run(
        &mut self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        fragment: &str,
    ) -> AppResult<OpenOutcome> {
        self.start(fragment)?;
        while self.step(ctx, view).await? != OpenerState::Done {}

        if let Some(missing) = &self.stopped_at {
            let target = if self.cumulative.is_root() {
                "the top folder".to_string()
            } else {
                format!("'{}'", self.cumulative)
            };
            view.notice(Notice::Warning(format!(
                "Folder '{missing}' could not be found, showing {target} instead"
            )));
        }

        let listing = self.loader.load(ctx, view, &self.cumulative).await?;
        Ok(OpenOutcome {
            opened: self.cumulative.clone(),
            steps: self.steps,
            fell_back: self.stopped_at.is_some(),
            listing,
        })
    }

    fn stop(&mut self, missing: ResourcePath) {
        self.stopped_at = Some(missing.to_string());
        self.state = OpenerState::Done;
    }
}
