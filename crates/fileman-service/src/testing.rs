//! In-memory DAV server and recording view for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use fileman_core::config::UploadMode;
use fileman_core::traits::{BrowserView, DavClient, Notice, ProgressCallback};
use fileman_core::types::{
    FileEntry, FormResponse, LoginResponse, NodeId, PropPatchFailure, Quota, ResourcePath,
    TreeNode, UploadFile, UploadProgress, UploadedResource,
};
use fileman_core::{AppError, AppResult};

/// One request seen by [`MemoryDav`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Quota(String),
    Move { href: String, destination: String },
    MakeCollection { folder: String, name: String },
    Delete(String),
    Upload { folder: String, name: String, mode: UploadMode },
    Login(String),
    Logout,
    Form(String),
    PropPatch(String),
}

/// A scripted DAV server.
#[derive(Debug, Default)]
pub struct MemoryDav {
    listings: Mutex<HashMap<String, Vec<FileEntry>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    cookie: Mutex<Option<String>>,
    pub login_response: Mutex<LoginResponse>,
    pub form_response: Mutex<FormResponse>,
    pub prop_patch_failures: Mutex<Vec<PropPatchFailure>>,
    pub quota: Mutex<Quota>,
}

impl MemoryDav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `children` below `href`, with the folder row prepended.
    pub fn folder(&self, href: &str, template: Option<&str>, children: Vec<FileEntry>) {
        let mut rows = vec![FileEntry {
            name: fileman_core::types::path::file_name(href).to_string(),
            href: href.to_string(),
            is_collection: true,
            template_name: template.map(str::to_string),
            ..FileEntry::default()
        }];
        rows.extend(children);
        self.listings.lock().expect("lock").insert(href.to_string(), rows);
    }

    /// Fail every request addressed to `href` (or uploading a file named `href`).
    pub fn fail(&self, href: &str) {
        self.failing.lock().expect("lock").insert(href.to_string());
    }

    pub fn set_cookie(&self, value: Option<&str>) {
        *self.cookie.lock().expect("lock") = value.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn listed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(href) => Some(href),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }

    fn check(&self, key: &str) -> AppResult<()> {
        if self.failing.lock().expect("lock").contains(key) {
            Err(AppError::http_status(500, format!("{key} failed")))
        } else {
            Ok(())
        }
    }
}

pub fn dir(name: &str, href: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        href: href.to_string(),
        is_collection: true,
        ..FileEntry::default()
    }
}

pub fn file(name: &str, href: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        href: href.to_string(),
        ..FileEntry::default()
    }
}

#[async_trait]
impl DavClient for MemoryDav {
    async fn list(&self, folder_href: &str) -> AppResult<Vec<FileEntry>> {
        self.record(Call::List(folder_href.to_string()));
        self.check(folder_href)?;
        self.listings
            .lock()
            .expect("lock")
            .get(folder_href)
            .cloned()
            .ok_or_else(|| AppError::http_status(404, format!("{folder_href} not found")))
    }

    async fn quota(&self, href: &str) -> AppResult<Quota> {
        self.record(Call::Quota(href.to_string()));
        self.check(href)?;
        Ok(*self.quota.lock().expect("lock"))
    }

    async fn move_resource(&self, href: &str, destination: &str) -> AppResult<()> {
        self.record(Call::Move {
            href: href.to_string(),
            destination: destination.to_string(),
        });
        self.check(href)
    }

    async fn make_collection(&self, folder_href: &str, name: &str) -> AppResult<()> {
        self.record(Call::MakeCollection {
            folder: folder_href.to_string(),
            name: name.to_string(),
        });
        self.check(folder_href)
    }

    async fn delete(&self, href: &str) -> AppResult<()> {
        self.record(Call::Delete(href.to_string()));
        self.check(href)
    }

    async fn upload(
        &self,
        folder_href: &str,
        file: UploadFile,
        mode: UploadMode,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource> {
        self.record(Call::Upload {
            folder: folder_href.to_string(),
            name: file.name.clone(),
            mode,
        });
        self.check(&file.name)?;
        progress(UploadProgress {
            file_name: file.name.clone(),
            sent: file.len(),
            total: file.len(),
        });
        Ok(UploadedResource {
            href: format!("{folder_href}{}", file.name),
            name: Some(file.name),
        })
    }

    async fn login(&self, user_name: &str, _password: &str) -> AppResult<LoginResponse> {
        self.record(Call::Login(user_name.to_string()));
        self.check("login")?;
        Ok(self.login_response.lock().expect("lock").clone())
    }

    async fn logout(&self) -> AppResult<()> {
        self.record(Call::Logout);
        self.set_cookie(None);
        Ok(())
    }

    fn session_cookie(&self) -> Option<String> {
        self.cookie.lock().expect("lock").clone()
    }

    async fn submit_form(&self, url: &str, _fields: &[(String, String)]) -> AppResult<FormResponse> {
        self.record(Call::Form(url.to_string()));
        self.check(url)?;
        Ok(self.form_response.lock().expect("lock").clone())
    }

    async fn prop_patch(
        &self,
        href: &str,
        _properties: &[(String, String)],
    ) -> AppResult<Vec<PropPatchFailure>> {
        self.record(Call::PropPatch(href.to_string()));
        self.check(href)?;
        Ok(self.prop_patch_failures.lock().expect("lock").clone())
    }
}

/// What the services asked the view to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Children(Option<NodeId>, Vec<String>),
    Listing(String, Vec<String>),
    Highlight(Option<NodeId>, String),
    Fragment(String),
    Renamed(String, String),
    Removed(String),
    Preview(String),
    Progress(UploadProgress),
    Notice(Notice),
}

/// A view that records every call.
#[derive(Debug)]
pub struct RecordingView {
    pub shown: Vec<Shown>,
    pub confirm_answer: bool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            shown: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl RecordingView {
    pub fn notices(&self) -> Vec<&Notice> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn last_listing(&self) -> Option<(&str, &[String])> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Listing(folder, names) => Some((folder.as_str(), names.as_slice())),
            _ => None,
        })
    }
}

impl BrowserView for RecordingView {
    fn render_children(&mut self, parent: Option<NodeId>, children: &[TreeNode]) {
        let names = children.iter().map(|c| c.name.clone()).collect();
        self.shown.push(Shown::Children(parent, names));
    }

    fn render_listing(&mut self, folder: &ResourcePath, entries: &[FileEntry]) {
        let names = entries.iter().map(|e| e.name.clone()).collect();
        self.shown.push(Shown::Listing(folder.to_string(), names));
    }

    fn highlight(&mut self, node: Option<NodeId>, folder: &ResourcePath) {
        self.shown.push(Shown::Highlight(node, folder.to_string()));
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.shown.push(Shown::Fragment(fragment.to_string()));
    }

    fn rename_row(&mut self, from: &ResourcePath, to: &ResourcePath) {
        self.shown.push(Shown::Renamed(from.to_string(), to.to_string()));
    }

    fn remove_row(&mut self, path: &ResourcePath) {
        self.shown.push(Shown::Removed(path.to_string()));
    }

    fn open_preview(&mut self, url: &str) {
        self.shown.push(Shown::Preview(url.to_string()));
    }

    fn upload_progress(&mut self, progress: &UploadProgress) {
        self.shown.push(Shown::Progress(progress.clone()));
    }

    fn notice(&mut self, notice: Notice) {
        self.shown.push(Shown::Notice(notice));
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirm_answer
    }
}
