//! Integration tests for file operations and uploads.

mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::json;

use fileman_core::ErrorKind;
use fileman_core::config::UploadMode;
use fileman_core::types::{ResourcePath, UploadFile};
use fileman_service::{FileOperations, FolderLoader, RenameOutcome, UploadService};

use helpers::{CollectingView, Reply, TestServer, dir, file};

fn docs(server: &TestServer) {
    server.listing(
        "/files/Docs/",
        None,
        vec![
            dir("Photos", "/files/Docs/Photos/"),
            file("report.txt", "/files/Docs/report.txt", 42),
        ],
    );
}

#[tokio::test]
async fn test_rename_file_posts_move() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(Method::POST, "/files/Docs/report.txt/_DAV/MOVE", Reply::status(StatusCode::OK));
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let outcome = ops
        .rename(&mut ctx, &mut view, &ResourcePath::new("Docs/report.txt"), "summary.txt")
        .await
        .expect("rename");

    assert_eq!(
        outcome,
        RenameOutcome::Renamed(ResourcePath::new("Docs/summary.txt"))
    );
    let moves = server.mutations();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].body, "destination=%2Ffiles%2FDocs%2Fsummary.txt");
    assert_eq!(
        view.renamed,
        [("Docs/report.txt".to_string(), "Docs/summary.txt".to_string())]
    );
}

#[tokio::test]
async fn test_rename_folder_repoints_ids() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(Method::POST, "/files/Docs/Photos/_DAV/MOVE", Reply::status(StatusCode::OK));
    let config = server.config();
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let ops = FileOperations::new(dav, loader.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let listing = loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let id = listing.folders[0].id;

    ops.rename(&mut ctx, &mut view, &ResourcePath::folder("Docs/Photos"), "Pictures")
        .await
        .expect("rename");

    assert_eq!(
        ctx.registry.resolve(id).map(ResourcePath::as_str),
        Some("Docs/Pictures/")
    );
    assert_eq!(ctx.registry.resolve_id("Docs/Photos/"), None);
}

#[tokio::test]
async fn test_unchanged_rename_sends_nothing() {
    let server = TestServer::start().await;
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let path = ResourcePath::new("Docs/report.txt");
    for name in ["report.txt", "  ", ""] {
        let outcome = ops.rename(&mut ctx, &mut view, &path, name).await.expect("rename");
        assert_eq!(outcome, RenameOutcome::Unchanged);
    }
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_failed_rename_leaves_registry_alone() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(
        Method::POST,
        "/files/Docs/Photos/_DAV/MOVE",
        Reply::status(StatusCode::CONFLICT),
    );
    let config = server.config();
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let ops = FileOperations::new(dav, loader.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let err = ops
        .rename(&mut ctx, &mut view, &ResourcePath::folder("Docs/Photos"), "Pictures")
        .await
        .expect_err("conflict");

    assert_eq!(err.status, Some(409));
    assert!(ctx.registry.resolve_id("Docs/Photos/").is_some());
    assert!(view.renamed.is_empty());
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let server = TestServer::start().await;
    server.on(Method::DELETE, "/files/Docs/report.txt", Reply::status(StatusCode::NO_CONTENT));
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let path = ResourcePath::new("Docs/report.txt");

    let mut declining = CollectingView {
        confirm_answer: false,
        ..CollectingView::default()
    };
    let deleted = ops.delete(&mut ctx, &mut declining, &path).await.expect("declined");
    assert!(!deleted);
    assert!(server.requests().is_empty());

    let mut view = CollectingView::default();
    let deleted = ops.delete(&mut ctx, &mut view, &path).await.expect("delete");
    assert!(deleted);
    assert_eq!(server.requests()[0].method, "DELETE");
    assert_eq!(view.removed, ["Docs/report.txt"]);
}

#[tokio::test]
async fn test_create_folder_refreshes_listing() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(Method::POST, "/files/Docs/_DAV/MKCOL", Reply::status(StatusCode::CREATED));
    let config = server.config();
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let ops = FileOperations::new(dav, loader.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let created = ops
        .create_folder(&mut ctx, &mut view, "New")
        .await
        .expect("mkdir");

    assert_eq!(created.as_str(), "Docs/New/");
    let mkcol = &server.mutations()[0];
    assert_eq!(mkcol.body, "name=New");
    assert_eq!(server.listed(), ["/files/Docs/", "/files/Docs/"]);
}

#[tokio::test]
async fn test_move_into_other_folder() {
    let server = TestServer::start().await;
    server.on(Method::POST, "/files/Docs/report.txt/_DAV/MOVE", Reply::status(StatusCode::OK));
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let target = ops
        .move_into(
            &mut ctx,
            &mut view,
            &ResourcePath::new("Docs/report.txt"),
            &ResourcePath::folder("Archive"),
        )
        .await
        .expect("move");

    assert_eq!(target.as_str(), "Archive/report.txt");
    assert_eq!(
        server.mutations()[0].body,
        "destination=%2Ffiles%2FArchive%2Freport.txt"
    );
}

#[tokio::test]
async fn test_move_and_rename_in_one_request() {
    let server = TestServer::start().await;
    server.on(Method::POST, "/files/Docs/report.txt/_DAV/MOVE", Reply::status(StatusCode::OK));
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let target = ops
        .move_to(
            &mut ctx,
            &mut view,
            &ResourcePath::new("Docs/report.txt"),
            &ResourcePath::new("Archive/report-2020.txt"),
        )
        .await
        .expect("move");

    assert_eq!(target.as_str(), "Archive/report-2020.txt");
    assert_eq!(
        server.mutations()[0].body,
        "destination=%2Ffiles%2FArchive%2Freport-2020.txt"
    );
    assert_eq!(
        view.renamed,
        [("Docs/report.txt".to_string(), "Archive/report-2020.txt".to_string())]
    );
}

#[tokio::test]
async fn test_move_name_with_hash() {
    let server = TestServer::start().await;
    server.on(
        Method::POST,
        "/files/Docs/Issue%20%2312.pdf/_DAV/MOVE",
        Reply::status(StatusCode::OK),
    );
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let target = ops
        .move_into(
            &mut ctx,
            &mut view,
            &ResourcePath::new("Docs/Issue #12.pdf"),
            &ResourcePath::folder("Archive"),
        )
        .await
        .expect("move");

    assert_eq!(target.as_str(), "Archive/Issue #12.pdf");
    assert_eq!(
        server.mutations()[0].body,
        "destination=%2Ffiles%2FArchive%2FIssue+%2312.pdf"
    );
}

#[tokio::test]
async fn test_rejected_move_is_an_error() {
    let server = TestServer::start().await;
    server.on(
        Method::POST,
        "/files/Docs/report.txt/_DAV/MOVE",
        Reply::json(json!({ "status": false, "messages": ["File is locked"] })),
    );
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let id = ctx.registry.assign("Docs/report.txt");
    let mut view = CollectingView::default();

    let err = ops
        .rename(&mut ctx, &mut view, &ResourcePath::new("Docs/report.txt"), "summary.txt")
        .await
        .expect_err("rejected");

    assert_eq!(err.kind, ErrorKind::Rejected);
    assert_eq!(err.message, "File is locked");
    assert!(view.notices.iter().any(|n| n.is_error()));
    assert!(view.renamed.is_empty());
    assert_eq!(
        ctx.registry.resolve(id).map(ResourcePath::as_str),
        Some("Docs/report.txt")
    );
}

#[tokio::test]
async fn test_rejected_mkcol_skips_refresh() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(
        Method::POST,
        "/files/Docs/_DAV/MKCOL",
        Reply::json(json!({ "status": false })),
    );
    let config = server.config();
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let ops = FileOperations::new(dav, loader.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let err = ops
        .create_folder(&mut ctx, &mut view, "New")
        .await
        .expect_err("rejected");

    assert_eq!(err.kind, ErrorKind::Rejected);
    assert_eq!(server.listed(), ["/files/Docs/"]);
    assert!(view.notices.iter().any(|n| n.is_error()));
}

#[tokio::test]
async fn test_rejected_delete_keeps_row() {
    let server = TestServer::start().await;
    server.on(
        Method::DELETE,
        "/files/Docs/report.txt",
        Reply::json(json!({ "status": false })),
    );
    let config = server.config();
    let dav = server.client(&config);
    let ops = FileOperations::new(dav.clone(), FolderLoader::new(dav));
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    let err = ops
        .delete(&mut ctx, &mut view, &ResourcePath::new("Docs/report.txt"))
        .await
        .expect_err("rejected");

    assert_eq!(err.kind, ErrorKind::Rejected);
    assert!(view.removed.is_empty());
}

#[tokio::test]
async fn test_upload_continues_after_sibling_failure() {
    let server = TestServer::start().await;
    docs(&server);
    server.on_body(
        Method::POST,
        "/files/Docs/_DAV/PUT",
        "filename=\"bad.bin\"",
        Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
    );
    server.on(
        Method::POST,
        "/files/Docs/_DAV/PUT",
        Reply::json(json!([{ "href": "", "name": null }])),
    );
    let config = server.config();
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let uploads = UploadService::new(dav, loader.clone(), config.upload.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let report = uploads
        .upload(
            &mut ctx,
            &mut view,
            vec![
                UploadFile::new("a.txt", &b"hello"[..]),
                UploadFile::new("bad.bin", &b"xx"[..]),
                UploadFile::new("c.txt", &b"world"[..]),
            ],
        )
        .await
        .expect("upload");

    assert_eq!(report.uploaded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "bad.bin");
    assert!(report.uploaded.iter().any(|r| r.href == "/files/Docs/a.txt"));

    let puts: Vec<_> = server
        .mutations()
        .into_iter()
        .filter(|r| r.path == "/files/Docs/_DAV/PUT")
        .collect();
    assert_eq!(puts.len(), 3);
    assert!(puts.iter().all(|r| r.query == "overwrite=true"));
    assert!(puts[0].body.contains("name=\"files[]\""));
    assert!(puts[0].body.contains("name=\"overwrite\""));
    assert!(view.progress.iter().any(|p| p.file_name == "a.txt" && p.sent == 5));
    assert_eq!(server.listed().len(), 2);
}

#[tokio::test]
async fn test_raw_upload_puts_file() {
    let server = TestServer::start().await;
    docs(&server);
    server.on(Method::PUT, "/files/Docs/notes.txt", Reply::status(StatusCode::CREATED));
    let mut config = server.config();
    config.upload.mode = UploadMode::Raw;
    let dav = server.client(&config);
    let loader = FolderLoader::new(dav.clone());
    let uploads = UploadService::new(dav, loader.clone(), config.upload.clone());
    let mut ctx = server.context(&config);
    let mut view = CollectingView::default();

    loader
        .load(&mut ctx, &mut view, &ResourcePath::folder("Docs"))
        .await
        .expect("load");
    let report = uploads
        .upload(&mut ctx, &mut view, vec![UploadFile::new("notes.txt", &b"hi there"[..])])
        .await
        .expect("upload");

    assert!(report.is_complete());
    let put = server
        .mutations()
        .into_iter()
        .find(|r| r.method == "PUT")
        .expect("put request");
    assert_eq!(put.body, "hi there");
    assert_eq!(
        put.headers.get("x-filename").and_then(|v| v.to_str().ok()),
        Some("notes.txt")
    );
}
