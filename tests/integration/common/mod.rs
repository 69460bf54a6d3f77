//! Shared helpers for the integration tests.
//!
//! Test PDFs are generated on the fly. Every page carries a `Marker` name
//! such as `A2` (document label plus page number) so tests can check page
//! order in a merged result.

use std::path::{Path, PathBuf};

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use lopdf::{Document, Object, Stream, dictionary};
use tempfile::TempDir;

use pdfmerge::config::Config;
use pdfmerge::server::{AppState, router};

/// A running test server over a temporary workspace root.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    _root: TempDir,
}

impl TestApp {
    /// Directory holding uploaded parts.
    pub fn uploads_dir(&self) -> PathBuf {
        self.state.workspace.uploads_dir()
    }

    /// Directory holding merged outputs.
    pub fn public_dir(&self) -> PathBuf {
        self.state.workspace.public_dir()
    }
}

/// Start a server with the default configuration.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Start a server after letting `configure` adjust the configuration.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let root = TempDir::new().unwrap();
    let mut config = Config::with_root(root.path());
    configure(&mut config);

    let state = AppState::new(config);
    state.workspace.init().await.unwrap();

    let server = TestServer::new(router(state.clone())).unwrap();
    TestApp {
        server,
        state,
        _root: root,
    }
}

/// Build a PDF with `pages` pages marked `{label}1..={label}{pages}`.
pub fn marked_pdf(label: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = format!("BT /F1 24 Tf 72 720 Td ({label}{n}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Marker" => Object::Name(format!("{label}{n}").into_bytes()),
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Page markers of a PDF, in page order.
pub fn page_markers(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            let marker = page.get(b"Marker").and_then(Object::as_name).unwrap();
            String::from_utf8_lossy(marker).into_owned()
        })
        .collect()
}

/// Markers `{label}1..={label}{pages}`.
pub fn expected_markers(label: &str, pages: usize) -> Vec<String> {
    (1..=pages).map(|n| format!("{label}{n}")).collect()
}

/// A multipart form with one `pdf` part per `(filename, bytes)` pair.
pub fn pdf_form(files: Vec<(&str, Vec<u8>)>) -> MultipartForm {
    files
        .into_iter()
        .fold(MultipartForm::new(), |form, (name, bytes)| {
            form.add_part(
                "pdf",
                Part::bytes(bytes)
                    .file_name(name)
                    .mime_type("application/pdf"),
            )
        })
}

/// Entries of `dir`, empty if it does not exist.
pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.map(|entry| entry.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
