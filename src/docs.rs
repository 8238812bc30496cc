//! Document-store boundary and folder digest orchestration.
//!
//! The store itself (transport, OAuth, token refresh) is an external
//! collaborator behind [`DocumentStore`]; this module owns the listing,
//! search, and folder-content aggregation built on top of it.

use crate::config::Limits;
use crate::error::DocsError;
use crate::extract::truncate_content;

/// MIME type the store uses to mark folders.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// One entry in a folder listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

impl DocEntry {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }
}

/// One search result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    /// "Folder" or "File".
    pub kind: String,
    /// Name of the containing folder.
    pub parent: String,
}

/// Search scope filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Folder,
    Document,
}

/// Remote document-store operations.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// List a folder's direct children.
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<DocEntry>, DocsError>;

    /// Fetch a document's extracted text.
    async fn get_document_text(&self, file_id: &str) -> Result<String, DocsError>;

    /// Search entries by name, optionally restricted to folders or documents.
    async fn search(&self, name: &str, kind: Option<SearchKind>)
    -> Result<Vec<SearchHit>, DocsError>;
}

/// Aggregate a folder's contents into one truncated digest: a sub-folder
/// summary section followed by each file's text under its own heading.
///
/// Failures degrade in place — a file that cannot be read contributes a
/// bracketed placeholder, and only a failed listing degrades the whole
/// digest.
pub async fn folder_digest(store: &dyn DocumentStore, folder_id: &str, limits: &Limits) -> String {
    let entries = match store.list_folder(folder_id).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, folder_id, "folder listing failed");
            return format!("[Error accessing folder contents: {error}]");
        }
    };

    let mut sections = vec!["=== FOLDERS IN THIS DIRECTORY ===".to_string()];

    let folders: Vec<_> = entries.iter().filter(|e| e.is_folder()).collect();
    if folders.is_empty() {
        sections.push("(No subfolders)".into());
    } else {
        for folder in folders {
            sections.push(format!("- {} (ID: {})", folder.name, folder.id));
        }
    }

    sections.push("\n=== FILE CONTENTS ===".into());

    for file in entries.iter().filter(|e| !e.is_folder()) {
        let content = match store.get_document_text(&file.id).await {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(%error, file_id = %file.id, "document read failed");
                format!("[Error reading {}: {error}]", file.name)
            }
        };
        sections.push(format!("=== {} ===\n{content}\n", file.name));
    }

    truncate_content(sections.join("\n"), limits.max_content_chars)
}

/// Render a folder listing with FOLDERS and FILES sections and type icons.
pub fn render_listing(entries: &[DocEntry]) -> String {
    let mut listing = String::from("Contents of this folder:\n\n=== FOLDERS ===\n");

    let folders: Vec<_> = entries.iter().filter(|e| e.is_folder()).collect();
    if folders.is_empty() {
        listing.push_str("(No subfolders)\n");
    } else {
        for folder in folders {
            listing.push_str(&format!("📁 {}\n   ID: {}\n", folder.name, folder.id));
        }
    }

    listing.push_str("\n=== FILES ===\n");

    let files: Vec<_> = entries.iter().filter(|e| !e.is_folder()).collect();
    if files.is_empty() {
        listing.push_str("(No files)\n");
    } else {
        for file in files {
            listing.push_str(&format!(
                "{} {}\n   ID: {}\n",
                file_icon(&file.mime_type),
                file.name,
                file.id
            ));
        }
    }

    listing
}

/// Render search hits as name/kind/parent lines.
pub fn render_search_results(query: &str, hits: &[SearchHit]) -> String {
    let mut rendered = format!("Found {} items matching '{query}':\n", hits.len());
    for hit in hits {
        rendered.push_str(&format!(
            "- {} ({}) in {}\n  ID: {}\n",
            hit.name, hit.kind, hit.parent, hit.id
        ));
    }
    rendered
}

/// Emoji icon for a file's MIME type.
fn file_icon(mime_type: &str) -> &'static str {
    if mime_type == "application/vnd.google-apps.document" {
        "📄"
    } else if mime_type == "application/pdf" {
        "📕"
    } else if mime_type.starts_with("image/") {
        "🖼️"
    } else if mime_type.starts_with("text/") {
        "📝"
    } else if mime_type.starts_with("audio/") {
        "🎵"
    } else if mime_type.starts_with("video/") {
        "🎥"
    } else if mime_type.starts_with("application/vnd.google-apps.spreadsheet") {
        "📊"
    } else {
        "📎"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::TRUNCATION_MARKER;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeStore {
        entries: Vec<DocEntry>,
        texts: HashMap<String, String>,
        fail_listing: bool,
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn list_folder(&self, _folder_id: &str) -> Result<Vec<DocEntry>, DocsError> {
            if self.fail_listing {
                return Err(DocsError::Store("token expired".into()));
            }
            Ok(self.entries.clone())
        }

        async fn get_document_text(&self, file_id: &str) -> Result<String, DocsError> {
            self.texts
                .get(file_id)
                .cloned()
                .ok_or_else(|| DocsError::NotFound {
                    id: file_id.to_string(),
                })
        }

        async fn search(
            &self,
            _name: &str,
            _kind: Option<SearchKind>,
        ) -> Result<Vec<SearchHit>, DocsError> {
            Ok(Vec::new())
        }
    }

    fn entry(id: &str, name: &str, mime_type: &str) -> DocEntry {
        DocEntry {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    #[tokio::test]
    async fn digest_lists_folders_then_file_contents() {
        let store = FakeStore {
            entries: vec![
                entry("f1", "Archive", FOLDER_MIME),
                entry("d1", "plan.txt", "text/plain"),
            ],
            texts: HashMap::from([("d1".to_string(), "the plan".to_string())]),
            fail_listing: false,
        };

        let digest = folder_digest(&store, "root", &Limits::default()).await;

        assert!(digest.contains("- Archive (ID: f1)"));
        assert!(digest.contains("=== plan.txt ===\nthe plan"));
        let folders_at = digest.find("=== FOLDERS IN THIS DIRECTORY ===").unwrap();
        let contents_at = digest.find("=== FILE CONTENTS ===").unwrap();
        assert!(folders_at < contents_at);
    }

    #[tokio::test]
    async fn unreadable_file_degrades_in_place() {
        let store = FakeStore {
            entries: vec![
                entry("d1", "good.txt", "text/plain"),
                entry("d2", "bad.txt", "text/plain"),
            ],
            texts: HashMap::from([("d1".to_string(), "fine".to_string())]),
            fail_listing: false,
        };

        let digest = folder_digest(&store, "root", &Limits::default()).await;

        assert!(digest.contains("=== good.txt ===\nfine"));
        assert!(digest.contains("[Error reading bad.txt:"));
    }

    #[tokio::test]
    async fn failed_listing_degrades_the_whole_digest() {
        let store = FakeStore {
            entries: Vec::new(),
            texts: HashMap::new(),
            fail_listing: true,
        };

        let digest = folder_digest(&store, "root", &Limits::default()).await;
        assert!(digest.starts_with("[Error accessing folder contents:"));
    }

    #[tokio::test]
    async fn digest_is_truncated_at_the_content_cap() {
        let store = FakeStore {
            entries: vec![entry("d1", "huge.txt", "text/plain")],
            texts: HashMap::from([("d1".to_string(), "x".repeat(500))]),
            fail_listing: false,
        };

        let limits = Limits {
            max_content_chars: 120,
            ..Limits::default()
        };
        let digest = folder_digest(&store, "root", &limits).await;
        assert!(digest.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn listing_renders_sections_and_icons() {
        let listing = render_listing(&[
            entry("f1", "Reports", FOLDER_MIME),
            entry("d1", "summary.pdf", "application/pdf"),
            entry("d2", "photo.png", "image/png"),
        ]);

        assert!(listing.contains("📁 Reports"));
        assert!(listing.contains("📕 summary.pdf"));
        assert!(listing.contains("🖼️ photo.png"));
    }

    #[test]
    fn empty_listing_renders_placeholders() {
        let listing = render_listing(&[]);
        assert!(listing.contains("(No subfolders)"));
        assert!(listing.contains("(No files)"));
    }

    #[test]
    fn search_results_show_kind_and_parent() {
        let rendered = render_search_results(
            "plan",
            &[SearchHit {
                id: "d1".into(),
                name: "plan.txt".into(),
                kind: "File".into(),
                parent: "Projects".into(),
            }],
        );

        assert!(rendered.starts_with("Found 1 items matching 'plan':"));
        assert!(rendered.contains("- plan.txt (File) in Projects"));
    }
}
