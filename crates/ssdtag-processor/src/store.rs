//! Bundled document stores
//!
//! [`MemoryStore`] keeps everything in memory; [`DirectoryStore`] treats a
//! local directory of already-OCR'd files as the document collection, with
//! each annotation kept in a sidecar file next to its document.

use crate::error::StoreError;
use ssdtag_domain::{DocumentStore, DocumentSummary};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix of the sidecar file holding a document's annotation
pub const ANNOTATION_SUFFIX: &str = ".annotation";

#[derive(Debug, Clone)]
struct MemoryDocument {
    summary: DocumentSummary,
    content: Vec<u8>,
}

/// In-memory document store
///
/// Documents are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<MemoryDocument>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any existing one with the same id
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        annotation: Option<&str>,
    ) {
        let summary = DocumentSummary {
            id: id.into(),
            name: name.into(),
            annotation: annotation.map(str::to_string),
        };
        let document = MemoryDocument {
            summary,
            content: content.into(),
        };
        match self
            .documents
            .iter_mut()
            .find(|d| d.summary.id == document.summary.id)
        {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
    }

    /// Current annotation of a document
    pub fn annotation(&self, id: &str) -> Option<&str> {
        self.find(id).ok()?.summary.annotation.as_deref()
    }

    /// Number of annotations written so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn find(&self, id: &str) -> Result<&MemoryDocument, StoreError> {
        self.documents
            .iter()
            .find(|d| d.summary.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl DocumentStore for MemoryStore {
    type Error = StoreError;

    fn list_documents(&self) -> Result<Vec<DocumentSummary>, Self::Error> {
        Ok(self.documents.iter().map(|d| d.summary.clone()).collect())
    }

    fn fetch_content(&self, id: &str) -> Result<Vec<u8>, Self::Error> {
        Ok(self.find(id)?.content.clone())
    }

    fn write_annotation(&mut self, id: &str, text: &str) -> Result<(), Self::Error> {
        let document = self
            .documents
            .iter_mut()
            .find(|d| d.summary.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        document.summary.annotation = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Document store over a local directory
///
/// Every regular file that is not itself a sidecar is a document; its id
/// and name are the file name, and its annotation lives in
/// `<file name>.annotation`. Subdirectories are not descended into.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store over `root`
    ///
    /// # Errors
    ///
    /// Fails when `root` is not a readable directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !fs::metadata(&root)?.is_dir() {
            return Err(StoreError::NotFound(root.display().to_string()));
        }
        Ok(Self { root })
    }

    /// Directory this store reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a document, refusing ids that would leave the directory
    fn document_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(id)),
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn annotation_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        self.document_path(&format!("{}{}", id, ANNOTATION_SUFFIX))
    }
}

impl DocumentStore for DirectoryStore {
    type Error = StoreError;

    fn list_documents(&self) -> Result<Vec<DocumentSummary>, Self::Error> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if name.ends_with(ANNOTATION_SUFFIX) || name.starts_with('.') {
                continue;
            }
            let sidecar = self.annotation_path(&name)?;
            let annotation = match fs::read_to_string(&sidecar) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            documents.push(DocumentSummary {
                id: name.clone(),
                name,
                annotation,
            });
        }
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    fn fetch_content(&self, id: &str) -> Result<Vec<u8>, Self::Error> {
        let path = self.document_path(id)?;
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => e.into(),
        })
    }

    fn write_annotation(&mut self, id: &str, text: &str) -> Result<(), Self::Error> {
        if !self.document_path(id)?.is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        // Hidden temp file beside the sidecar, renamed over it once complete.
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(text.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(self.annotation_path(id)?).map_err(|e| e.error)?;
        Ok(())
    }

    fn view_link(&self, id: &str) -> Option<String> {
        let path = self.document_path(id).ok()?;
        Some(path.display().to_string())
    }
}
