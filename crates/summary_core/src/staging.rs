use std::path::{Path, PathBuf};

use crate::Classification;

/// A file the user picked but has not submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDocument {
    display_name: String,
    classification: Classification,
    source: PathBuf,
}

impl StagedDocument {
    pub fn from_path(source: PathBuf) -> Self {
        Self {
            display_name: display_name_for(&source),
            classification: Classification::Unknown,
            source,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Opaque handle to the file content. Nothing reads it until submission.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Ordered list of staged documents.
///
/// Entries are addressed by position only: removing an entry shifts every
/// later entry down by one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagingArea {
    documents: Vec<StagedDocument>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `Unknown` entry per file, in selection order. Returns how many were added.
    pub fn add_documents<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.documents.len();
        self.documents
            .extend(files.into_iter().map(StagedDocument::from_path));
        self.documents.len() - before
    }

    /// Returns false (and changes nothing) when `index` is out of range.
    pub fn set_classification(&mut self, index: usize, classification: Classification) -> bool {
        match self.documents.get_mut(index) {
            Some(doc) => {
                doc.classification = classification;
                true
            }
            None => false,
        }
    }

    pub fn remove_document(&mut self, index: usize) -> Option<StagedDocument> {
        if index < self.documents.len() {
            Some(self.documents.remove(index))
        } else {
            None
        }
    }

    pub fn clear_all(&mut self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StagedDocument> {
        self.documents.get(index)
    }

    pub fn first(&self) -> Option<&StagedDocument> {
        self.documents.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedDocument> {
        self.documents.iter()
    }
}

fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_file_name_component() {
        let doc = StagedDocument::from_path(PathBuf::from("reports/q3/board.pdf"));
        assert_eq!(doc.display_name(), "board.pdf");
        assert_eq!(doc.classification(), Classification::Unknown);
    }

    #[test]
    fn display_name_falls_back_to_full_path() {
        let doc = StagedDocument::from_path(PathBuf::from(".."));
        assert_eq!(doc.display_name(), "..");
    }
}
