use serde::{Deserialize, Serialize};

/// One row of the verification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub function: String,
    pub points: String,
}

impl ChecklistItem {
    pub fn new(function: impl Into<String>, points: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            points: points.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub user: String,
    pub version: String,
    pub product: String,
    pub date: String,
}

/// A single named entry of the generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePart {
    pub path: &'static str,
    pub content: String,
}

/// All parts of one document, in the order they are written to the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPackage {
    parts: Vec<PackagePart>,
}

impl OutputPackage {
    pub fn new(parts: Vec<PackagePart>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|part| part.path == path)
            .map(|part| part.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
