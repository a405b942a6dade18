pub mod catalog;
pub mod generator;
pub mod package;
pub mod render;
pub mod xml;

pub use crate::domain::model::{ChecklistItem, DocumentMetadata, OutputPackage, PackagePart};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
