pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::generator::{output_file_name, DocGenerator, GenerationReport};
pub use crate::core::{catalog, package::write_package, render::render_package};
pub use crate::domain::model::{ChecklistItem, DocumentMetadata, OutputPackage, PackagePart};
pub use crate::utils::error::{DocGenError, Result};
