use crate::core::{catalog, package::PackageWriter, render};
use crate::domain::model::DocumentMetadata;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::sanitize_filename;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const FILE_PREFIX: &str = "行芯产品验证文档";

/// `行芯产品验证文档-<user>.docx`, with the user name made filesystem-safe.
pub fn output_file_name(user: &str) -> String {
    format!("{}-{}.docx", FILE_PREFIX, sanitize_filename(user))
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub metadata: DocumentMetadata,
    pub template: String,
    pub file_name: String,
    pub output_path: PathBuf,
    pub item_count: usize,
    pub archive_size: usize,
}

/// One resolve → render → write pass.
pub struct DocGenerator<S: Storage> {
    writer: PackageWriter<S>,
    output_dir: PathBuf,
    catalog_path: Option<PathBuf>,
}

impl<S: Storage> DocGenerator<S> {
    /// `output_dir` is where `storage` writes; it is only used for reporting.
    pub fn new(storage: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: PackageWriter::new(storage),
            output_dir: output_dir.into(),
            catalog_path: None,
        }
    }

    pub fn with_catalog(mut self, catalog_path: Option<PathBuf>) -> Self {
        self.catalog_path = catalog_path;
        self
    }

    pub fn run(&self, metadata: &DocumentMetadata, template: &str) -> Result<GenerationReport> {
        self.run_at(metadata, template, Utc::now())
    }

    pub fn run_at(
        &self,
        metadata: &DocumentMetadata,
        template: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<GenerationReport> {
        let items = match &self.catalog_path {
            Some(path) => catalog::resolve(template, path),
            None => {
                tracing::warn!("No template catalog location available, using built-in checklist");
                catalog::default_items()
            }
        };
        tracing::debug!("Resolved {} checklist items for '{}'", items.len(), template);

        let package = render::render_package(metadata, &items, generated_at);
        tracing::debug!("Rendered {} package parts", package.len());

        let file_name = output_file_name(&metadata.user);
        let archive_size = self.writer.write(&file_name, &package)?;

        Ok(GenerationReport {
            metadata: metadata.clone(),
            template: template.to_string(),
            output_path: self.output_dir.join(&file_name),
            file_name,
            item_count: items.len(),
            archive_size,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;

    fn metadata(user: &str) -> DocumentMetadata {
        DocumentMetadata {
            user: user.to_string(),
            version: "v1.0.0".to_string(),
            product: "行芯产品".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("张三"), "行芯产品验证文档-张三.docx");
        assert_eq!(output_file_name("a/b:c"), "行芯产品验证文档-a_b_c.docx");
        assert_eq!(output_file_name("///"), "行芯产品验证文档-unknown.docx");
    }

    #[test]
    fn test_run_without_catalog_uses_builtin_items() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let generator = DocGenerator::new(LocalStorage::new(temp_dir.path()), temp_dir.path());

        let report = generator.run(&metadata("张三"), "default").unwrap();

        assert_eq!(report.item_count, 6);
        assert_eq!(report.file_name, "行芯产品验证文档-张三.docx");
        assert_eq!(report.output_path, temp_dir.path().join("行芯产品验证文档-张三.docx"));
        assert!(report.output_path.exists());
        assert_eq!(
            std::fs::metadata(&report.output_path).unwrap().len() as usize,
            report.archive_size
        );
    }

    #[test]
    fn test_run_uses_catalog_template() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let catalog_path = temp_dir.path().join("templates.md");
        std::fs::write(
            &catalog_path,
            "## smoke\n\n```json\n{\"items\": [{\"function\": \"冒烟\", \"points\": \"启动即可\"}]}\n```\n",
        )
        .unwrap();

        let out_dir = temp_dir.path().join("out");
        let generator = DocGenerator::new(LocalStorage::new(&out_dir), &out_dir)
            .with_catalog(Some(catalog_path));

        let report = generator.run(&metadata("李四"), "smoke").unwrap();
        assert_eq!(report.item_count, 1);
        assert_eq!(report.template, "smoke");
        assert!(out_dir.join("行芯产品验证文档-李四.docx").exists());
    }
}
