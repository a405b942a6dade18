use crate::config::cli::LocalStorage;
use crate::domain::model::OutputPackage;
use crate::domain::ports::Storage;
use crate::utils::error::{DocGenError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serializes every part into an in-memory ZIP archive, deflate-compressed.
pub fn build_archive(package: &OutputPackage) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for part in package.parts() {
        tracing::debug!("Adding part {} ({} bytes)", part.path, part.content.len());
        zip.start_file(part.path, options)?;
        zip.write_all(part.content.as_bytes())?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

pub struct PackageWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> PackageWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Writes the archive as `file_name` and returns its size in bytes.
    pub fn write(&self, file_name: &str, package: &OutputPackage) -> Result<usize> {
        let zip_data = build_archive(package)?;

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(file_name, &zip_data)?;

        Ok(zip_data.len())
    }
}

/// Writes `package` to `output_path` on the local filesystem.
///
/// Missing parent directories are created and an existing file is replaced.
pub fn write_package(output_path: &Path, package: &OutputPackage) -> Result<usize> {
    let file_name = output_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DocGenError::ConfigError {
            message: format!("Invalid output path: {}", output_path.display()),
        })?;
    let parent = output_path.parent().unwrap_or_else(|| Path::new(""));

    PackageWriter::new(LocalStorage::new(parent)).write(file_name, package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PackagePart;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Read;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample_package() -> OutputPackage {
        OutputPackage::new(vec![
            PackagePart {
                path: "[Content_Types].xml",
                content: "<Types/>".to_string(),
            },
            PackagePart {
                path: "word/document.xml",
                content: "<w:document>张三</w:document>".to_string(),
            },
            PackagePart {
                path: "word/_rels/document.xml.rels",
                content: "<Relationships/>".to_string(),
            },
        ])
    }

    fn read_entry(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_write_stores_archive_under_file_name() {
        let storage = MockStorage::default();
        let writer = PackageWriter::new(storage.clone());

        let size = writer.write("report.docx", &sample_package()).unwrap();

        let zip_data = storage.get_file("report.docx").unwrap();
        assert_eq!(zip_data.len(), size);
    }

    #[test]
    fn test_archive_round_trips_every_part() {
        let package = sample_package();
        let zip_data = build_archive(&package).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

        assert_eq!(archive.len(), package.len());
        for part in package.parts() {
            assert_eq!(read_entry(&mut archive, part.path), part.content);
        }
    }

    #[test]
    fn test_archive_entries_are_deflated() {
        let zip_data = build_archive(&sample_package()).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

        let entry = archive.by_name("word/document.xml").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_write_package_creates_parent_directories() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output_path = temp_dir.path().join("nested").join("out.docx");

        write_package(&output_path, &sample_package()).unwrap();

        let zip_data = std::fs::read(&output_path).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 3);
    }
}
