pub mod cli;

use crate::domain::model::DocumentMetadata;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_VERSION: &str = "v1.0.0";
pub const DEFAULT_PRODUCT: &str = "行芯产品";
pub const DEFAULT_TEMPLATE: &str = "default";
pub const DEFAULT_OUTPUT: &str = ".";

/// Catalog location relative to the tool's base directory.
pub const CATALOG_RELATIVE_PATH: &str = "references/templates.md";

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "xingxin-test-doc")]
#[command(about = "生成行芯产品验证文档（.docx）")]
pub struct CliConfig {
    /// 测试人员姓名
    #[arg(long)]
    pub user: String,

    /// 产品版本号
    #[arg(long, default_value = DEFAULT_VERSION)]
    pub version: String,

    /// 产品名称
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    pub product: String,

    /// 测试日期 (YYYY-MM-DD)
    #[arg(long, default_value_t = today())]
    pub date: String,

    /// 模板名称
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// 输出目录
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// 模板文件路径，默认为程序目录旁的 references/templates.md
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Config with every optional field at its default.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            version: DEFAULT_VERSION.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            date: today(),
            template: DEFAULT_TEMPLATE.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            catalog: None,
            verbose: false,
        }
    }

    pub fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            user: self.user.clone(),
            version: self.version.clone(),
            product: self.product.clone(),
            date: self.date.clone(),
        }
    }

    /// Explicit `--catalog`, otherwise the catalog of the install the
    /// running executable belongs to (see [`catalog_path_for_exe`]).
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.catalog {
            return Some(path.clone());
        }

        let exe = std::env::current_exe().ok()?;
        catalog_path_for_exe(&exe)
    }
}

/// Catalog location for an installed layout:
///
/// ```text
/// <base>/bin/xingxin-test-doc
/// <base>/references/templates.md
/// ```
///
/// A cargo build lives in `target/<profile>/`, so it resolves to
/// `target/references/templates.md`; pass `--catalog` there.
pub fn catalog_path_for_exe(exe: &Path) -> Option<PathBuf> {
    let base = exe.parent()?.parent()?;
    Some(default_catalog_path(base))
}

pub fn default_catalog_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CATALOG_RELATIVE_PATH)
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("template", &self.template)?;
        validation::validate_path("output", &self.output)?;
        Ok(())
    }
}
