use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocGenError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Archive,
    Config,
}

impl DocGenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocGenError::ZipError(_) => ErrorCategory::Archive,
            DocGenError::IoError(_) => ErrorCategory::Io,
            DocGenError::ConfigError { .. } | DocGenError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// 給終端使用者看的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DocGenError::ZipError(e) => format!("文档打包失败: {}", e),
            DocGenError::IoError(e) => format!("文件读写失败: {}", e),
            DocGenError::ConfigError { message } => format!("配置错误: {}", message),
            DocGenError::InvalidConfigValueError { field, reason, .. } => {
                format!("参数 {} 无效: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "请检查输出目录是否存在写入权限，或使用 --output 指定其他目录",
            ErrorCategory::Archive => "请确认磁盘空间充足后重试",
            ErrorCategory::Config => "请检查命令行参数，运行 --help 查看用法",
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Io | ErrorCategory::Archive => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_map_to_io_category() {
        let err = DocGenError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("denied"));
    }

    #[test]
    fn test_validation_errors_exit_with_one() {
        let err = DocGenError::InvalidConfigValueError {
            field: "user".to_string(),
            value: "  ".to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("'user'"));
    }
}
