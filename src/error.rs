//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("解析错误: 第 {line} 行权重无效 `{value}`")]
    ParseError { line: usize, value: String },

    #[error("无效的样本规模: {0}")]
    InvalidSampleSize(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ConfigError(format!("JSON 配置无效: {}", e))
    }
}
