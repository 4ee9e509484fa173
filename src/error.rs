use std::path::PathBuf;
use thiserror::Error;

/// 隐写核心操作可能产生的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    /// 要隐藏的文件不存在或为空。
    #[error("No payload to hide: the file is missing or empty")]
    PayloadMissing,

    /// 图像解码失败。
    #[error("Unable to decode source image: {}", .path.display())]
    SourceImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 图像像素数不足以容纳头部和文件内容。
    #[error("Not enough space in the image. Required: {required} pixels, Available: {available} pixels")]
    InsufficientCapacity { required: u64, available: u64 },

    /// 头部无法解析，图像很可能不包含隐藏文件。
    #[error("Corrupt header: {0}")]
    CorruptHeader(String),

    /// 声明的文件长度超出了图像实际承载的数据。
    #[error("Carrier exhausted: header declares {expected} bytes but only {recovered} could be recovered")]
    TruncatedCarrier { expected: u64, recovered: u64 },

    /// 文件名无法写入单字节编码的头部。
    #[error("File name cannot be stored in the header: {0:?}")]
    InvalidFileName(String),
}

pub type Result<T> = std::result::Result<T, StegoError>;
