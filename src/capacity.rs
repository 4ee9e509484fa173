//! # 容量规划模块
//!
//! 每个像素恰好承载一个字节，因此图像容量 (字节) 等于像素数。

use crate::constants::HEADER_LEN;
use crate::error::{Result, StegoError};

/// 图像的像素总数，即可承载的字节数 (含头部)。
pub fn pixel_capacity(height: u32, width: u32) -> u64 {
    u64::from(height) * u64::from(width)
}

/// 扣除 50 字节头部后，图像最多能隐藏的文件长度。
pub fn max_payload(height: u32, width: u32) -> u64 {
    pixel_capacity(height, width).saturating_sub(HEADER_LEN as u64)
}

/// 判断 `height × width` 的图像能否容纳 `payload_size` 字节的文件。
pub fn can_embed(height: u32, width: u32, payload_size: u64) -> bool {
    payload_size
        .checked_add(HEADER_LEN as u64)
        .is_some_and(|required| pixel_capacity(height, width) >= required)
}

/// 与 [`can_embed`] 相同，但在容量不足时返回带有具体数字的错误。
pub fn ensure_capacity(height: u32, width: u32, payload_size: u64) -> Result<()> {
    if can_embed(height, width, payload_size) {
        Ok(())
    } else {
        Err(StegoError::InsufficientCapacity {
            required: payload_size.saturating_add(HEADER_LEN as u64),
            available: pixel_capacity(height, width),
        })
    }
}
