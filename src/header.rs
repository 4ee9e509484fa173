//! # 头部编解码模块
//!
//! 头部是写在文件内容之前的 50 字节定长记录：
//!
//! * 字节 0..30：`文件名.扩展名`，左对齐，右侧用 `'*'` 填充。
//! * 字节 30..50：文件长度的十进制 ASCII 数字，左对齐，右侧用 `'*'` 填充。
//!
//! 文件名按字符逐个存为单字节 (Latin-1)，因此只接受码点不超过 `U+00FF` 的字符。

use crate::constants::{HEADER_LEN, HEADER_NAME_LEN, HEADER_SIZE_LEN, PADDING};
use crate::error::{Result, StegoError};
use log::debug;

/// 解析后的头部内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub file_name: String,
    pub file_size: u64,
}

/// 按头部的命名规则裁剪文件名，使其不超过 30 字节。
///
/// 第一个 `.` 之后的全部内容视为扩展名并保持完整，只从右侧截断主文件名，
/// 因此 `x.tar.gz` 的扩展名是 `tar.gz`，而不是按最后一个 `.` 切分得到的 `gz`。
/// `.扩展名` 恰好 30 字节时主文件名被完全截去；
/// 若扩展名本身放不下，则直接截取整个名字的前 30 个字符。
///
/// # Errors
///
/// 文件名为空、含有 `'*'` 或含有码点大于 `U+00FF` 的字符时返回
/// [`StegoError::InvalidFileName`]。
pub fn fit_file_name(name: &str) -> Result<String> {
    if name.is_empty() || name.contains(PADDING as char) || name.chars().any(|c| c as u32 > 0xFF)
    {
        return Err(StegoError::InvalidFileName(name.to_string()));
    }

    if name.chars().count() <= HEADER_NAME_LEN {
        return Ok(name.to_string());
    }

    match name.split_once('.') {
        Some((stem, ext)) if ext.chars().count() < HEADER_NAME_LEN => {
            let keep = HEADER_NAME_LEN - ext.chars().count() - 1;
            let stem: String = stem.chars().take(keep).collect();
            Ok(format!("{stem}.{ext}"))
        }
        _ => Ok(name.chars().take(HEADER_NAME_LEN).collect()),
    }
}

/// 根据文件名和文件长度生成 50 字节的头部。
///
/// # Errors
///
/// * 文件长度为 0 时返回 [`StegoError::PayloadMissing`]。
/// * 文件名不符合 [`fit_file_name`] 的要求时返回 [`StegoError::InvalidFileName`]。
pub fn encode(file_name: &str, file_size: u64) -> Result<[u8; HEADER_LEN]> {
    if file_size == 0 {
        return Err(StegoError::PayloadMissing);
    }

    let name = fit_file_name(file_name)?;
    let size = file_size.to_string();

    let mut header = [PADDING; HEADER_LEN];
    header
        .iter_mut()
        .zip(name.chars())
        .for_each(|(slot, c)| *slot = c as u8);
    header[HEADER_NAME_LEN..HEADER_NAME_LEN + size.len()].copy_from_slice(size.as_bytes());

    debug!("Built header for {name:?} ({file_size} bytes)");
    Ok(header)
}

/// 解析 50 字节的头部。
///
/// # Errors
///
/// 文件名字段为空，或大小字段去掉填充后不是合法的非负十进制整数时，
/// 返回 [`StegoError::CorruptHeader`]。
pub fn decode(raw: &[u8; HEADER_LEN]) -> Result<HeaderRecord> {
    let (name_field, size_field) = raw.split_at(HEADER_NAME_LEN);
    debug_assert_eq!(size_field.len(), HEADER_SIZE_LEN);

    let file_name: String = strip_padding(name_field)
        .iter()
        .map(|&b| b as char)
        .collect();
    if file_name.is_empty() {
        return Err(StegoError::CorruptHeader("file name field is empty".into()));
    }

    let digits = strip_padding(size_field);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(StegoError::CorruptHeader(format!(
            "size field is not a decimal number: {:?}",
            String::from_utf8_lossy(size_field)
        )));
    }
    let file_size = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| StegoError::CorruptHeader("size field overflows u64".into()))?;

    debug!("Parsed header: {file_name:?} ({file_size} bytes)");
    Ok(HeaderRecord {
        file_name,
        file_size,
    })
}

/// 去掉字段末尾的 `'*'` 填充。
fn strip_padding(field: &[u8]) -> &[u8] {
    let end = field
        .iter()
        .rposition(|&b| b != PADDING)
        .map_or(0, |i| i + 1);
    &field[..end]
}
