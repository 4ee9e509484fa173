//! # 隐写核心模块
//!
//! 把 `头部 ++ 文件内容` 组成的逻辑字节流逐字节写入像素，或反向读出。
//! 每个像素承载一个字节：红色通道低 3 位存高 3 位，绿色通道低 3 位存中间 3 位，
//! 蓝色通道低 2 位存低 2 位，其余位保持不变。

use crate::bits::{join_groups, split_byte};
use crate::capacity::{ensure_capacity, max_payload};
use crate::constants::{BLUE_MASK, GREEN_MASK, HEADER_LEN, RED_MASK};
use crate::error::{Result, StegoError};
use crate::header;
use crate::raster::RasterCursor;
use image::{Rgb, RgbImage};
use log::debug;

/// 从图像中恢复出的文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// 头部中记录的文件名 (已按头部规则裁剪)。
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 将 `payload` 连同以 `file_name` 生成的头部写入 `grid`。
///
/// 所有检查都在修改像素之前完成，失败时 `grid` 保持原样。
/// 数据流写完即停止，其后的像素不受影响。
///
/// # Errors
///
/// * `payload` 为空时返回 [`StegoError::PayloadMissing`]。
/// * 像素数小于 `payload.len() + 50` 时返回 [`StegoError::InsufficientCapacity`]。
/// * 文件名无法写入头部时返回 [`StegoError::InvalidFileName`]。
pub fn embed(grid: &mut RgbImage, payload: &[u8], file_name: &str) -> Result<()> {
    if payload.is_empty() {
        return Err(StegoError::PayloadMissing);
    }

    let (width, height) = grid.dimensions();
    let payload_size = payload.len() as u64;
    ensure_capacity(height, width, payload_size)?;
    let header = header::encode(file_name, payload_size)?;

    let stream = header.iter().chain(payload);
    let mut written = 0u64;
    for ((row, col), &byte) in RasterCursor::new(height, width).zip(stream) {
        write_pixel(grid.get_pixel_mut(col, row), byte);
        written += 1;
    }

    debug!("Embedded {written} bytes into a {width}x{height} grid");
    Ok(())
}

/// 从 `grid` 中读出头部和文件内容。
///
/// 读满头部声明的长度后立即停止遍历。
///
/// # Errors
///
/// * 头部无法解析时返回 [`StegoError::CorruptHeader`]。
/// * 图像剩余像素不足以容纳头部声明的长度时返回 [`StegoError::TruncatedCarrier`]。
pub fn extract(grid: &RgbImage) -> Result<Extracted> {
    let (width, height) = grid.dimensions();
    let mut stream =
        RasterCursor::new(height, width).map(|(row, col)| read_pixel(grid.get_pixel(col, row)));

    let mut raw = [0u8; HEADER_LEN];
    for (i, slot) in raw.iter_mut().enumerate() {
        *slot = stream.next().ok_or_else(|| {
            StegoError::CorruptHeader(format!(
                "image holds only {i} of the {HEADER_LEN} header bytes"
            ))
        })?;
    }
    let record = header::decode(&raw)?;

    // 在分配缓冲区之前拒绝不可能满足的长度
    let available = max_payload(height, width);
    let truncated = |recovered: u64| StegoError::TruncatedCarrier {
        expected: record.file_size,
        recovered,
    };
    if record.file_size > available {
        return Err(truncated(available));
    }
    let len = usize::try_from(record.file_size).map_err(|_| truncated(0))?;

    let mut data = Vec::with_capacity(len);
    data.extend(stream.take(len));
    if data.len() < len {
        return Err(truncated(data.len() as u64));
    }

    debug!(
        "Extracted {:?} ({} bytes) from a {width}x{height} grid",
        record.file_name,
        data.len()
    );
    Ok(Extracted {
        file_name: record.file_name,
        data,
    })
}

fn write_pixel(pixel: &mut Rgb<u8>, byte: u8) {
    let (g1, g2, g3) = split_byte(byte);
    let [red, green, blue] = &mut pixel.0;
    *red = (*red & !RED_MASK) | g1;
    *green = (*green & !GREEN_MASK) | g2;
    *blue = (*blue & !BLUE_MASK) | g3;
}

fn read_pixel(pixel: &Rgb<u8>) -> u8 {
    let [red, green, blue] = pixel.0;
    join_groups(red & RED_MASK, green & GREEN_MASK, blue & BLUE_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PADDING;

    /// 生成一张内容确定、各通道取值分散的图像。
    fn carrier(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 31 + y * 17) as u8,
                (x * 7 + y * 101) as u8,
                (x * 59 + y * 3 + 128) as u8,
            ])
        })
    }

    /// 不经过头部编码，直接把原始字节流写入像素。
    fn write_raw(grid: &mut RgbImage, bytes: &[u8]) {
        let (width, height) = grid.dimensions();
        for ((row, col), &byte) in RasterCursor::new(height, width).zip(bytes) {
            write_pixel(grid.get_pixel_mut(col, row), byte);
        }
    }

    #[test]
    fn scenario_small_text_file_round_trips() {
        let mut grid = carrier(10, 10);
        let payload = b"0123456789";
        embed(&mut grid, payload, "a.txt").unwrap();

        let mut header = [0u8; HEADER_LEN];
        for (i, slot) in header.iter_mut().enumerate() {
            *slot = read_pixel(grid.get_pixel(i as u32 % 10, i as u32 / 10));
        }
        assert_eq!(&header[..30], b"a.txt*************************");
        assert_eq!(&header[30..], b"10******************");

        let extracted = extract(&grid).unwrap();
        assert_eq!(extracted.file_name, "a.txt");
        assert_eq!(extracted.data, payload);
    }

    #[test]
    fn scenario_insufficient_capacity_leaves_grid_untouched() {
        let original = carrier(10, 5);
        let mut grid = original.clone();
        let result = embed(&mut grid, b"x", "a.txt");
        assert!(matches!(
            result,
            Err(StegoError::InsufficientCapacity {
                required: 51,
                available: 50
            })
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn scenario_non_digit_size_field_is_corrupt_header() {
        let grid = RgbImage::from_pixel(10, 10, Rgb([0xFF, 0xFF, 0xFF]));
        assert!(matches!(extract(&grid), Err(StegoError::CorruptHeader(_))));
    }

    #[test]
    fn exact_capacity_is_usable() {
        let mut grid = carrier(10, 10);
        let payload: Vec<u8> = (0..50).collect();
        embed(&mut grid, &payload, "full.bin").unwrap();
        assert_eq!(extract(&grid).unwrap().data, payload);
    }

    #[test]
    fn empty_payload_is_rejected_without_mutation() {
        let original = carrier(10, 10);
        let mut grid = original.clone();
        assert!(matches!(
            embed(&mut grid, &[], "a.txt"),
            Err(StegoError::PayloadMissing)
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn invalid_name_is_rejected_without_mutation() {
        let original = carrier(10, 10);
        let mut grid = original.clone();
        assert!(matches!(
            embed(&mut grid, b"abc", "数据.bin"),
            Err(StegoError::InvalidFileName(_))
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn only_low_bits_change_and_tail_is_untouched() {
        let original = carrier(16, 16);
        let mut grid = original.clone();
        let payload: Vec<u8> = (0..=255u8).rev().take(100).collect();
        embed(&mut grid, &payload, "bits.dat").unwrap();

        let stream_len = HEADER_LEN + payload.len();
        for (i, (before, after)) in original.pixels().zip(grid.pixels()).enumerate() {
            let [r0, g0, b0] = before.0;
            let [r1, g1, b1] = after.0;
            if i < stream_len {
                assert_eq!(r0 & !RED_MASK, r1 & !RED_MASK);
                assert_eq!(g0 & !GREEN_MASK, g1 & !GREEN_MASK);
                assert_eq!(b0 & !BLUE_MASK, b1 & !BLUE_MASK);
            } else {
                assert_eq!(before, after, "pixel {i} beyond the stream was modified");
            }
        }
    }

    #[test]
    fn every_byte_value_round_trips() {
        let mut grid = carrier(20, 20);
        let payload: Vec<u8> = (0..=255u8).collect();
        embed(&mut grid, &payload, "all.bin").unwrap();
        assert_eq!(extract(&grid).unwrap().data, payload);
    }

    #[test]
    fn long_name_comes_back_truncated() {
        let mut grid = carrier(10, 10);
        let name = format!("{}.md", "very_long_document_name_".repeat(3));
        embed(&mut grid, b"# hi", &name).unwrap();

        let extracted = extract(&grid).unwrap();
        assert_eq!(extracted.file_name, header::fit_file_name(&name).unwrap());
        assert_eq!(extracted.file_name.len(), 30);
        assert!(extracted.file_name.ends_with(".md"));
    }

    #[test]
    fn declared_size_beyond_grid_is_truncated_carrier() {
        let mut grid = carrier(10, 10);
        let mut stream = [PADDING; HEADER_LEN];
        stream[..5].copy_from_slice(b"a.txt");
        stream[30..32].copy_from_slice(b"51");
        write_raw(&mut grid, &stream);

        assert!(matches!(
            extract(&grid),
            Err(StegoError::TruncatedCarrier {
                expected: 51,
                recovered: 50
            })
        ));
    }

    #[test]
    fn grid_smaller_than_header_is_corrupt() {
        let grid = carrier(7, 7);
        assert!(matches!(extract(&grid), Err(StegoError::CorruptHeader(_))));
    }

    #[test]
    fn zero_declared_size_yields_empty_file() {
        let mut grid = carrier(10, 10);
        let mut stream = [PADDING; HEADER_LEN];
        stream[..5].copy_from_slice(b"e.txt");
        stream[30] = b'0';
        write_raw(&mut grid, &stream);

        let extracted = extract(&grid).unwrap();
        assert_eq!(extracted.file_name, "e.txt");
        assert!(extracted.data.is_empty());
    }
}
