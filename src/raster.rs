//! # 光栅游标模块
//!
//! 按行优先顺序依次给出像素坐标。隐藏与恢复必须使用同一遍历顺序，
//! 因为数据流本身不携带任何位置信息：像素在网格中的位置就是字节在流中的位置。

/// 行优先的一次性像素坐标迭代器，产出 `(row, col)`。
#[derive(Debug)]
pub struct RasterCursor {
    width: u32,
    height: u32,
    cnt: u64,
}

impl RasterCursor {
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            width,
            height,
            cnt: 0,
        }
    }

    /// 已经产出的坐标数量，即下一个像素的线性下标。
    pub fn position(&self) -> u64 {
        self.cnt
    }

    fn total(&self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }
}

impl Iterator for RasterCursor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cnt >= self.total() {
            return None;
        }
        let width = u64::from(self.width);
        let row = (self.cnt / width) as u32;
        let col = (self.cnt % width) as u32;
        self.cnt += 1;
        Some((row, col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total() - self.cnt).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl std::iter::FusedIterator for RasterCursor {}
