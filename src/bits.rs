//! # 位编解码模块
//!
//! 把一个字节拆成 3/3/2 位的三组，分别写入一个像素的红、绿、蓝通道，
//! 以及反向的拼合操作。

/// 将一个字节拆分为 `(g1, g2, g3)`，宽度依次为 3、3、2 位，高位组在前。
pub fn split_byte(byte: u8) -> (u8, u8, u8) {
    (byte >> 5, (byte >> 2) & 0x07, byte & 0x03)
}

/// `split_byte` 的逆操作。
///
/// 每组只取其有效宽度内的位，多余的高位被忽略。
pub fn join_groups(g1: u8, g2: u8, g3: u8) -> u8 {
    ((g1 & 0x07) << 5) | ((g2 & 0x07) << 2) | (g3 & 0x03)
}
