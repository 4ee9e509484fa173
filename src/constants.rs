/// 头部中文件名字段的宽度 (字节)。
pub const HEADER_NAME_LEN: usize = 30;

/// 头部中文件大小字段的宽度 (字节)。
/// `u64` 的十进制表示最多 20 位，因此该字段总能容纳。
pub const HEADER_SIZE_LEN: usize = 20;

/// 头部总宽度 (字节)，固定为 50。
pub const HEADER_LEN: usize = HEADER_NAME_LEN + HEADER_SIZE_LEN;

/// 头部字段的填充哨兵字节 `'*'`。
pub const PADDING: u8 = b'*';

/// 红色通道 (channel-A) 承载高 3 位。
pub const RED_MASK: u8 = 0x07;

/// 绿色通道 (channel-B) 承载中间 3 位。
pub const GREEN_MASK: u8 = 0x07;

/// 蓝色通道 (channel-C) 承载低 2 位。
pub const BLUE_MASK: u8 = 0x03;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，隐写图像使用的扩展名 (无损格式)。
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";
