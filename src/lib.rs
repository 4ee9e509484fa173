//! # lsb_vault 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：位编解码、头部编解码、容量规划、
//! 光栅遍历，以及在它们之上的隐藏与恢复操作。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod raster;
pub mod steganography;

pub use error::{Result, StegoError};
pub use steganography::{Extracted, embed, extract};
