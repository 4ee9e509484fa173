//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在彩色图像的像素中，并原样恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可将任意文件隐藏在彩色图像的像素中，并原样恢复。\n每个像素承载一个字节：红、绿、蓝通道的低 3/3/2 位。"
)]
pub struct Cli {
    /// 输出调试日志 (也可通过 RUST_LOG 环境变量控制)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量查询)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件隐藏到彩色图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Recover(RecoverArgs),

    /// 查询图像最多能隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 结果图像的输出路径，必须是无损格式 (PNG, BMP, TIFF, WebP, QOI)。
    /// 默认为输入图像同目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文件的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的文件所在目录，文件名取自图像中的头部。默认为图像所在目录。
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
