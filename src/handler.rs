//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调图像与文件 I/O、调用核心隐写算法以及向用户报告结果。
//! 只有在核心操作全部成功之后才会写出文件。

use crate::capacity::{max_payload, pixel_capacity};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_IMAGE_EXTENSION, DOCTORED_PREFIX, HEADER_LEN};
use crate::error::StegoError;
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbImage};
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和待隐藏文件、检查输出路径、调用隐写核心函数，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 目标路径不是无损图像格式。
/// * 无法解码输入图像，或待隐藏文件不存在、为空。
/// * 图像没有足够的像素来容纳文件。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = match args.dest {
        Some(dest) => dest,
        None => default_hidden_path(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;
    ensure_lossless(&dest)?;

    let mut picture = load_grid(&args.image)?;
    let payload = read_payload(&args.file)?;
    let name = payload_name(&args.file)?;
    info!(
        "Hiding {} ({} bytes) in {}",
        name,
        payload.len(),
        args.image.display()
    );

    embed(&mut picture, &payload, &name).with_context(|| {
        format!(
            "Failed to hide {} in {}",
            args.file.to_string_lossy().red().bold(),
            args.image.to_string_lossy().red().bold()
        )
    })?;

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像、调用恢复核心函数获取文件名和内容，
/// 最后将文件写入输出目录。
///
/// # Arguments
///
/// * `args` - 包含输入路径和输出目录的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法解码输入图像。
/// * 图像中的头部已损坏，或数据在声明的长度之前就已耗尽。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = load_grid(&args.image)?;

    let extracted = extract(&picture).with_context(|| {
        format!(
            "Failed to recover a hidden file from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Recovered {} ({} bytes) from {}",
        extracted.file_name,
        extracted.data.len(),
        args.image.display()
    );

    let dir = args
        .out_dir
        .unwrap_or_else(|| args.image.parent().map(Path::to_path_buf).unwrap_or_default());
    let dest = dir.join(safe_file_name(&extracted.file_name)?);
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &extracted.data).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：报告图像的像素数和可隐藏的最大文件长度。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_grid(&args.image)?;
    let (width, height) = picture.dimensions();

    println!(
        "{}: {}x{} pixels, can hide up to {} bytes",
        args.image.to_string_lossy().bold(),
        width,
        height,
        max_payload(height, width).to_string().green().bold()
    );
    info!(
        "{} pixels in total, {} reserved for the header",
        pixel_capacity(height, width),
        HEADER_LEN
    );
    Ok(())
}

/// 解码图像并转换为 8 位 RGB，丢弃 alpha 通道。
fn load_grid(path: &Path) -> Result<RgbImage> {
    let picture = image::open(path).map_err(|source| StegoError::SourceImageUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(picture.to_rgb8())
}

/// 读取待隐藏文件。文件不存在视为没有可隐藏的内容。
fn read_payload(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(anyhow::Error::new(
            StegoError::PayloadMissing,
        ))
        .with_context(|| {
            format!(
                "File to hide not found: {}",
                path.to_string_lossy().red().bold()
            )
        }),
        Err(e) => Err(e).with_context(|| {
            format!(
                "Unable to read file to hide: {}",
                path.to_string_lossy().red().bold()
            )
        }),
    }
}

/// 取出待隐藏文件的文件名部分，写入头部。
fn payload_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| StegoError::InvalidFileName(path.to_string_lossy().into_owned()))?;
    Ok(name.to_string())
}

/// 头部中的文件名不可信，只保留最后一个路径分量。
fn safe_file_name(name: &str) -> Result<PathBuf> {
    let file_name = Path::new(name).file_name().ok_or_else(|| {
        StegoError::CorruptHeader(format!("file name {name:?} is not a plain file name"))
    })?;
    Ok(PathBuf::from(file_name))
}

/// 默认输出路径：与输入图像同目录的 `doctored_<文件名>.png`。
fn default_hidden_path(image: &Path) -> Result<PathBuf> {
    let stem = image.file_stem().with_context(|| {
        format!(
            "Cannot derive an output name from: {}",
            image.to_string_lossy().red().bold()
        )
    })?;
    let file_name = format!(
        "{}{}.{}",
        DOCTORED_PREFIX,
        stem.to_string_lossy(),
        DEFAULT_IMAGE_EXTENSION
    );
    Ok(image.parent().unwrap_or(Path::new("")).join(file_name))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 低位数据只能在无损格式中保存下来。
fn ensure_lossless(path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Cannot determine the image format of: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        matches!(
            format,
            ImageFormat::Png
                | ImageFormat::Bmp
                | ImageFormat::Tiff
                | ImageFormat::WebP
                | ImageFormat::Qoi
        ),
        "Output format {} would destroy the hidden data. \nUse a lossless format such as PNG or BMP.",
        format!("{format:?}").red().bold()
    );
    Ok(())
}
