#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

/// Write a solid-colour PNG fixture and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba(rgba))
        .save(&path)
        .expect("write png fixture");
    path
}

/// Read back an output image as RGBA8.
pub fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path).expect("open output image").to_rgba8()
}

/// Entry names of a ZIP archive, in archive order.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).expect("open archive");
    let mut archive = zip::ZipArchive::new(file).expect("read archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("archive entry").name().to_string())
        .collect()
}
