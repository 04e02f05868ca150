use std::fs;
use std::path::Path;

/// Pixel dimensions of an 8-bit FLIR ADAS thermal frame.
pub const FRAME_WIDTH: u32 = 640;
pub const FRAME_HEIGHT: u32 = 512;

/// Builds a minimal 8-bit grayscale BMP shaped like a thermal frame, so
/// the dimension probe reads real values from fixture images.
pub fn thermal_frame_bytes(width: u32, height: u32) -> Vec<u8> {
    // One byte per pixel, rows padded to a 4-byte boundary.
    let row_stride = width.div_ceil(4) * 4;
    let palette_size = 256 * 4;
    let pixel_offset: u32 = 14 + 40 + palette_size;
    let file_size = pixel_offset + row_stride * height;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&pixel_offset.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&(row_stride * height).to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&256u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    // Grayscale palette, one entry per intensity.
    for v in 0..=255u8 {
        bytes.extend_from_slice(&[v, v, v, 0]);
    }

    // Mid-gray pixel data stands in for thermal intensities.
    bytes.resize(file_size as usize, 0x80);
    bytes
}

pub fn write_thermal_frame(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("fixture parent dir");
    }
    fs::write(path, thermal_frame_bytes(width, height)).expect("write fixture frame");
}
