//! Image I/O regression test
//!
//! Lossless formats (PNG, BMP, PNM, TGA) must reproduce the samples
//! exactly; JPEG must keep the shape and stay close to the source.

use histeq_core::Image;
use histeq_io::{
    ImageFormat, IoError, detect_format, read_image, read_image_from_bytes, write_image,
    write_image_to_bytes,
};
use histeq_test::{RegParams, gradient, noise, regout_dir};

#[test]
fn io_reg() {
    let mut rp = RegParams::new("io");

    // --- Test 1: lossless formats through memory ---
    eprintln!("=== Lossless in memory ===");
    let gray = noise(31, 17, 1, 3).expect("noise");
    let rgb = gradient(31, 17, 3).expect("gradient");
    for format in [
        ImageFormat::Png,
        ImageFormat::Bmp,
        ImageFormat::Pnm,
        ImageFormat::Tga,
    ] {
        for img in [&gray, &rgb] {
            let bytes = write_image_to_bytes(img, format).expect("encode");
            let back = read_image_from_bytes(&bytes).expect("decode");
            rp.compare_images(img, &back);
        }
    }

    // --- Test 2: alpha survives PNG and BMP ---
    eprintln!("=== Alpha ===");
    let rgba = noise(9, 5, 4, 8).expect("noise");
    for format in [ImageFormat::Png, ImageFormat::Bmp, ImageFormat::Tga] {
        let bytes = write_image_to_bytes(&rgba, format).expect("encode");
        let back = read_image_from_bytes(&bytes).expect("decode");
        rp.compare_images(&rgba, &back);
    }

    // --- Test 3: JPEG keeps the shape ---
    eprintln!("=== JPEG ===");
    let smooth = gradient(40, 24, 3).expect("gradient");
    let bytes = write_image_to_bytes(&smooth, ImageFormat::Jpeg).expect("encode");
    let back = read_image_from_bytes(&bytes).expect("decode");
    rp.compare_values(40.0, back.width() as f64, 0.0);
    rp.compare_values(24.0, back.height() as f64, 0.0);
    rp.compare_values(3.0, back.channels() as f64, 0.0);

    // --- Test 4: files on disk, format taken from the extension ---
    eprintln!("=== Files ===");
    let path = format!("{}/io_roundtrip.ppm", regout_dir());
    write_image(&rgb, &path, ImageFormat::Unknown).expect("write");
    let detected = detect_format(&path).expect("detect");
    rp.compare_values(1.0, if detected == ImageFormat::Pnm { 1.0 } else { 0.0 }, 0.0);
    let back = read_image(&path).expect("read");
    rp.compare_images(&rgb, &back);

    let path = format!("{}/io_roundtrip.tga", regout_dir());
    write_image(&gray, &path, ImageFormat::Unknown).expect("write");
    let detected = detect_format(&path).expect("detect");
    rp.compare_values(1.0, if detected == ImageFormat::Tga { 1.0 } else { 0.0 }, 0.0);
    let back = read_image(&path).expect("read");
    rp.compare_images(&gray, &back);

    assert!(rp.cleanup());
}

#[test]
fn io_errors() {
    assert!(matches!(
        read_image_from_bytes(b"not an image"),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert!(read_image("/nonexistent/path/image.png").is_err());

    // headers that claim far more data than the file holds
    for bytes in [
        &b"P6\n4294967295 4294967295\n255\n\x00"[..],
        &b"P5\n4000000 4000000\n255\n\x00"[..],
    ] {
        assert!(matches!(
            read_image_from_bytes(bytes),
            Err(IoError::InvalidData(_))
        ));
    }
    let mut bmp = b"BM".to_vec();
    bmp.extend_from_slice(&[0; 8]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&100_000i32.to_le_bytes());
    bmp.extend_from_slice(&100_000i32.to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(&[0; 24]);
    assert!(matches!(
        read_image_from_bytes(&bmp),
        Err(IoError::InvalidData(_))
    ));

    let two = Image::new(2, 2, 2).expect("image");
    assert!(write_image_to_bytes(&two, ImageFormat::Pnm).is_err());
}
