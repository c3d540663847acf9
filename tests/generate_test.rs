//! End-to-end generation tests: config in, PNG files out.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use color_placement::{ColorSpace, StartPosition, StrategyKind};
use every_color::models::GenerationConfig;
use every_color::services::Generator;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Decode an 8-bit RGB PNG into its dimensions and pixel triples.
fn read_png(path: &Path) -> (u32, u32, Vec<[u8; 3]>) {
    let decoder = png::Decoder::new(File::open(path).expect("Failed to open PNG"));
    let mut reader = decoder.read_info().expect("Failed to read PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("Failed to decode PNG");
    assert_eq!(info.color_type, png::ColorType::Rgb);
    let pixels = buf[..info.buffer_size()]
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    (info.width, info.height, pixels)
}

fn assert_every_color_once(pixels: &[[u8; 3]], bits: u32) {
    let expected: HashSet<[u8; 3]> = ColorSpace::new(bits)
        .unwrap()
        .colors()
        .iter()
        .map(|c| c.channels())
        .collect();
    let distinct: HashSet<[u8; 3]> = pixels.iter().copied().collect();
    assert_eq!(pixels.len(), expected.len(), "pixel count");
    assert_eq!(distinct.len(), pixels.len(), "a color appears twice");
    assert!(distinct == expected, "pixels differ from the color space");
}

fn config(dir: &TempDir) -> GenerationConfig {
    GenerationConfig {
        bits: 9,
        seed: Some(7),
        output: dir.path().join("out"),
        ..Default::default()
    }
}

#[test]
fn test_generates_every_color_once() {
    let dir = TempDir::new().unwrap();
    let images = Generator::with_stamp(config(&dir), "20240101-120000")
        .run()
        .unwrap();

    assert_eq!(images.len(), 1);
    let image = &images[0];
    assert!(image.completed);
    assert_eq!(image.seed, 7);
    assert_eq!(
        image.path,
        dir.path().join("out").join("20240101-120000-every-color.png")
    );

    let (width, height, pixels) = read_png(&image.path);
    assert_eq!((width, height), (32, 16));
    assert_every_color_once(&pixels, 9);
}

#[test]
fn test_multiple_images_with_checkpoints() {
    let dir = TempDir::new().unwrap();
    let config = GenerationConfig {
        count: 2,
        checkpoints: 3,
        strategy: StrategyKind::CubeWalk,
        start_position: StartPosition::Random,
        ..config(&dir)
    };
    let images = Generator::with_stamp(config, "stamp").run().unwrap();

    let names: Vec<String> = images
        .iter()
        .map(|i| i.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["stamp-every-color-1.png", "stamp-every-color-2.png"]);
    assert_eq!(images[0].seed, 7);
    assert_eq!(images[1].seed, 8);

    for image in &images {
        let (_, _, pixels) = read_png(&image.path);
        assert_every_color_once(&pixels, 9);

        // 512 colors: checkpoints at 128, 256 and 384
        let percents: Vec<String> = image
            .checkpoints
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        let stem = image.path.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(
            percents,
            vec![
                format!("{stem}-progress-25.00.png"),
                format!("{stem}-progress-50.00.png"),
                format!("{stem}-progress-75.00.png"),
            ]
        );

        // a checkpoint shows a quarter of the colors on a black background
        let (_, _, partial) = read_png(&image.checkpoints[0]);
        let lit = partial.iter().filter(|p| **p != [0, 0, 0]).count();
        assert!(lit == 127 || lit == 128, "{lit} non-background pixels");
    }
}

#[test]
fn test_same_seed_same_png() {
    let dir = TempDir::new().unwrap();
    let first = Generator::with_stamp(config(&dir), "a").run().unwrap();
    let second = Generator::with_stamp(config(&dir), "b").run().unwrap();

    assert_eq!(read_png(&first[0].path), read_png(&second[0].path));
}

#[test]
fn test_stop_file_writes_partial_image() {
    let dir = TempDir::new().unwrap();
    let stop = dir.path().join("stop");
    std::fs::write(&stop, "").unwrap();
    let config = GenerationConfig {
        count: 3,
        stop_file: Some(stop),
        ..config(&dir)
    };

    let images = Generator::with_stamp(config, "s").run().unwrap();

    assert_eq!(images.len(), 1, "remaining images are skipped");
    assert!(!images[0].completed);
    assert!(images[0]
        .path
        .to_string_lossy()
        .ends_with("s-every-color-1-partial.png"));
    let (width, height, pixels) = read_png(&images[0].path);
    assert_eq!((width, height), (32, 16));
    assert!(pixels.iter().all(|p| *p == [0, 0, 0]));
}

#[test]
fn test_optimized_output_decodes_identically() {
    let dir = TempDir::new().unwrap();
    let plain = Generator::with_stamp(config(&dir), "plain").run().unwrap();
    let optimized = Generator::with_stamp(
        GenerationConfig {
            optimize: true,
            ..config(&dir)
        },
        "optimized",
    )
    .run()
    .unwrap();

    assert_eq!(read_png(&plain[0].path), read_png(&optimized[0].path));
}

#[test]
fn test_invalid_bit_depth_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let config = GenerationConfig {
        bits: 10,
        ..config(&dir)
    };
    let error = Generator::with_stamp(config, "x").run().unwrap_err();
    assert!(error.to_string().contains("not divisible by 3"), "{error}");

    assert!(!dir.path().join("out").exists(), "output directory was created");
}
