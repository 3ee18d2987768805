use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn format_follows_extension() {
    assert_eq!(
        ImageFormatChoice::from_path(Path::new("out.JPG")).unwrap(),
        ImageFormatChoice::Jpeg
    );
    assert_eq!(
        ImageFormatChoice::from_path(Path::new("a/b.jpeg")).unwrap(),
        ImageFormatChoice::Jpeg
    );
    assert_eq!(
        ImageFormatChoice::from_path(Path::new("out.png")).unwrap(),
        ImageFormatChoice::Png
    );
    assert!(ImageFormatChoice::from_path(Path::new("out.gif")).is_err());
    assert!(ImageFormatChoice::from_path(Path::new("out")).is_err());
}

#[test]
fn png_keeps_straight_rgba() {
    let frame = solid(3, 2, [128, 0, 0, 128]);
    let bytes = encode_frame(&frame, ImageFormatChoice::Png, 80).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    let px = decoded.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert!(px[0] >= 254, "{px:?}");
}

#[test]
fn jpeg_drops_alpha_and_decodes() {
    let frame = solid(16, 16, [0, 0, 255, 255]);
    let bytes = encode_frame(&frame, ImageFormatChoice::Jpeg, 90).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    let px = decoded.get_pixel(8, 8).0;
    assert!(px[2] > 200 && px[0] < 40, "{px:?}");
}

#[test]
fn jpeg_quality_changes_output_size() {
    let mut frame = solid(32, 32, [0, 0, 0, 255]);
    for (i, b) in frame.data.iter_mut().enumerate() {
        if i % 4 != 3 {
            *b = (i * 37 % 251) as u8;
        }
    }
    let low = encode_frame(&frame, ImageFormatChoice::Jpeg, 5).unwrap();
    let high = encode_frame(&frame, ImageFormatChoice::Jpeg, 100).unwrap();
    assert!(low.len() < high.len());
}

#[test]
fn rejects_bad_quality_and_short_buffers() {
    let frame = solid(2, 2, [0, 0, 0, 255]);
    assert!(encode_frame(&frame, ImageFormatChoice::Jpeg, 0).is_err());

    let short = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: true,
    };
    assert!(matches!(
        encode_frame(&short, ImageFormatChoice::Png, 80),
        Err(RemnantError::Render(_))
    ));
}
