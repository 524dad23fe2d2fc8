use super::*;

fn frame(data: Vec<u8>, w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    }
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let f = frame(vec![100, 50, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0], 3, 1);
    let out = unpremultiply(&f);
    assert_eq!(&out[0..4], &[199, 100, 0, 128]);
    assert_eq!(&out[4..8], &[10, 20, 30, 255]);
    assert_eq!(&out[8..12], &[0, 0, 0, 0]);
}

#[test]
fn writes_png_with_frame_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("weave.png");
    let f = frame([0x11, 0x18, 0x27, 0xff].repeat(6), 3, 2);

    export_png(&f, &path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [0x11, 0x18, 0x27, 0xff]);
}

#[test]
fn rejects_mismatched_buffers() {
    let dir = tempfile::tempdir().unwrap();
    let f = frame(vec![0; 7], 2, 1);
    assert!(matches!(
        export_png(&f, &dir.path().join("bad.png")),
        Err(WeaveError::Render(_))
    ));
}
