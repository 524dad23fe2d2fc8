use super::*;
use crate::model::placement::WordPlacement;

fn two_words() -> Snapshot {
    Snapshot::new(vec![
        WordPlacement::new("world", 0.9, 0.5, "hsl(0, 100%, 50%)").with_timestamp(2),
        WordPlacement::new("hello", 0.1, 0.5, "hsl(120, 100%, 50%)").with_timestamp(1),
    ])
}

#[test]
fn transparent_render_of_single_word_is_blank() {
    let mut backend = CpuBackend::default();
    let one = Snapshot::new(vec![WordPlacement::new("solo", 0.5, 0.5, "#ffffff")]);
    let frame = backend
        .render(&one, SurfaceSize::new(32.0, 32.0), false)
        .unwrap();
    assert_eq!((frame.width, frame.height), (32, 32));
    assert!(frame.premultiplied);
    assert!(frame.is_blank());
}

#[test]
fn opaque_render_fills_background() {
    let mut backend = CpuBackend::default();
    let frame = backend
        .render(&Snapshot::empty(), SurfaceSize::new(8.0, 8.0), true)
        .unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0x11, 0x18, 0x27, 0xff]));
    assert_eq!(frame.pixel(7, 7), Some([0x11, 0x18, 0x27, 0xff]));
}

#[test]
fn segment_is_stroked_in_newer_color() {
    let mut backend = CpuBackend::default();
    let frame = backend
        .render(&two_words(), SurfaceSize::new(64.0, 64.0), false)
        .unwrap();

    let mid = frame.pixel(32, 32).unwrap();
    assert!(mid[3] > 0, "segment should cover the middle");
    assert!(mid[0] > mid[1], "newer endpoint is red");
    assert!(mid[3] < 255, "strokes are translucent");

    assert_eq!(frame.pixel(32, 2), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(32, 62), Some([0, 0, 0, 0]));
}

#[test]
fn render_is_deterministic_and_follows_resize() {
    let mut backend = CpuBackend::default();
    let a = backend
        .render(&two_words(), SurfaceSize::new(40.0, 20.0), true)
        .unwrap();
    let b = backend
        .render(&two_words(), SurfaceSize::new(40.0, 20.0), true)
        .unwrap();
    assert_eq!(a.data, b.data);

    let hi = backend
        .render(
            &two_words(),
            SurfaceSize::new(40.0, 20.0).with_device_pixel_ratio(2.0),
            true,
        )
        .unwrap();
    assert_eq!((hi.width, hi.height), (80, 40));
    let mid = hi.pixel(40, 20).unwrap();
    assert_ne!(mid, [0x11, 0x18, 0x27, 0xff]);
}

#[test]
fn unparseable_colors_fall_back_instead_of_failing() {
    let mut backend = CpuBackend::default();
    let snap = Snapshot::new(vec![
        WordPlacement::new("b", 0.9, 0.5, "not-a-color"),
        WordPlacement::new("a", 0.1, 0.5, "#ffffff"),
    ]);
    let frame = backend
        .render(&snap, SurfaceSize::new(32.0, 32.0), false)
        .unwrap();
    assert!(frame.pixel(16, 16).unwrap()[3] > 0);
}

#[test]
fn invalid_surface_is_a_render_or_validation_error() {
    let mut backend = CpuBackend::default();
    assert!(
        backend
            .render(&two_words(), SurfaceSize::new(0.0, 10.0), false)
            .is_err()
    );
}

#[test]
fn opaque_background_survives_stroked_segments() {
    let mut backend = CpuBackend::default();
    let frame = backend
        .render(&two_words(), SurfaceSize::new(64.0, 64.0), true)
        .unwrap();
    for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
        assert_eq!(frame.pixel(x, y), Some([0x11, 0x18, 0x27, 0xff]), "corner ({x},{y})");
    }
    let mid = frame.pixel(32, 32).unwrap();
    assert_eq!(mid[3], 0xff);
    assert_ne!(mid, [0x11, 0x18, 0x27, 0xff]);
}

#[test]
fn transparent_render_after_opaque_one_is_cleared() {
    let mut backend = CpuBackend::default();
    backend
        .render(&two_words(), SurfaceSize::new(16.0, 16.0), true)
        .unwrap();
    let frame = backend
        .render(&Snapshot::empty(), SurfaceSize::new(16.0, 16.0), false)
        .unwrap();
    assert!(frame.is_blank());
}

fn marked() -> CpuBackend {
    CpuBackend::new(WeaveStyle {
        show_words: true,
        ..WeaveStyle::default()
    })
}

#[test]
fn markers_are_off_by_default() {
    let one = Snapshot::new(vec![WordPlacement::new("solo", 0.5, 0.5, "#00ff00")]);
    let frame = CpuBackend::default()
        .render(&one, SurfaceSize::new(32.0, 32.0), false)
        .unwrap();
    assert!(frame.is_blank());
}

#[test]
fn show_words_marks_a_single_word_in_its_color() {
    let one = Snapshot::new(vec![WordPlacement::new("solo", 0.5, 0.5, "#00ff00")]);
    let frame = marked()
        .render(&one, SurfaceSize::new(32.0, 32.0), false)
        .unwrap();
    assert_eq!(frame.pixel(16, 16), Some([0, 0xff, 0, 0xff]));
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
}

const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

#[test]
fn labels_are_drawn_above_their_marker() {
    let Ok(bytes) = std::fs::read(SYSTEM_FONT) else {
        eprintln!("skipping: {SYSTEM_FONT} not available");
        return;
    };
    let font = LabelFont::from_bytes(bytes).unwrap();
    assert!(!font.family().is_empty());

    let one = Snapshot::new(vec![WordPlacement::new("WWW", 0.5, 0.8, "#ff0000")]);
    let size = SurfaceSize::new(96.0, 64.0);
    let without = marked().render(&one, size, false).unwrap();
    let with = marked()
        .with_label_font(font)
        .render(&one, size, false)
        .unwrap();

    // Label sits in the band above the marker at y = 51.2.
    let inked = |f: &FrameRGBA| {
        (20..44)
            .flat_map(|y| (0..96).map(move |x| (x, y)))
            .filter(|&(x, y)| f.pixel(x, y).is_some_and(|p| p[3] > 0))
            .count()
    };
    assert_eq!(inked(&without), 0);
    assert!(inked(&with) > 20);
}

#[test]
fn garbage_font_bytes_are_rejected() {
    assert!(LabelFont::from_bytes(b"not a font".to_vec()).is_err());
}
