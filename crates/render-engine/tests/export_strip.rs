use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use chacha_common::datestamp::DateStamp;
use chacha_render_engine::export::{export_strip, strip_file_name, ExportStage};
use chacha_render_engine::layout::StripLayout;
use chacha_render_engine::stamp::StampFont;
use chacha_render_engine::StripCompositor;
use chacha_session_model::{CapturedPhoto, Theme};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chacha-export-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

fn camera_photo(slot: usize, rgb: [u8; 3]) -> CapturedPhoto {
    let img = RgbImage::from_pixel(320, 180, Rgb(rgb));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .expect("jpeg encode should succeed");
    CapturedPhoto::new(slot, 320, 180, out.into_inner())
}

/// Overlay with an opaque frame border and a transparent interior.
fn write_overlay(dir: &PathBuf, theme: Theme) {
    let (w, h) = (120, 315);
    let mut overlay = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    for x in 0..w {
        for y in 0..h {
            if x < 4 || x >= w - 4 || y < 4 || y >= h - 4 {
                overlay.put_pixel(x, y, Rgba([250, 200, 210, 255]));
            }
        }
    }
    overlay
        .save(dir.join(theme.overlay_asset()))
        .expect("overlay should be writable");
}

#[tokio::test]
async fn three_photo_strip_has_every_layer() {
    chacha_common::logging::init_default_logging();
    let assets = scratch_dir("assets");
    write_overlay(&assets, Theme::Pink);

    let font = StampFont::resolve(None).await.expect("a stamp font always resolves");
    let compositor = StripCompositor::new(StripLayout::default(), &assets)
        .expect("default layout is valid")
        .with_font(Some(font));

    let photos = vec![
        camera_photo(0, [200, 40, 40]),
        camera_photo(1, [40, 200, 40]),
        camera_photo(2, [40, 40, 200]),
    ];
    let date = DateStamp::today();
    let stages = Mutex::new(Vec::new());
    let record = |stage: ExportStage| stages.lock().unwrap().push(stage);

    let artifact = export_strip(&compositor, &photos, Theme::Pink, &date, Some(&record))
        .await
        .expect("export should succeed")
        .expect("three photos should produce an artifact");

    assert_eq!(
        *stages.lock().unwrap(),
        vec![
            ExportStage::Compositing,
            ExportStage::Encoding,
            ExportStage::Complete
        ]
    );
    assert_eq!(artifact.file_name, strip_file_name(&date));
    assert_eq!(
        artifact.file_name,
        format!("chacha-photobooth-{}.png", date.file_safe())
    );
    assert_eq!((artifact.width, artifact.height), (1200, 3150));
    assert_eq!(artifact.report.photos_drawn(), 3);
    assert!(artifact.report.overlay.is_drawn());
    assert!(artifact.report.stamp.is_drawn());
    assert!(artifact.report.is_complete());

    let strip = image::load_from_memory_with_format(&artifact.png, ImageFormat::Png)
        .expect("artifact should be a PNG")
        .to_rgba8();
    assert_eq!(strip.dimensions(), (1200, 3150));

    // Slot centres carry their photo colours.
    let centres = [(600, 655), (600, 1555), (600, 2455)];
    let dominant = [0usize, 1, 2];
    for ((x, y), channel) in centres.iter().zip(dominant) {
        let px = strip.get_pixel(*x, *y);
        assert!(px[channel] > 150, "slot at y={y} missing its photo: {px:?}");
    }

    // White background between slots, overlay border on the edge.
    assert_eq!(*strip.get_pixel(600, 1100), Rgba([255, 255, 255, 255]));
    let border = strip.get_pixel(5, 1500);
    assert_eq!(border[3], 255);
    assert!(border[0].abs_diff(250) <= 2 && border[1].abs_diff(200) <= 2);

    let stamped = (2990..3100)
        .flat_map(|y| (300..900).map(move |x| (x, y)))
        .any(|(x, y)| {
            let px = strip.get_pixel(x, y);
            px[0] < 230 && px[0] > 120 && px[1] < 150
        });
    assert!(stamped, "pink date stamp should be visible near the bottom");

    let out_dir = scratch_dir("out");
    let written = artifact.save_to(&out_dir).await.expect("save should work");
    assert!(written.ends_with(&artifact.file_name));
    assert!(written.exists());

    let _ = std::fs::remove_dir_all(&assets);
    let _ = std::fs::remove_dir_all(&out_dir);
}

#[tokio::test]
async fn missing_overlay_degrades_instead_of_failing() {
    let assets = scratch_dir("no-overlay");
    let compositor = StripCompositor::new(StripLayout::default(), &assets).unwrap();
    let photos = vec![camera_photo(0, [200, 40, 40])];

    let artifact = export_strip(&compositor, &photos, Theme::Blue, &DateStamp::today(), None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(artifact.report.photos_drawn(), 1);
    assert!(!artifact.report.overlay.is_drawn());
    assert!(!artifact.report.is_complete());
    let _ = std::fs::remove_dir_all(&assets);
}
