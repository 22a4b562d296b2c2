//! Check camera, preview, overlay assets, and stamp font.

use chacha_capture_engine::source::webcam::{binary_available, detect_default_webcam_device};
use chacha_common::config::{config_file_path, AppConfig};
use chacha_render_engine::overlay_asset_path;
use chacha_render_engine::stamp::StampFont;
use chacha_session_model::Theme;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Chacha Photobooth System Check");
    println!("{}", "=".repeat(50));

    let mut ready = true;

    if binary_available("ffmpeg") {
        println!("[OK] ffmpeg found");
    } else {
        println!("[FAIL] ffmpeg not found on PATH (needed for webcam capture)");
        ready = false;
    }

    match (config.camera.preview, binary_available("ffplay")) {
        (false, _) => println!("[INFO] Live preview disabled in config"),
        (true, true) => println!("[OK] ffplay found (live preview)"),
        (true, false) => {
            println!("[WARN] ffplay not found on PATH (shooting works without a live preview)")
        }
    }

    match (&config.camera.device, detect_default_webcam_device()) {
        (Some(device), _) => println!("[OK] Camera device (configured): {device}"),
        (None, Some(device)) => println!("[OK] Camera device (detected): {device}"),
        (None, None) => {
            println!("[FAIL] No camera device found; set camera.device in the config");
            ready = false;
        }
    }
    println!(
        "     {}x{}, {}s countdown",
        config.camera.width, config.camera.height, config.camera.countdown_secs
    );

    for theme in Theme::ALL {
        let path = overlay_asset_path(&config.assets_dir, theme);
        if tokio::fs::metadata(&path).await.is_ok() {
            println!("[OK] {theme} overlay: {}", path.display());
        } else {
            println!(
                "[WARN] {theme} overlay missing: {} (strips will have no frame)",
                path.display()
            );
        }
    }

    match StampFont::resolve(config.stamp_font.as_deref()).await {
        Ok(font) => println!("[OK] Stamp font: {}", font.source()),
        Err(e) => println!("[WARN] Stamp font unusable: {e} (strips will have no date)"),
    }

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config file: {}", config_path.display());
    } else {
        println!(
            "[INFO] No config file at {} (run `chacha config --init`)",
            config_path.display()
        );
    }
    println!("     Strips are written to {}", config.output_dir.display());

    println!();
    if ready {
        println!("Camera is ready. Run `chacha shoot` to start.");
    } else {
        println!("Camera capture is unavailable. `chacha compose` still works.");
    }
    Ok(())
}
