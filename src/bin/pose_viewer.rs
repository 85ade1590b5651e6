use anyhow::{bail, Result};
use std::env;
use std::thread;
use std::time::Duration;

use enigma_pose::config::Config;
use enigma_pose::landmark::LandmarkExtractor;
use enigma_pose::render::MinifbRenderer;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: pose_viewer <image>");
    }
    let image_path = &args[1];

    let config = Config::load_or_default(CONFIG_PATH);

    println!("Pose Viewer");
    println!("Press ESC to exit");

    println!("Loading image {}...", image_path);
    let frame = image::open(image_path)?.to_rgb8();
    println!("Image: {}x{}", frame.width(), frame.height());

    let mut extractor = LandmarkExtractor::new(&config.detector)?;
    let result = extractor.extract_image(&frame)?;
    println!(
        "Detections: body={}, hands={}",
        result.body.is_some(),
        result.hands.len()
    );
    if let Some(body) = &result.body {
        println!("Avg visibility: {:.2}", body.average_visibility());
    }

    let mut renderer = MinifbRenderer::new(
        "Pose Viewer",
        frame.width() as usize,
        frame.height() as usize,
    )?;

    renderer.draw_frame(&frame);
    if let Some(body) = &result.body {
        renderer.draw_body(body, config.detector.min_visibility);
    }
    for hand in &result.hands {
        renderer.draw_hand(&hand.landmarks);
    }

    while renderer.is_open() {
        renderer.update()?;
        thread::sleep(Duration::from_millis(16));
    }

    println!("Shutting down...");
    Ok(())
}
