use anyhow::{bail, Result};
use std::env;
use std::fs;

use enigma_pose::config::Config;
use enigma_pose::landmark::LandmarkExtractor;
use enigma_pose::retarget::TrackCompiler;
use enigma_pose::rig::mixamo_reference;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: retarget_image <image> [tracks.json]");
    }
    let image_path = &args[1];
    let output_path = args.get(2);

    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Enigma Pose - Image Retarget ===");
    println!("画像: {}", image_path);
    println!("ポーズモデル: {}", config.detector.pose_model);
    println!("ハンドモデル: {}", config.detector.hand_model);

    let mut extractor = LandmarkExtractor::new(&config.detector)?;
    let result = extractor.extract_file(image_path)?;

    println!(
        "検出結果: body={}, hands={}",
        result.body.is_some(),
        result.hands.len()
    );

    let skeleton = mixamo_reference();
    let compiler = TrackCompiler::from_config(&config.detector);
    let tracks = compiler.compile_detection(&skeleton, &result);

    println!("コンパイル済みトラック: {}本", tracks.len());
    for track in &tracks {
        let value = track.values[0];
        println!(
            "  {} ({:.3}, {:.3}, {:.3}, {:.3})",
            track.target, value[0], value[1], value[2], value[3]
        );
    }

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&tracks)?;
        fs::write(path, json)?;
        println!("保存: {}", path);
    }

    Ok(())
}
