// renes - NES emulator entry point

use log::{error, info};
use renes::display::{run_window, WindowConfig};
use renes::emulator::Emulator;
use std::env;
use std::process;

fn print_usage(program: &str) {
    eprintln!("Usage: {} <rom.nes> [--scale N] [--no-audio]", program);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("renes");

    let mut rom_path: Option<String> = None;
    let mut scale_override: Option<u32> = None;
    let mut audio_enabled = true;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scale" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(scale) => scale_override = Some(scale),
                None => {
                    print_usage(program);
                    process::exit(2);
                }
            },
            "--no-audio" => audio_enabled = false,
            "--help" | "-h" => {
                print_usage(program);
                return;
            }
            other if rom_path.is_none() => rom_path = Some(other.to_string()),
            _ => {
                print_usage(program);
                process::exit(2);
            }
        }
    }

    let Some(rom_path) = rom_path else {
        print_usage(program);
        process::exit(2);
    };

    let mut emulator = Emulator::new();
    if let Err(e) = emulator.load_rom(&rom_path) {
        error!("failed to load {}: {}", rom_path, e);
        process::exit(1);
    }

    let mut config = emulator.config().clone();
    config.sanitize();
    if let Some(scale) = scale_override {
        config.video.scale = scale.clamp(1, 4);
    }

    #[cfg(feature = "audio")]
    let _audio = if audio_enabled && config.audio.enabled {
        match renes::audio::AudioOutput::start(
            emulator.apu_handle(),
            renes::audio::AudioOutputConfig {
                volume: config.audio.volume,
                ..Default::default()
            },
        ) {
            Ok(output) => Some(output),
            Err(e) => {
                error!("audio disabled: {}", e);
                None
            }
        }
    } else {
        None
    };
    #[cfg(not(feature = "audio"))]
    let _ = audio_enabled;

    let mut window_config = WindowConfig::new().with_scale(config.video.scale);
    window_config.vsync = config.video.vsync;
    info!(
        "starting {} at {}x{}",
        rom_path,
        window_config.window_width(),
        window_config.window_height()
    );

    if let Err(e) = run_window(emulator, window_config) {
        error!("window error: {}", e);
        process::exit(1);
    }
}
