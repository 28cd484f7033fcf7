//! ChakraTrack demo binary.
//!
//! Tracks a point rotating on a circle from noisy angle measurements and
//! logs the true, measured, predicted and corrected points each cycle.
//! Typing any line on stdin resets the tracking; `q` (or Ctrl-C) stops.

use chakra_track::config::TrackerConfig;
use chakra_track::io::{spawn_stdin_input, ChannelInput, CsvRenderer, InputEvent, LogRenderer, Renderer};
use chakra_track::session::TrackingSession;
use crossbeam_channel::bounded;
use std::fs::File;
use std::io::Write;
use std::path::Path;

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
    cycles: Option<u64>,
    csv_path: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args {
        config_path: None,
        seed: None,
        cycles: None,
        csv_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    result.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    result.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--cycles" => {
                if i + 1 < args.len() {
                    result.cycles = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--csv" => {
                if i + 1 < args.len() {
                    result.csv_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    result
}

fn print_help() {
    println!("chakra-track {} - Kalman tracking of a rotating point", env!("CARGO_PKG_VERSION"));
    println!();
    println!("    The point moves in a circle and is characterized by a 1D angle state.");
    println!("    angle_k+1 = angle_k + velocity + process_noise N(0, 1e-5)");
    println!("    The angular velocity is constant.");
    println!("    The measurement is the true angle + gaussian noise N(0, 1e-1).");
    println!("    Each cycle logs the distances from the true point to the measured,");
    println!("    predicted and corrected points; if the filter works correctly the");
    println!("    corrected distance stays below the predicted, which stays below");
    println!("    the measured.");
    println!();
    println!("USAGE:");
    println!("    chakra-track [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     Configuration file (default: chakra-track.toml)");
    println!("        --seed <N>          Noise seed override (0 = entropy)");
    println!("        --cycles <N>        Stop after N cycles");
    println!("        --csv <FILE>        Also write frames as CSV");
    println!("    -h, --help              Print help information");
    println!();
    println!("INPUT:");
    println!("    Any stdin line resets the tracking; 'q' or Ctrl-C stops.");
}

fn load_config(args: &Args) -> TrackerConfig {
    match &args.config_path {
        Some(path) => match TrackerConfig::load(Path::new(path)) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config {}: {}", path, e);
                TrackerConfig::default()
            }
        },
        None => {
            for path in &["chakra-track.toml", "/etc/chakra-track.toml"] {
                if let Ok(cfg) = TrackerConfig::load(Path::new(path)) {
                    log::info!("Loaded config from {}", path);
                    return cfg;
                }
            }
            TrackerConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = parse_args();
    let config = load_config(&args);

    let mut session_config = config.session_config();
    if let Some(seed) = args.seed {
        session_config.seed = seed;
    }
    if let Some(cycles) = args.cycles {
        session_config.max_cycles = Some(cycles);
    }

    log::info!("chakra-track starting");
    log::info!(
        "  Scenario: angle {:.3} rad, velocity {:.3} rad/cycle, seed {}",
        session_config.initial_angle,
        session_config.initial_velocity,
        session_config.seed
    );
    log::info!(
        "  Noise: process {:.1e}, measurement {:.1e}",
        session_config.process_noise_var,
        session_config.measurement_noise_var
    );
    log::info!(
        "  Cycle period: {} ms",
        session_config.cycle_period.as_millis()
    );

    // Input channel: stdin lines plus the Ctrl-C stop signal.
    let (tx, rx) = bounded(8);
    let ctrlc_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = ctrlc_tx.send(InputEvent::Stop);
    }) {
        log::warn!("failed to install Ctrl-C handler: {}", e);
    }
    let stdin_thread = spawn_stdin_input(tx);
    let mut input = ChannelInput::new(rx);

    let mut renderer: Box<dyn Renderer> = match &args.csv_path {
        Some(path) => match File::create(path) {
            Ok(file) => {
                log::info!("  CSV output: {}", path);
                Box::new(CsvRenderer::new(file))
            }
            Err(e) => {
                log::warn!("failed to create CSV file {}: {}", path, e);
                Box::new(LogRenderer)
            }
        },
        None => Box::new(LogRenderer),
    };

    let mut session = match TrackingSession::new(session_config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("session initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    match session.run(&mut *renderer, &mut input) {
        Ok(summary) => {
            log::info!(
                "chakra-track done: {} cycles, rmse measured={:.4} predicted={:.4} corrected={:.4}",
                summary.cycles,
                summary.rmse_measured,
                summary.rmse_predicted,
                summary.rmse_corrected,
            );
        }
        Err(e) => {
            log::error!("session aborted: {}", e);
            std::process::exit(1);
        }
    }

    // stdin thread ends when stdin closes; don't block shutdown on it.
    drop(stdin_thread);
}
