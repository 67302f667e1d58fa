//! Tether host
//!
//! Drives scripts against a native core when the native side does not own
//! the frame loop itself: loads the configured core library (or falls back
//! to the headless core), registers the demo content and pumps frames until
//! the window reports closed or the frame limit is hit.
//!
//! Run with: cargo run -p tether_host -- [frame-limit]

mod demo;

use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tether_native::{FfiBoundary, HeadlessCore, NativeBoundary, NativeLibrary, WindowState};
use tether_script::{Context, Runtime, RuntimeConfig};

/// Frames run by the headless core when no limit is given
const HEADLESS_FRAME_LIMIT: u64 = 300;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RuntimeConfig::load();
    let frame_limit = std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok());

    if let Err(e) = run(config, frame_limit) {
        log::error!("Host failed: {}", e);
        std::process::exit(1);
    }
}

/// Boundary for the configured native core
fn connect(config: &RuntimeConfig) -> Result<Arc<dyn NativeBoundary>, Box<dyn Error>> {
    match &config.native.library {
        Some(path) => {
            let library = NativeLibrary::load_with_symbol(path, &config.native.api_symbol)?;
            Ok(Arc::new(FfiBoundary::from_library(Arc::new(library))))
        }
        None => {
            log::warn!("No native library configured - using headless core");
            Ok(Arc::new(HeadlessCore::new()))
        }
    }
}

fn run(config: RuntimeConfig, frame_limit: Option<u64>) -> Result<(), Box<dyn Error>> {
    let headless = config.native.library.is_none();
    let limit = frame_limit.or(if headless {
        Some(HEADLESS_FRAME_LIMIT)
    } else {
        None
    });
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1)));

    let ctx = Context::new(connect(&config)?)?;
    let mut runtime = Runtime::new(ctx, config);
    demo::register(&mut runtime)?;
    runtime.start()?;

    let window = match runtime.ctx().state_hook::<WindowState>() {
        Ok(hook) => Some(hook),
        Err(e) => {
            log::warn!("Window state unavailable, relying on frame limit: {}", e);
            None
        }
    };

    loop {
        let started = Instant::now();

        if let Err(e) = runtime.update() {
            log::warn!("Frame {} failed: {}", runtime.frame(), e);
        }

        if let Some(hook) = &window {
            match hook.query() {
                Ok(state) if state.closed => {
                    log::info!("Window closed, shutting down...");
                    break;
                }
                Ok(_) => {}
                Err(e) => log::warn!("Reading window state failed: {}", e),
            }
        }

        if limit.map_or(false, |limit| runtime.frame() >= limit) {
            log::info!("Frame limit reached after {} frames", runtime.frame());
            break;
        }

        if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    runtime.stop()?;
    Ok(())
}
