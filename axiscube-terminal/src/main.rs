//! Axiscube terminal viewer
//!
//! Usage: `axiscube-terminal [axes-file]`
//!
//! Shows the hypercube spanned by the axes of a descriptor file, or by a
//! built-in set of common variable font axes.
//! Controls:
//!   - WASD / Arrow Keys / mouse drag: orbit
//!   - Tab, 1-9: select an axis; +/-: change its value; [ ]: change its distance
//!   - n/N: more/fewer active axes; p/P: more/less perspective; o: toggle projection
//!   - Q/ESC: Quit

use std::env;
use std::fs;
use std::io;

use axiscube_core::parse_axes;
use axiscube_terminal::{default_axes, AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    let path = env::args().nth(1).or_else(|| config.view.axes_file.clone());
    let axes = match path {
        Some(path) => {
            log::info!("loading axes from {}", path);
            let text = fs::read_to_string(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("Failed to read axes file {}: {}", path, e))
            })?;
            parse_axes(&text).map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse {}: {}", path, e))
            })?
        }
        None => default_axes(),
    };

    println!("Axiscube - {} axes, press Q to quit...", axes.len());
    std::thread::sleep(std::time::Duration::from_millis(500));

    let mut app = TerminalApp::new(axes, config)?;
    app.run()
}
