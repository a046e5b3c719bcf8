//! Example: Print the primitives of one frame without entering the terminal UI
//!
//! Usage: cargo run --example dump_frame -- [axes-file] [active-axes]

use std::env;
use std::fs;
use std::io;

use axiscube_core::{parse_axes, update, CameraSettings, Message, Model, Primitive};
use axiscube_terminal::default_axes;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let axes = match args.get(1) {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            parse_axes(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
        }
        None => {
            eprintln!("No axes file provided, using the built-in axes...");
            default_axes()
        }
    };

    let mut model = Model::new(axes);
    if let Some(active) = args.get(2).and_then(|a| a.parse().ok()) {
        model = update(&model, Message::SetActive(active))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    }

    let frame = model.frame(&CameraSettings::default(), 800.0, 600.0);
    println!(
        "{} active axes: {} lines, {} points",
        model.active,
        frame.line_count(),
        frame.point_count()
    );

    for primitive in frame.draw_order() {
        match primitive {
            Primitive::Line { start, end, color, dashed, axis, .. } => println!(
                "line  axis {:>2} {} {:>8.1} {:>8.1} -> {:>8.1} {:>8.1}{}",
                axis,
                color.to_css(),
                start.x,
                start.y,
                end.x,
                end.y,
                if *dashed { " (dashed)" } else { "" }
            ),
            Primitive::Point { center, radius, fill, axis, .. } => println!(
                "point axis {:>2} {} {:>8.1} {:>8.1} r={}",
                axis.map_or("--".to_string(), |a| a.to_string()),
                fill.to_css(),
                center.x,
                center.y,
                radius
            ),
        }
    }

    Ok(())
}
