//! Print all four overlays of two overlapping squares, or of two random stars.
//!
//! Usage:
//!   cargo run -p topograph --example two_squares
//!   cargo run -p topograph --example two_squares -- stars 42
//!
//! Prints, per operation, the result type, area and noding counters.

use topograph::prelude::*;
use topograph::rand::{draw_star_polygon, ReplayToken, StarCfg};

fn main() {
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "squares".to_string());
    let inputs = match mode.as_str() {
        "squares" => squares(),
        "stars" => {
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
            stars(seed)
        }
        _ => {
            eprintln!("usage: two_squares [squares|stars [seed]]");
            return;
        }
    };
    let (a, b) = match inputs {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("bad input: {e}");
            return;
        }
    };
    println!("a: area={:.4}  b: area={:.4}", a.area(), b.area());
    for op in OpCode::ALL {
        match overlay_with(&a, &b, op, OverlayCfg::default(), GeometryFactory::default()) {
            Ok((g, stats)) => println!(
                "{:>14}: {:<18} area={:.4} proper={} nodes={}",
                op.name(),
                g.geometry_type(),
                g.area(),
                stats.proper_intersections,
                stats.nodes
            ),
            Err(e) => println!("{:>14}: error: {e}", op.name()),
        }
    }
}

fn squares() -> topograph::Result<(Geometry, Geometry)> {
    Ok((Geometry::rect(0.0, 0.0, 2.0, 2.0)?, Geometry::rect(1.0, 1.0, 3.0, 3.0)?))
}

fn stars(seed: u64) -> topograph::Result<(Geometry, Geometry)> {
    let a = draw_star_polygon(StarCfg::default(), ReplayToken { seed, index: 0 })?;
    let b = draw_star_polygon(
        StarCfg {
            center: (0.5, 0.25),
            ..StarCfg::default()
        },
        ReplayToken { seed, index: 1 },
    )?;
    Ok((a, b))
}
