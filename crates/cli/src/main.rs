use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use topograph::prelude::*;
use topograph::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Planar overlay runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Overlay two JSON geometries and write the JSON result
    Overlay {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long, value_enum)]
        op: OpArg,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = StrategyArg::MonotoneChainSweep)]
        strategy: StrategyArg,
        /// Snap computed intersections to a grid of 1/scale
        #[arg(long)]
        precision_scale: Option<f64>,
        /// Skip the final noding check
        #[arg(long)]
        no_validate: bool,
    },
    /// Write a random star polygon
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 12)]
        vertices: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpArg {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl From<OpArg> for OpCode {
    fn from(op: OpArg) -> Self {
        match op {
            OpArg::Intersection => OpCode::Intersection,
            OpArg::Union => OpCode::Union,
            OpArg::Difference => OpCode::Difference,
            OpArg::SymDifference => OpCode::SymDifference,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    AllPairs,
    SweepLine,
    MonotoneChainSweep,
}

impl From<StrategyArg> for IntersectorKind {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::AllPairs => IntersectorKind::AllPairs,
            StrategyArg::SweepLine => IntersectorKind::SweepLine,
            StrategyArg::MonotoneChainSweep => IntersectorKind::MonotoneChainSweep,
        }
    }
}

struct OverlayArgs {
    a: PathBuf,
    b: PathBuf,
    op: OpCode,
    out: PathBuf,
    cfg: OverlayCfg,
    precision: PrecisionModel,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Overlay {
            a,
            b,
            op,
            out,
            strategy,
            precision_scale,
            no_validate,
        } => {
            let args = OverlayArgs {
                a,
                b,
                op: op.into(),
                out,
                cfg: OverlayCfg {
                    strategy: strategy.into(),
                    validate_noding: !no_validate,
                },
                precision: precision_scale.map_or(PrecisionModel::Floating, PrecisionModel::fixed),
            };
            run_overlay(&args).map(|_| ())
        }
        Action::Random {
            seed,
            index,
            vertices,
            out,
        } => random(seed, index, vertices, &out),
        Action::Report => report(),
    }
}

fn read_geometry(path: &Path) -> Result<Geometry> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing geometry in {}", path.display()))
}

fn write_geometry(path: &Path, g: &Geometry) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(g)?).with_context(|| format!("writing {}", path.display()))
}

fn run_overlay(args: &OverlayArgs) -> Result<OverlayStats> {
    let a = read_geometry(&args.a)?;
    let b = read_geometry(&args.b)?;
    let factory = GeometryFactory::new(args.precision);
    let (result, stats) = overlay_with(&a, &b, args.op, args.cfg, factory)
        .with_context(|| format!("{} of {} and {}", args.op.name(), args.a.display(), args.b.display()))?;
    tracing::info!(
        op = args.op.name(),
        strategy = args.cfg.strategy.name(),
        result = result.geometry_type(),
        proper = stats.proper_intersections,
        "overlay"
    );
    write_geometry(&args.out, &result)?;
    provenance::write_sidecar(
        &args.out,
        provenance::Payload::new(json!({
            "op": args.op,
            "a": args.a,
            "b": args.b,
            "cfg": args.cfg,
            "precision": args.precision,
            "stats": stats,
        })),
    )?;
    Ok(stats)
}

fn random(seed: u64, index: u64, vertices: usize, out: &Path) -> Result<()> {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(vertices),
        ..StarCfg::default()
    };
    let g = draw_star_polygon(cfg, ReplayToken { seed, index })?;
    tracing::info!(seed, index, vertices, area = g.area(), "random");
    write_geometry(out, &g)?;
    provenance::write_sidecar(
        out,
        provenance::Payload::new(json!({ "seed": seed, "index": index, "vertices": vertices })),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": topograph::VERSION,
        "params": {},
        "outputs": []
    });
    tracing::info!("report");
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
