//! Runs a demo headlessly and prints the resulting scene.
//!
//! ```text
//! RUST_LOG=debug galview bounding-sphere --set "Point count=40" --seed 3 --json
//! ```

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use galgeom::func::Store;
use galgeom::view::{Context, Drawable, ShowStatus};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "galview")]
#[command(about = "Evaluate a galgeom demo and print the scene it produces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// A random point cloud in a box and its minimal bounding sphere
    BoundingSphere(RunArgs),
    /// List the available demos
    List,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Set an input slider before evaluating, as LABEL=VALUE (repeatable)
    #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_setting)]
    settings: Vec<(String, f64)>,

    /// Seed of the random generators, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the scene as JSON
    #[arg(long)]
    json: bool,
}

fn parse_setting(s: &str) -> Result<(String, f64)> {
    let (label, value) = s
        .rsplit_once('=')
        .with_context(|| format!("expected LABEL=VALUE, got {:?}", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid value {:?} for {:?}", value, label))?;
    Ok((label.trim().to_string(), value))
}

#[derive(Serialize)]
struct Report<'a> {
    inputs: Vec<InputReport<'a>>,
    drawables: Vec<DrawableReport<'a>>,
    failures: Vec<FailureReport<'a>>,
}

#[derive(Serialize)]
struct InputReport<'a> {
    label: &'a str,
    value: f64,
    min: f64,
    max: f64,
}

#[derive(Serialize)]
struct DrawableReport<'a> {
    name: &'a str,
    kind: &'static str,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct FailureReport<'a> {
    name: &'a str,
    error: String,
}

fn drawable_value(drawable: &Drawable) -> Result<serde_json::Value> {
    let value = match drawable {
        Drawable::Box3(v) => serde_json::to_value(&**v)?,
        Drawable::PointCloud(v) => serde_json::to_value(&**v)?,
        Drawable::Sphere(v) => serde_json::to_value(&**v)?,
        Drawable::Circle2d(v) => serde_json::to_value(&**v)?,
        Drawable::Plane(v) => serde_json::to_value(&**v)?,
        Drawable::Mesh(mesh) => serde_json::json!({
            "vertices": mesh.vertices().len(),
            "triangles": mesh.num_triangles(),
            "volume": mesh.volume(),
            "area": mesh.area(),
        }),
    };
    Ok(value)
}

fn summary(drawable: &Drawable) -> String {
    match drawable {
        Drawable::Box3(b) => format!(
            "mins {:?}, maxs {:?}",
            b.mins.coords.as_slice(),
            b.maxs.coords.as_slice()
        ),
        Drawable::PointCloud(c) => format!("{} points", c.len()),
        Drawable::Sphere(s) => format!(
            "center {:?}, radius {}",
            s.center.coords.as_slice(),
            s.radius
        ),
        Drawable::Circle2d(c) => format!(
            "center {:?}, radius {}",
            c.center().coords.as_slice(),
            c.radius()
        ),
        Drawable::Mesh(m) => format!(
            "{} vertices, {} triangles",
            m.vertices().len(),
            m.num_triangles()
        ),
        Drawable::Plane(p) => format!("{:?}", p),
    }
}

/// Builds and evaluates a demo, then writes its scene to `out`.
fn run(demo: &str, args: &RunArgs, out: &mut dyn Write) -> Result<()> {
    let store = match args.seed {
        Some(seed) => Store::with_seed(seed),
        None => Store::new(),
    };
    let mut ctx = Context::new(store);
    if !galgeom::demos::run(demo, &mut ctx)? {
        bail!("unknown demo {:?}", demo);
    }

    for (label, value) in &args.settings {
        let _ = ctx
            .set_slider(label, *value)
            .with_context(|| format!("cannot set {:?}", label))?;
    }

    let failed = ctx.eval_outputs();
    log::info!(
        "{}: {} drawables, {} failed outputs",
        demo,
        ctx.scene().len(),
        failed
    );

    let failures = ctx
        .shows()
        .filter_map(|(_, name, status)| match status {
            ShowStatus::Failed(err) => Some(FailureReport {
                name,
                error: err.to_string(),
            }),
            _ => None,
        })
        .collect::<Vec<_>>();
    let failed_count = failures.len();

    if args.json {
        let report = Report {
            inputs: ctx
                .inputs()
                .iter()
                .map(|w| {
                    let (min, max) = w.range();
                    InputReport {
                        label: w.label(),
                        value: w.value(),
                        min,
                        max,
                    }
                })
                .collect(),
            drawables: ctx
                .scene()
                .iter()
                .map(|(_, name, d)| {
                    Ok(DrawableReport {
                        name,
                        kind: d.kind(),
                        value: drawable_value(d)?,
                    })
                })
                .collect::<Result<_>>()?,
            failures,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for w in ctx.inputs().iter() {
            let (min, max) = w.range();
            writeln!(
                out,
                "input {:?} = {} in [{}, {}]",
                w.label(),
                w.value(),
                min,
                max
            )?;
        }
        for (_, name, d) in ctx.scene().iter() {
            writeln!(out, "{} ({}): {}", name, d.kind(), summary(d))?;
        }
        for f in &failures {
            writeln!(out, "{}: failed: {}", f.name, f.error)?;
        }
    }

    if failed_count > 0 {
        bail!("{} outputs could not be shown", failed_count);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::BoundingSphere(args) => run("bounding-sphere", &args, &mut io::stdout().lock()),
        Commands::List => {
            for name in galgeom::demos::DEMOS {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{parse_setting, run, RunArgs};

    fn args(settings: &[(&str, f64)], json: bool) -> RunArgs {
        RunArgs {
            settings: settings
                .iter()
                .map(|(label, value)| (label.to_string(), *value))
                .collect(),
            seed: Some(7),
            json,
        }
    }

    #[test]
    fn settings_parsing() {
        assert_eq!(
            parse_setting("Point count=40").unwrap(),
            ("Point count".to_string(), 40.0)
        );
        assert!(parse_setting("Point count").is_err());
        assert!(parse_setting("Point count=many").is_err());
    }

    #[test]
    fn bounding_sphere_json_report() {
        let mut out = Vec::new();
        run(
            "bounding-sphere",
            &args(&[("Point count", 10.0)], true),
            &mut out,
        )
        .unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["inputs"][0]["label"], "Point count");
        assert_eq!(report["inputs"][0]["value"], 10.0);
        assert_eq!(report["drawables"][0]["name"], "cloud");
        assert_eq!(report["drawables"][0]["kind"], "point_cloud");
        assert_eq!(
            report["drawables"][0]["value"]["points"]
                .as_array()
                .unwrap()
                .len(),
            10
        );
        assert_eq!(report["drawables"][1]["name"], "sphere");
        assert!(report["drawables"][1]["value"]["radius"].as_f64().unwrap() > 0.0);
        assert!(report["failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn bounding_sphere_text_report_and_errors() {
        let mut out = Vec::new();
        run("bounding-sphere", &args(&[], false), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("input \"Point count\" = 25 in [5, 50]"));
        assert!(text.contains("cloud (point_cloud): 25 points"));
        assert!(text.contains("sphere (sphere): center"));

        let mut out = Vec::new();
        assert!(run("bounding-sphere", &args(&[("Radius", 1.0)], false), &mut out).is_err());
        assert!(run("no-such-demo", &args(&[], false), &mut out).is_err());
        assert!(out.is_empty());
    }
}
