//! Binary entrypoint: scan an image directory and print the gallery.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use photo_gallery::config::Configuration;
use photo_gallery::gallery::{GalleryView, ImageRef};
use photo_gallery::probe::FsProbe;
use photo_gallery::scan::scan_gallery;
use photo_gallery::stars::{self, Star, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gallery",
    version,
    about = "Discover sequentially numbered gallery images"
)]
struct Args {
    /// Path to YAML config (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Override the image directory from the config
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Section to select instead of the configured initial section
    #[arg(long, value_name = "ID")]
    section: Option<String>,
    /// Lay out star mode for a WIDTHxHEIGHT viewport
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    stars: Option<Viewport>,
    /// Deterministic RNG seed for the star layout
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    selected: &'a str,
    sections: Vec<SectionReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stars: Option<Vec<Star>>,
}

#[derive(Debug, Serialize)]
struct SectionReport<'a> {
    id: &'a str,
    display_name: &'a str,
    title_visible: bool,
    images: Vec<&'a ImageRef>,
}

fn init_tracing(verbosity: u8) {
    // map -v to the default level; RUST_LOG wins when set
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        root,
        section,
        stars: star_viewport,
        seed,
        json,
        verbose,
    } = Args::parse();
    init_tracing(verbose);

    let mut cfg = match &config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(root) = root {
        cfg.image_root = root;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("configuration: {cfg:#?}");

    let gallery = scan_gallery(
        &FsProbe,
        &cfg.image_root,
        &cfg.sections,
        &cfg.scan_options(),
    )
    .await;

    let initial = section.as_deref().or(cfg.initial_section.as_deref());
    let view = GalleryView::new(&gallery, initial).context("cannot select section")?;

    let star_layout = star_viewport.map(|viewport| {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        stars::layout(&cfg.star_mode, view.visible_images(), viewport, &mut rng)
    });

    let report = Report {
        selected: &view.current().id,
        sections: gallery
            .sections()
            .iter()
            .zip(view.title_visibility())
            .map(|(s, (_, visible))| SectionReport {
                id: &s.id,
                display_name: &s.display_name,
                title_visible: visible,
                images: gallery.images_in(&s.id).collect(),
            })
            .collect(),
        stars: star_layout,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report<'_>) {
    for section in &report.sections {
        let marker = if section.title_visible { '*' } else { ' ' };
        println!(
            "{marker} {} [{}]: {} image(s)",
            section.display_name,
            section.id,
            section.images.len()
        );
        if section.title_visible {
            for img in &section.images {
                println!("    {}  {}", img.name, img.path.display());
            }
        }
    }
    if let Some(stars) = &report.stars {
        println!("star mode ({} star(s)):", stars.len());
        for star in stars {
            println!(
                "    {:<8} x={:>7.1} y={:>7.1} size={:>5.1} delay={:.2}s duration={:.2}s",
                star.name,
                star.x,
                star.y,
                star.size,
                star.delay.as_secs_f32(),
                star.duration.as_secs_f32()
            );
        }
    }
}
