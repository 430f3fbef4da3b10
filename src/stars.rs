//! Star mode: the selected section's images scattered over the viewport.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::StarModeConfig;
use crate::gallery::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
impl FromStr for Viewport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width: f32 = w.trim().parse().context("invalid viewport width")?;
        let height: f32 = h.trim().parse().context("invalid viewport height")?;
        ensure!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "viewport dimensions must be non-negative"
        );
        Ok(Self { width, height })
    }
}

/// One placed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub path: PathBuf,
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Edge length of the square star, in pixels.
    pub size: f32,
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

/// Place every image at a random position with a random size and timing.
///
/// Output order matches input order. A viewport smaller than the margins pins
/// stars at `(margin, margin)` instead of going negative.
pub fn layout<'a, R, I>(cfg: &StarModeConfig, images: I, viewport: Viewport, rng: &mut R) -> Vec<Star>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a ImageRef>,
{
    let span_x = (viewport.width - 2.0 * cfg.margin - cfg.reserved).max(0.0);
    let span_y = (viewport.height - 2.0 * cfg.margin - cfg.reserved).max(0.0);

    let stars: Vec<Star> = images
        .into_iter()
        .map(|img| Star {
            path: img.path.clone(),
            name: img.name.clone(),
            x: cfg.margin + rng.random::<f32>() * span_x,
            y: cfg.margin + rng.random::<f32>() * span_y,
            size: cfg.min_size + rng.random::<f32>() * cfg.size_spread,
            delay: cfg.max_delay.mul_f32(rng.random::<f32>()),
            duration: cfg.min_duration + cfg.duration_spread.mul_f32(rng.random::<f32>()),
        })
        .collect();
    debug!(stars = stars.len(), ?viewport, "star layout");
    stars
}

/// Toggle state plus the current layout.
#[derive(Debug, Clone)]
pub struct StarMode {
    cfg: StarModeConfig,
    active: bool,
    stars: Vec<Star>,
}

impl StarMode {
    pub fn new(cfg: StarModeConfig) -> Self {
        Self {
            cfg,
            active: false,
            stars: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Flip star mode; lays out `images` when turning on, clears when turning off.
    pub fn toggle<'a, R, I>(&mut self, images: I, viewport: Viewport, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a ImageRef>,
    {
        self.active = !self.active;
        if self.active {
            self.stars = layout(&self.cfg, images, viewport, rng);
        } else {
            self.stars.clear();
        }
        self.active
    }

    /// Lay out again after a section change or resize. No-op while inactive.
    pub fn relayout<'a, R, I>(&mut self, images: I, viewport: Viewport, rng: &mut R)
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a ImageRef>,
    {
        if self.active {
            self.stars = layout(&self.cfg, images, viewport, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn images(n: usize) -> Vec<ImageRef> {
        (1..=n)
            .map(|i| ImageRef {
                path: PathBuf::from(format!("images/C{i}.jpg")),
                name: format!("C{i}"),
                section_id: "stars".into(),
            })
            .collect()
    }

    #[test]
    fn stars_stay_within_configured_ranges() {
        let cfg = StarModeConfig::default();
        let imgs = images(50);
        let mut rng = StdRng::seed_from_u64(7);
        let stars = layout(&cfg, &imgs, Viewport::new(1920.0, 1080.0), &mut rng);
        assert_eq!(stars.len(), 50);
        for (star, img) in stars.iter().zip(&imgs) {
            assert_eq!(star.name, img.name);
            assert!((100.0..=100.0 + 1520.0).contains(&star.x));
            assert!((100.0..=100.0 + 680.0).contains(&star.y));
            assert!((100.0..=200.0).contains(&star.size));
            assert!(star.delay <= Duration::from_secs(3));
            assert!(star.duration >= Duration::from_secs(12));
            assert!(star.duration <= Duration::from_secs(20));
        }
    }

    #[test]
    fn small_viewport_pins_stars_at_margin() {
        let cfg = StarModeConfig::default();
        let imgs = images(3);
        let mut rng = StdRng::seed_from_u64(1);
        let stars = layout(&cfg, &imgs, Viewport::new(300.0, 200.0), &mut rng);
        assert!(stars.iter().all(|s| s.x == 100.0 && s.y == 100.0));
    }

    #[test]
    fn seeded_layout_is_reproducible() {
        let cfg = StarModeConfig::default();
        let imgs = images(5);
        let vp = Viewport::new(1280.0, 720.0);
        let a = layout(&cfg, &imgs, vp, &mut StdRng::seed_from_u64(42));
        let b = layout(&cfg, &imgs, vp, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn toggle_lays_out_and_clears() {
        let imgs = images(4);
        let vp = Viewport::new(1280.0, 720.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut mode = StarMode::new(StarModeConfig::default());

        mode.relayout(&imgs, vp, &mut rng);
        assert!(mode.stars().is_empty(), "inactive mode must not lay out");

        assert!(mode.toggle(&imgs, vp, &mut rng));
        assert_eq!(mode.stars().len(), 4);

        mode.relayout(&imgs[..2], vp, &mut rng);
        assert_eq!(mode.stars().len(), 2);

        assert!(!mode.toggle(&imgs, vp, &mut rng));
        assert!(mode.stars().is_empty());
    }

    #[test]
    fn parses_viewport() {
        let vp: Viewport = "1920x1080".parse().unwrap();
        assert_eq!(vp, Viewport::new(1920.0, 1080.0));
        assert!("1920".parse::<Viewport>().is_err());
        assert!("-1x5".parse::<Viewport>().is_err());
    }
}
