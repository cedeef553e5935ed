use anyhow::Context as _;
use four_bar::{
    csv::{write_frames, Frame},
    plot::{Renderer, SVGBackend},
    Coord, LinkageCfg,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{f64::consts::PI, path::PathBuf, time::Duration};

const STYLE: &str = "{elapsed_precise} {wide_bar} {pos}/{len} {msg}";
const FRAME_SIZE: (u32, u32) = (800, 800);

/// Options of a driver angle sweep.
#[derive(clap::Args)]
pub(crate) struct Sweep {
    /// Start angle (radians)
    #[clap(long, default_value_t = 0., allow_hyphen_values = true)]
    pub(crate) start: f64,
    /// End angle, exclusive (radians)
    #[clap(long, default_value_t = PI, allow_hyphen_values = true)]
    pub(crate) end: f64,
    /// Angle step (radians)
    #[clap(long, default_value_t = PI / 100.)]
    pub(crate) step: f64,
    /// Steps per π, replace the angle step
    #[clap(long, conflicts_with = "step")]
    pub(crate) res: Option<u32>,
    /// Pause after each frame (milliseconds)
    #[clap(long, default_value_t = 0)]
    pub(crate) delay: u64,
    /// Print every frame to stdout
    #[clap(long)]
    pub(crate) print: bool,
    /// Export the frames to a CSV file
    #[clap(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Render every feasible frame as SVG into a folder
    #[clap(long)]
    pub(crate) frames: Option<PathBuf>,
    /// Render the traced paths into an SVG file
    #[clap(long)]
    pub(crate) paths: Option<PathBuf>,
    /// Hide the progress bar
    #[clap(short, long)]
    pub(crate) quiet: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            start: 0.,
            end: PI,
            step: PI / 100.,
            res: None,
            delay: 0,
            print: false,
            csv: None,
            frames: None,
            paths: None,
            quiet: false,
        }
    }
}

pub(crate) fn sweep(cfg: &LinkageCfg, sweep: Sweep) -> anyhow::Result<()> {
    let Sweep { start, end, step, res, delay, print, csv, frames, paths, quiet } = sweep;
    let step = res.map_or(step, |res| PI / f64::from(res));
    let mut fb = cfg.build().context("initialize linkage")?;
    tracing::info!(ty = %fb.ty(), bound = ?fb.angle_bound(), "linkage type");
    if let Some(dir) = &frames {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let renderer = Renderer::new();
    let traj = fb.trajectory(start, end, step)?;
    let pb = if quiet || print {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(traj.len() as u64)
    };
    pb.set_style(ProgressStyle::with_template(STYLE)?);
    let mut records = Vec::<(f64, Option<[Coord; 4]>)>::new();
    let mut failed = 0usize;
    for (i, (theta, joints)) in traj.enumerate() {
        match &joints {
            Ok(js) => {
                if print {
                    let [p1, p2, p3, p4] = js;
                    println!("{theta:.4}: p1={p1:.4?} p2={p2:.4?} p3={p3:.4?} p4={p4:.4?}");
                }
                if let Some(dir) = &frames {
                    let path = dir.join(format!("frame_{i:04}.svg"));
                    let renderer = renderer.clone().title(format!("θ = {theta:.4}"));
                    renderer
                        .render(SVGBackend::new(&path, FRAME_SIZE), js)
                        .with_context(|| format!("rendering {}", path.display()))?;
                }
            }
            Err(e) => {
                failed += 1;
                pb.suspend(|| tracing::warn!(theta, "frame skipped: {e}"));
                if print {
                    println!("{theta:.4}: infeasible");
                }
            }
        }
        records.push((theta, joints.ok()));
        pb.inc(1);
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }
    }
    pb.finish_and_clear();
    tracing::info!(total = records.len(), failed, "sweep finished");
    if let Some(path) = csv {
        let rows = records.iter().copied().map(Frame::from).collect::<Vec<_>>();
        let w = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_frames(w, &rows)?;
        tracing::info!(path = %path.display(), "frames exported");
    }
    if let Some(path) = paths {
        renderer
            .title("Traced paths")
            .render_paths(SVGBackend::new(&path, (1000, 1000)), &records)
            .with_context(|| format!("rendering {}", path.display()))?;
        tracing::info!(path = %path.display(), "paths rendered");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export() {
        let dir = std::env::temp_dir().join(format!("four-bar-sweep-{}", std::process::id()));
        let sweep = Sweep {
            res: Some(10),
            csv: Some(dir.join("frames.csv")),
            frames: Some(dir.join("frames")),
            paths: Some(dir.join("paths.svg")),
            quiet: true,
            ..Default::default()
        };
        super::sweep(&LinkageCfg::default(), sweep).unwrap();
        let csv = std::fs::File::open(dir.join("frames.csv")).unwrap();
        let rows = four_bar::csv::read_frames(csv).unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.joints().is_some()));
        assert!(dir.join("frames").join("frame_0009.svg").exists());
        assert!(dir.join("paths.svg").exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn rocker_range() {
        // Infeasible at the initial angle, feasible over the whole sweep
        let dir = std::env::temp_dir().join(format!("four-bar-rocker-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let csv = dir.join("frames.csv");
        let sweep = Sweep {
            start: -0.5,
            end: 0.5,
            step: 0.1,
            csv: Some(csv.clone()),
            quiet: true,
            ..Default::default()
        };
        super::sweep(&LinkageCfg::new(1., 1., 1., 2.5), sweep).unwrap();
        let rows = four_bar::csv::read_frames(std::fs::File::open(&csv).unwrap()).unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row.joints().is_some()));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn never_closing() {
        let cfg = LinkageCfg::new(1., 0.01, 0.01, 10.);
        super::sweep(&cfg, Sweep { quiet: true, ..Default::default() }).unwrap();
    }

    #[test]
    fn too_many_steps() {
        let sweep = Sweep { step: 1e-300, quiet: true, ..Default::default() };
        let err = super::sweep(&LinkageCfg::default(), sweep).unwrap_err();
        let err = err.downcast::<four_bar::Error>().unwrap();
        assert!(matches!(err, four_bar::Error::InvalidSweep { .. }));
    }
}
