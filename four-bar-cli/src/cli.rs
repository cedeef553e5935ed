use crate::{cfg::LinkageArgs, sweep};
use anyhow::Context as _;
use four_bar::{LinkageCfg, Point as _};
use std::f64::consts::FRAC_PI_4;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, about)]
pub(crate) struct Entry {
    /// Print more messages, repeat for more details
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(flatten)]
    linkage: LinkageArgs,
    // Default to print the joints at π/4 then sweep over [0, π)
    #[clap(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Print the joint positions at one driver angle
    Show {
        /// Driver angle (radians)
        #[clap(long, default_value_t = FRAC_PI_4, allow_hyphen_values = true)]
        angle: f64,
    },
    /// Sweep the driver angle and export the frames
    Sweep(sweep::Sweep),
}

impl Entry {
    pub(crate) fn main() -> anyhow::Result<()> {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        init_logger(entry.verbose);
        let cfg = entry.linkage.load()?;
        match entry.cmd {
            None => {
                println!("Simulate four bar linkage");
                show(&cfg, FRAC_PI_4)?;
                sweep::sweep(&cfg, sweep::Sweep { print: true, ..Default::default() })
            }
            Some(Cmd::Show { angle }) => show(&cfg, angle),
            Some(Cmd::Sweep(sweep)) => sweep::sweep(&cfg, sweep),
        }
    }
}

fn init_logger(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn show(cfg: &LinkageCfg, angle: f64) -> anyhow::Result<()> {
    let mut fb = cfg.build().context("initialize linkage")?;
    let joints = fb.set_position(angle).with_context(|| format!("driver angle {angle}"))?;
    for (i, p) in joints.iter().enumerate() {
        println!("p{} at: {:.4} {:.4}", i + 1, p.x(), p.y());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory as _, Parser as _};

    #[test]
    fn parse_args() {
        Entry::command().debug_assert();
        let args = ["four-bar", "--d14", "2", "show", "--angle", "-0.5"];
        let entry = Entry::try_parse_from(args).unwrap();
        assert!(matches!(entry.cmd, Some(Cmd::Show { angle }) if angle == -0.5));
        let args = ["four-bar", "sweep", "--branch", "right", "-vv"];
        let entry = Entry::try_parse_from(args).unwrap();
        assert_eq!(entry.verbose, 2);
        assert!(matches!(entry.cmd, Some(Cmd::Sweep(_))));
        let args = ["four-bar", "sweep", "--res", "50", "--step", "0.1"];
        assert!(Entry::try_parse_from(args).is_err());
        let entry = Entry::try_parse_from(["four-bar"]).unwrap();
        assert!(entry.cmd.is_none());
    }
}
