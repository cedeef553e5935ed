use anyhow::Context as _;
use four_bar::{Branch, LinkageCfg};
use std::path::{Path, PathBuf};

/// Linkage dimensions, from a RON file then overridden by the options.
#[derive(clap::Args, Default)]
pub(crate) struct LinkageArgs {
    /// RON file of the linkage configuration
    #[clap(long, global = true)]
    cfg: Option<PathBuf>,
    /// Driver link length
    #[clap(long, global = true)]
    d12: Option<f64>,
    /// Coupler link length
    #[clap(long, global = true)]
    d23: Option<f64>,
    /// Follower link length
    #[clap(long, global = true)]
    d34: Option<f64>,
    /// Ground link length
    #[clap(long, global = true)]
    d14: Option<f64>,
    /// Side of the follower tip relative to the line from the driver tip to
    /// the follower pivot
    #[clap(long, value_enum, global = true)]
    branch: Option<Branch>,
}

impl LinkageArgs {
    pub(crate) fn load(&self) -> anyhow::Result<LinkageCfg> {
        let mut cfg = match &self.cfg {
            Some(path) => read_cfg(path)?,
            None => LinkageCfg::default(),
        };
        macro_rules! overwrite {
            ($($field:ident),+) => {$(
                if let Some(v) = self.$field {
                    cfg.$field = v;
                }
            )+};
        }
        overwrite!(d12, d23, d34, d14, branch);
        cfg.check()?;
        let LinkageCfg { d12, d23, d34, d14, branch, .. } = cfg;
        tracing::info!(d12, d23, d34, d14, branch = branch.name(), "linkage configuration");
        Ok(cfg)
    }
}

fn read_cfg(path: &Path) -> anyhow::Result<LinkageCfg> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_cfg(&s).with_context(|| format!("parsing {}", path.display()))
}

pub(crate) fn parse_cfg(s: &str) -> Result<LinkageCfg, ron::error::SpannedError> {
    ron::from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_cfg() {
        let cfg = parse_cfg("(d12: 35.0, d23: 70.0, d34: 70.0, d14: 90.0, branch: Right)").unwrap();
        assert_eq!(cfg, LinkageCfg::new(35., 70., 70., 90.).with_branch(Branch::Right));
        // Missing fields use the unit linkage
        let cfg = parse_cfg("(d14: 2.0)").unwrap();
        assert_eq!(cfg, LinkageCfg { d14: 2., ..LinkageCfg::default() });
        assert!(parse_cfg("(d14: \"long\")").is_err());
    }

    #[test]
    fn overwrite() {
        let args = LinkageArgs {
            d14: Some(1.5),
            branch: Some(Branch::Right),
            ..Default::default()
        };
        let cfg = args.load().unwrap();
        assert_eq!(cfg.d14, 1.5);
        assert_eq!(cfg.d12, 1.);
        assert_eq!(cfg.branch, Branch::Right);
        let args = LinkageArgs { d23: Some(-1.), ..Default::default() };
        assert!(args.load().is_err());
    }
}
