//! Command line driver of the four-bar linkage solver.
mod cfg;
mod cli;
mod sweep;

fn main() -> anyhow::Result<()> {
    cli::Entry::main()
}
