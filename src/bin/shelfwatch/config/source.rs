//! Source Config

use std::path::PathBuf;

use clap::Args;

/// Fixture source settings.
#[derive(Debug, Args)]
pub(crate) struct SourceConfig {
    /// Directory holding the fixture sets
    #[arg(long, env = "SHELFWATCH_FIXTURES_DIR", default_value = "./fixtures")]
    pub fixtures_dir: PathBuf,

    /// Name of the fixture set to load
    #[arg(short, long, env = "SHELFWATCH_FIXTURE_SET", default_value = "sample")]
    pub set: String,
}
