use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const MIB: u64 = 1024 * 1024;

/// Global configuration loaded from `~/.config/splitfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitfetchConfig {
    /// Directory the final file is written to (created if absent).
    pub output_dir: PathBuf,
    /// Upper bound on concurrent segments (one worker thread each).
    pub max_segments: usize,
    /// Files smaller than this many bytes are fetched with a single segment.
    pub single_segment_below: u64,
    /// Files smaller than this many bytes use `reduced_segments`.
    pub reduced_segments_below: u64,
    /// Segment count for medium-sized files.
    pub reduced_segments: usize,
    /// Connect timeout for HEAD and Range requests, in seconds.
    pub connect_timeout_secs: u64,
    /// Total time allowed for the size query (HEAD), in seconds.
    #[serde(default = "default_head_timeout_secs")]
    pub head_timeout_secs: u64,
}

fn default_head_timeout_secs() -> u64 {
    30
}

impl Default for SplitfetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            max_segments: 8,
            single_segment_below: MIB,
            reduced_segments_below: 10 * MIB,
            reduced_segments: 4,
            connect_timeout_secs: 30,
            head_timeout_secs: default_head_timeout_secs(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("splitfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SplitfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SplitfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SplitfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
