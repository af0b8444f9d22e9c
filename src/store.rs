use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::{self, Dataset};

const STORE_DIR: &str = "tff_terminal";
const STORE_FILE: &str = "results_override.json";
const STORE_VERSION: u32 = 1;

/// On-disk envelope for locally overridden week results. The payload is the
/// same week-keyed document shape the seed data uses, so anything that can
/// produce a results file can feed the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OverrideFile {
    version: u32,
    saved_at: String,
    results: Value,
}

/// Load the override dataset, if a readable current-version file exists.
/// Any failure reads as "no override"; stale versions are ignored rather
/// than migrated.
pub fn load_override() -> Option<Dataset> {
    load_override_from(&store_path()?)
}

pub fn load_override_from(path: &Path) -> Option<Dataset> {
    let raw = fs::read_to_string(path).ok()?;
    let file = serde_json::from_str::<OverrideFile>(&raw).ok()?;
    if file.version != STORE_VERSION {
        return None;
    }
    dataset::parse_results_value(&file.results).ok()
}

pub fn save_override(weeks: &Dataset) -> Result<PathBuf> {
    let path = store_path().context("no writable cache directory")?;
    save_override_to(&path, weeks)?;
    Ok(path)
}

pub fn save_override_to(path: &Path, weeks: &Dataset) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = OverrideFile {
        version: STORE_VERSION,
        saved_at: Utc::now().to_rfc3339(),
        results: dataset::to_results_value(weeks),
    };
    let json = serde_json::to_string(&file).context("serialize results override")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write results override")?;
    fs::rename(&tmp, path).context("swap results override")?;
    Ok(())
}

/// The dataset queries should see: seed weeks with any overridden weeks
/// layered on top. Week granularity keeps a partial override from hiding
/// seeded history.
pub fn effective_results(seed: &Dataset, override_weeks: Option<&Dataset>) -> Dataset {
    match override_weeks {
        Some(over) => seed.overlaid_with(over),
        None => seed.clone(),
    }
}

fn store_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(STORE_DIR).join(STORE_FILE));
        }
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(STORE_DIR)
            .join(STORE_FILE),
    )
}
