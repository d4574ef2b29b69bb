//! Test-set discovery.
//!
//! Log files follow a naming convention: `<name>Client.log`,
//! `<name>Server.log`, `<name>Proxy.log`. Files sharing a `<name>`
//! prefix belong to one test run and are grouped into a [`TestSet`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};

/// Which harness process wrote a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRole {
    Client,
    Server,
    Proxy,
}

impl LogRole {
    /// Filename suffix for this role.
    fn suffix(self) -> &'static str {
        match self {
            LogRole::Client => "Client.log",
            LogRole::Server => "Server.log",
            LogRole::Proxy => "Proxy.log",
        }
    }

    const ALL: [LogRole; 3] = [LogRole::Client, LogRole::Server, LogRole::Proxy];
}

/// Up to three log files sharing a naming prefix.
#[derive(Debug, Clone, Default)]
pub struct TestSet {
    pub name: String,
    pub client_log: Option<PathBuf>,
    pub server_log: Option<PathBuf>,
    pub proxy_log: Option<PathBuf>,
}

impl TestSet {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

/// Display order for the standard test configurations. Anything not
/// listed here sorts after these, alphabetically.
const PREFERRED_ORDER: [&str; 7] = [
    "NoProxy",
    "PerfectNetwork",
    "5Drop",
    "10Drop",
    "50Delay",
    "100Delay",
    "50Drop50Delay",
];

/// Split a filename into (role, test-set identifier), or None if it
/// does not follow the log naming convention. A bare suffix like
/// `Client.log` maps to the identifier `"default"`.
fn classify_filename(file_name: &str) -> Option<(LogRole, String)> {
    for role in LogRole::ALL {
        if let Some(prefix) = file_name.strip_suffix(role.suffix()) {
            let name = if prefix.is_empty() { "default" } else { prefix };
            return Some((role, name.to_string()));
        }
    }
    None
}

/// Scan `dir` for harness log files and group them into test sets,
/// ordered for presentation.
pub fn discover_test_sets(dir: &Path) -> Result<Vec<TestSet>> {
    let mut sets: BTreeMap<String, TestSet> = BTreeMap::new();

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some((role, name)) = classify_filename(file_name) else {
            continue;
        };

        let set = sets
            .entry(name.clone())
            .or_insert_with(|| TestSet::new(name));
        let slot = match role {
            LogRole::Client => &mut set.client_log,
            LogRole::Server => &mut set.server_log,
            LogRole::Proxy => &mut set.proxy_log,
        };
        *slot = Some(entry.path());
    }

    let mut sets: Vec<TestSet> = sets.into_values().collect();
    sets.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));

    log::info!("Discovered {} test set(s) in {}", sets.len(), dir.display());
    Ok(sets)
}

/// Preferred identifiers sort by list position; the rest sort after
/// them, alphabetically among themselves.
fn sort_key(name: &str) -> (usize, &str) {
    match PREFERRED_ORDER.iter().position(|p| *p == name) {
        Some(idx) => (idx, ""),
        None => (PREFERRED_ORDER.len(), name),
    }
}
