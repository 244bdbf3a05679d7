use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Hands out unique output paths for a single run.
///
/// The first claim of a path returns it unchanged. Later claims of the same
/// requested path return `stem(N).ext`, where `N` counts up from 0 per
/// requested path. Candidates that are already claimed are skipped.
#[derive(Debug, Default)]
pub struct CollisionNamer {
    counters: HashMap<PathBuf, u32>,
    claimed: HashSet<PathBuf>,
}

impl CollisionNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, requested: &Path) -> PathBuf {
        if !self.claimed.contains(requested) {
            self.counters.entry(requested.to_path_buf()).or_insert(0);
            self.claimed.insert(requested.to_path_buf());
            return requested.to_path_buf();
        }

        let counter = self.counters.entry(requested.to_path_buf()).or_insert(0);
        let candidate = loop {
            let candidate = with_suffix(requested, *counter);
            *counter += 1;
            if !self.claimed.contains(&candidate) {
                break candidate;
            }
        };

        self.claimed.insert(candidate.clone());
        candidate
    }

    pub fn is_claimed(&self, path: &Path) -> bool {
        self.claimed.contains(path)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// `dir/name.ext` -> `dir/name(n).ext`
fn with_suffix(path: &Path, n: u32) -> PathBuf {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let renamed = match filename.rfind('.') {
        Some(dot) if dot > 0 => format!("{}({}){}", &filename[..dot], n, &filename[dot..]),
        _ => format!("{}({})", filename, n),
    };

    match path.parent() {
        Some(parent) => parent.join(renamed),
        None => PathBuf::from(renamed),
    }
}
