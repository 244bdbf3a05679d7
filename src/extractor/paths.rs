use crate::error::{Result, ZipCatError};
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of the output directory.
pub fn resolve_output_root(output_dir: &Path) -> Result<PathBuf> {
    let absolute = if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(output_dir)
    };

    Ok(normalize_path(&absolute))
}

/// Join an archive entry name onto `root` and reject results that leave it.
///
/// `..` pops a component and `.` is dropped. A leading `/` or drive prefix in
/// the entry name is ignored, so absolute names land under `root`. The result
/// must be strictly below `root`; `root` itself is rejected as well.
pub fn resolve_entry_path(root: &Path, entry_name: &str) -> Result<PathBuf> {
    let mut resolved = root.to_path_buf();

    for component in Path::new(entry_name).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if resolved == root || !resolved.starts_with(root) {
        return Err(ZipCatError::ZipSlip {
            entry: entry_name.to_string(),
            resolved,
        });
    }

    Ok(resolved)
}

pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(component.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
