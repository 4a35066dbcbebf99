use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn wsexport_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".wsexport"))
}

pub fn ensure_wsexport_home() -> Result<PathBuf> {
    let dir = wsexport_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Read a saved page from a file, or from stdin when the path is `-`.
pub fn read_html(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read page from stdin")?;
        return Ok(s);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
