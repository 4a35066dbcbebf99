//! Download sinks: where the finished export goes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

pub const EXPORT_FILENAME: &str = "wealthsimple_activity.csv";
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8";

/// A named byte payload ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn csv(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime: EXPORT_MIME.to_string(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    File(PathBuf),
    Stream { bytes: usize },
}

pub trait DownloadSink {
    fn deliver(&mut self, download: &Download) -> Result<Delivered>;
}

/// Writes the download into a directory.
///
/// Bytes go to a temp file next to the target, which is then renamed into
/// place. The temp file is removed on every failure path.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    overwrite: bool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl DownloadSink for FileSink {
    fn deliver(&mut self, download: &Download) -> Result<Delivered> {
        let target = self.dir.join(&download.filename);
        if !self.overwrite && target.exists() {
            bail!(
                "{} already exists (pass --overwrite to replace it)",
                target.display()
            );
        }

        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir.display()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".wsexport-")
            .suffix(".part")
            .tempfile_in(&self.dir)
            .with_context(|| format!("create temp file in {}", self.dir.display()))?;
        tmp.write_all(&download.bytes)
            .with_context(|| format!("write {}", tmp.path().display()))?;
        tmp.as_file().sync_all().context("sync export")?;

        let persisted = if self.overwrite {
            tmp.persist(&target)
        } else {
            tmp.persist_noclobber(&target)
        };
        // Dropping the PersistError drops (and deletes) the temp file.
        persisted
            .map_err(|e| e.error)
            .with_context(|| format!("write {}", target.display()))?;

        debug!(path = %target.display(), bytes = download.bytes.len(), mime = %download.mime, "export written");
        Ok(Delivered::File(target))
    }
}

/// Streams the download to any writer, e.g. stdout.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DownloadSink for WriterSink<W> {
    fn deliver(&mut self, download: &Download) -> Result<Delivered> {
        self.writer
            .write_all(&download.bytes)
            .with_context(|| format!("write {}", download.filename))?;
        self.writer.flush().context("flush output")?;
        Ok(Delivered::Stream {
            bytes: download.bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn leftover_temp_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count()
    }

    #[test]
    fn test_file_sink_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());
        let dl = Download::csv(EXPORT_FILENAME, b"Date,Payee,Amount\n".to_vec());

        let delivered = sink.deliver(&dl).unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        assert_eq!(delivered, Delivered::File(path.clone()));
        assert_eq!(fs::read(&path).unwrap(), dl.bytes);
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn test_file_sink_refuses_to_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        fs::write(&path, "old").unwrap();

        let mut sink = FileSink::new(dir.path());
        let err = sink.deliver(&Download::csv(EXPORT_FILENAME, b"new".to_vec())).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn test_file_sink_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);
        fs::write(&path, "old").unwrap();

        let mut sink = FileSink::new(dir.path()).overwrite(true);
        sink.deliver(&Download::csv(EXPORT_FILENAME, b"new".to_vec())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_file_sink_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports/2026");
        let mut sink = FileSink::new(&nested);
        sink.deliver(&Download::csv("a.csv", b"x".to_vec())).unwrap();
        assert!(nested.join("a.csv").exists());
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        let delivered = sink.deliver(&Download::csv("a.csv", b"abc".to_vec())).unwrap();
        assert_eq!(delivered, Delivered::Stream { bytes: 3 });
        assert_eq!(sink.into_inner(), b"abc");
        assert_eq!(Download::csv("a.csv", Vec::new()).mime, EXPORT_MIME);
    }
}
