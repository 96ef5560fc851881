use std::fs::File;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::config::constants::ARCHIVE_ROOT_ENTRY;
use crate::errors::{AnalyzerError, AnalyzerResult};

/// Zips the whole results tree under a fixed `results/` root entry.
#[derive(Debug, Clone)]
pub struct ArchiveExporter {
    results_root: PathBuf,
}

impl ArchiveExporter {
    pub fn new(results_root: impl Into<PathBuf>) -> Self {
        Self {
            results_root: results_root.into(),
        }
    }

    /// Writes the complete archive to `writer` and hands it back once finished.
    pub fn export_archive<W: Write + Seek>(&self, writer: W) -> AnalyzerResult<W> {
        if !self.results_root.is_dir() {
            return Err(AnalyzerError::not_found("Results directory", &self.results_root.display().to_string()));
        }

        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(9));

        let mut file_count = 0;
        for entry in WalkDir::new(&self.results_root).sort_by_file_name() {
            let entry = entry?;
            let name = self.entry_name(entry.path())?;

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{}/", name), options)?;
            } else if entry.file_type().is_file() {
                zip.start_file(name, options)?;
                let mut file = File::open(entry.path())?;
                io::copy(&mut file, &mut zip)?;
                file_count += 1;
            }
        }

        let writer = zip.finish()?;
        log::info!("📦 Archived {} result files from {}", file_count, self.results_root.display());
        Ok(writer)
    }

    /// Builds the archive in memory so a failure never leaves a truncated download.
    pub fn build_archive(&self) -> AnalyzerResult<Vec<u8>> {
        let cursor = self.export_archive(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    fn entry_name(&self, path: &Path) -> AnalyzerResult<String> {
        let relative = path
            .strip_prefix(&self.results_root)
            .map_err(|e| AnalyzerError::io_error("archive entry naming", &e.to_string()))?;

        let mut name = ARCHIVE_ROOT_ENTRY.to_string();
        for component in relative.components() {
            name.push('/');
            name.push_str(&component.as_os_str().to_string_lossy());
        }
        Ok(name)
    }
}
