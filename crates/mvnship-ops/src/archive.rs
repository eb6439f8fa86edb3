//! Archive creation: file-list resolution and zip/tar/tgz writers.
//!
//! The archiver always writes under its format's native extension. The
//! archive step renames the result to the resolved file name afterwards.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use mvnship_core::config::FileSpec;
use mvnship_util::errors::MvnshipError;
use mvnship_util::fs::{collect_matching, ensure_dir, join_slash, PatternSet};

/// Container format, chosen from the resolved file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    /// `tar` and `tgz`/`tar.gz` select tar formats; anything else (including
    /// `war`, `jar`, `ear`) is zip.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "tar" => ArchiveFormat::Tar,
            "tgz" | "tar.gz" => ArchiveFormat::TarGz,
            _ => ArchiveFormat::Zip,
        }
    }

    pub fn native_extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tgz",
        }
    }
}

/// One file to store: where it is on disk and the name it gets inside the
/// archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    pub name: String,
}

/// Writes archives. Implementations return the path actually written.
pub trait Archiver {
    fn create(
        &self,
        format: ArchiveFormat,
        entries: &[ArchiveEntry],
        target: &Path,
    ) -> Result<PathBuf, MvnshipError>;
}

/// Archiver backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArchiver;

impl Archiver for FsArchiver {
    fn create(
        &self,
        format: ArchiveFormat,
        entries: &[ArchiveEntry],
        target: &Path,
    ) -> Result<PathBuf, MvnshipError> {
        let out = native_path(target, format);
        if let Some(parent) = out.parent() {
            ensure_dir(parent)?;
        }
        tracing::debug!(
            "writing {} entries to {} as {:?}",
            entries.len(),
            out.display(),
            format
        );

        let file = File::create(&out)?;
        match format {
            ArchiveFormat::Zip => write_zip(file, entries)?,
            ArchiveFormat::Tar => {
                let mut builder = tar::Builder::new(file);
                append_tar_entries(&mut builder, entries)?;
                builder.into_inner()?.flush()?;
            }
            ArchiveFormat::TarGz => {
                let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
                append_tar_entries(&mut builder, entries)?;
                builder.into_inner()?.finish()?;
            }
        }
        Ok(out)
    }
}

/// The path the archiver writes for `target`: unchanged when it already
/// ends in the format's native extension, otherwise with that extension.
pub fn native_path(target: &Path, format: ArchiveFormat) -> PathBuf {
    let ext = format.native_extension();
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.ends_with(&format!(".{ext}")) {
        target.to_path_buf()
    } else {
        target.with_extension(ext)
    }
}

fn write_zip(file: File, entries: &[ArchiveEntry]) -> Result<(), MvnshipError> {
    let mut zip = ZipWriter::new(file);
    for entry in entries {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(file_mode(&entry.source)?);
        zip.start_file(entry.name.as_str(), options)
            .map_err(|e| archive_error(&entry.name, e))?;
        let mut src = File::open(&entry.source)?;
        std::io::copy(&mut src, &mut zip)?;
    }
    zip.finish().map_err(|e| MvnshipError::Archive {
        message: format!("failed to finish zip: {e}"),
    })?;
    Ok(())
}

fn append_tar_entries<W: Write>(
    builder: &mut tar::Builder<W>,
    entries: &[ArchiveEntry],
) -> Result<(), MvnshipError> {
    for entry in entries {
        builder.append_path_with_name(&entry.source, &entry.name)?;
    }
    Ok(())
}

fn archive_error(name: &str, e: impl std::fmt::Display) -> MvnshipError {
    MvnshipError::Archive {
        message: format!("failed to add {name}: {e}"),
    }
}

#[cfg(unix)]
fn file_mode(path: &Path) -> std::io::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(std::fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> std::io::Result<u32> {
    Ok(0o644)
}

/// Expand file mappings into archive entries.
///
/// Each mapping's `src` patterns are matched relative to `project_dir`
/// joined with its `cwd`; entry names are the matched paths under `dest`.
/// `excluded` lists project-relative paths that are never archived. When
/// two mappings produce the same entry name the first one wins.
pub fn collect_entries(
    project_dir: &Path,
    files: &[FileSpec],
    excluded: &[String],
) -> Result<Vec<ArchiveEntry>, MvnshipError> {
    let excluded: BTreeSet<String> = excluded.iter().map(|p| join_slash(&[p.as_str()])).collect();
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();

    for spec in files {
        let cwd = spec.cwd.as_deref().unwrap_or("");
        let root = match join_slash(&[cwd]) {
            rel if rel.is_empty() => project_dir.to_path_buf(),
            rel => project_dir.join(rel),
        };
        let patterns = PatternSet::new(&spec.src)?;
        for rel in collect_matching(&root, &patterns)? {
            if excluded.contains(&join_slash(&[cwd, rel.as_str()])) {
                tracing::debug!("skipping {rel}: excluded from archive");
                continue;
            }
            let name = join_slash(&[spec.dest.as_deref().unwrap_or(""), rel.as_str()]);
            if !seen.insert(name.clone()) {
                continue;
            }
            entries.push(ArchiveEntry {
                source: root.join(&rel),
                name,
            });
        }
    }

    if entries.is_empty() {
        tracing::warn!("no files matched; the archive will be empty");
    }
    Ok(entries)
}
