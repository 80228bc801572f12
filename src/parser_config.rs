use std::path::{Path, PathBuf};

use crate::errors::{IesError, IesResult};

/// Configuration for resource limits and TILT resolution during parsing
///
/// Header counts drive every allocation the parser makes, so they are checked
/// against these limits before any array is read. This is separate from
/// ValidationConfig, which handles semantic checks on a parsed profile.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum input size in bytes
    pub max_file_size: usize,

    /// Maximum number of label lines before the TILT directive
    pub max_labels: usize,

    /// Maximum number of vertical or horizontal angles
    pub max_angles_per_axis: usize,

    /// Maximum number of TILT angle/multiplier pairs
    pub max_tilt_pairs: usize,

    /// Whether `TILT=<file>` references are followed
    pub resolve_external_tilt: bool,

    /// Directory relative TILT file paths are resolved against
    pub tilt_base_dir: Option<PathBuf>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024, // 16MB, far beyond any real profile
            max_labels: 1024,
            max_angles_per_axis: 4096,
            max_tilt_pairs: 1024,
            resolve_external_tilt: true,
            tilt_base_dir: None,
        }
    }
}

impl ParserConfig {
    /// Tight limits for untrusted input; external TILT files are not followed
    pub fn strict() -> Self {
        Self {
            max_file_size: 2 * 1024 * 1024,
            max_labels: 256,
            max_angles_per_axis: 1024,
            max_tilt_pairs: 256,
            resolve_external_tilt: false,
            tilt_base_dir: None,
        }
    }

    /// Relaxed limits for very dense goniometer data
    pub fn permissive() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024,
            max_labels: 16 * 1024,
            max_angles_per_axis: 65_536,
            max_tilt_pairs: 16 * 1024,
            resolve_external_tilt: true,
            tilt_base_dir: None,
        }
    }

    pub fn with_tilt_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tilt_base_dir = Some(dir.into());
        self
    }

    /// Path an external TILT reference points at
    pub fn resolve_tilt_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        match &self.tilt_base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn check_file_size(&self, size: usize) -> IesResult<()> {
        Self::check_limit("file_size", size, self.max_file_size)
    }

    pub fn check_label_count(&self, count: usize) -> IesResult<()> {
        Self::check_limit("label_count", count, self.max_labels)
    }

    pub fn check_angle_count(&self, field: &str, count: usize) -> IesResult<()> {
        Self::check_limit(field, count, self.max_angles_per_axis)
    }

    pub fn check_tilt_pairs(&self, count: usize) -> IesResult<()> {
        Self::check_limit("tilt_pairs", count, self.max_tilt_pairs)
    }

    fn check_limit(field: &str, size: usize, limit: usize) -> IesResult<()> {
        if size > limit {
            return Err(IesError::DataSizeExceedsLimit {
                field: field.to_string(),
                size,
                limit,
            });
        }
        Ok(())
    }
}
