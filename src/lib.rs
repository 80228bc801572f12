pub mod cursor;
pub mod errors;
pub mod parser;
pub mod parser_config;
pub mod profile;
pub mod rescale;
pub mod serialization;
pub mod tilt;
pub mod tokenizing;
pub mod traits;
pub mod utils;
pub mod validation;

pub use cursor::*;
pub use errors::*;
pub use parser::*;
pub use parser_config::*;
pub use profile::*;
pub use rescale::*;
pub use tilt::*;
pub use traits::*;
pub use validation::*;

use bytes::Bytes;
use std::path::Path;
use tracing::debug;

impl PhotometricProfile {
    /// Parse a profile from an in-memory buffer with default limits
    pub fn from_bytes(data: Bytes) -> IesResult<Self> {
        Self::from_bytes_with_config(data, &ParserConfig::default())
    }

    /// Parse a profile from an in-memory buffer
    pub fn from_bytes_with_config(data: Bytes, config: &ParserConfig) -> IesResult<Self> {
        Self::parse_named(data, "", config)
    }

    /// Parse a profile file with default limits
    pub fn from_path(path: impl AsRef<Path>) -> IesResult<Self> {
        Self::from_path_with_config(path, &ParserConfig::default())
    }

    /// Parse a profile file; the profile's display name is the path
    pub fn from_path_with_config(path: impl AsRef<Path>, config: &ParserConfig) -> IesResult<Self> {
        let path = path.as_ref();
        let data = utils::read_file_to_bytes(path)?;
        Self::parse_named(data, &path.display().to_string(), config)
    }

    fn parse_named(data: Bytes, name: &str, config: &ParserConfig) -> IesResult<Self> {
        if data.is_empty() {
            return Err(IesError::EmptyInput {
                source_name: name.to_string(),
            });
        }
        config.check_file_size(data.len())?;

        let mut cursor = LineCursor::new(data);
        let profile = parse_profile(&mut cursor, name, config)?;
        debug!(
            name,
            format = %profile.file.format,
            vertical = profile.photo.num_vert_angles,
            horizontal = profile.photo.num_horz_angles,
            "parsed profile"
        );
        Ok(profile)
    }

    /// Serialize to `path`, replacing any existing file
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> IesResult<()> {
        let buffer = self.to_vec()?;
        utils::write_bytes_to_file(&buffer, path)
    }
}
