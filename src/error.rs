use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a mosaic into a file on disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Mosaic too large for PNG: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Failure while generating images.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Placement failed: {0}")]
    Placement(#[from] color_placement::Error),

    #[error("Output failed: {0}")]
    Output(#[from] OutputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_error_png_encode() {
        let error = OutputError::PngEncode("bad header".to_string());
        assert_eq!(error.to_string(), "PNG encode error: bad header");
    }

    #[test]
    fn test_output_error_dimensions() {
        let error = OutputError::UnsupportedDimensions {
            width: 1 << 33,
            height: 1,
        };
        assert_eq!(error.to_string(), "Mosaic too large for PNG: 8589934592x1");
    }

    #[test]
    fn test_output_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: OutputError = io_error.into();
        assert!(matches!(error, OutputError::Io(_)));
        assert!(error.to_string().contains("missing"));
    }

    #[test]
    fn test_config_file_error_names_path() {
        let error = ConfigFileError::Read {
            path: PathBuf::from("/etc/every-color.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read /etc/every-color.yaml: not found"
        );
    }

    #[test]
    fn test_generate_error_from_placement() {
        let inner = color_placement::ConfigError::BitDepthNotDivisible(10);
        let error: GenerateError = color_placement::Error::from(inner).into();
        assert_eq!(
            error.to_string(),
            "Placement failed: configuration error: bit depth 10 is not divisible by 3"
        );
    }
}
