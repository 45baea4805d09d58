use std::path::PathBuf;

#[derive(Debug)]
pub enum BiomeError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    BadLength {
        expected: usize,
        actual: usize,
    },
    Image(image::ImageError),
}

impl std::fmt::Display for BiomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiomeError::Io { path, source } => {
                write!(f, "reading {}: {}", path.display(), source)
            }
            BiomeError::BadLength { expected, actual } => write!(
                f,
                "biome grid has {} bytes, expected {}",
                actual, expected
            ),
            BiomeError::Image(err) => write!(f, "colormap: {}", err),
        }
    }
}

impl std::error::Error for BiomeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BiomeError::Io { source, .. } => Some(source),
            BiomeError::Image(err) => Some(err),
            BiomeError::BadLength { .. } => None,
        }
    }
}

impl From<image::ImageError> for BiomeError {
    fn from(err: image::ImageError) -> Self {
        BiomeError::Image(err)
    }
}
