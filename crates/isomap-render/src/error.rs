use isomap_biome::BiomeError;

#[derive(Debug)]
pub enum RenderError {
    /// Biome data or biome textures could not be obtained while tinting is on.
    ResourceAcquisitionFailure {
        resource: &'static str,
        source: Option<BiomeError>,
    },
    /// A biome index with no entry in the color table it selects.
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },
    /// A lifecycle operation called in a state that does not allow it.
    ContractViolation {
        op: &'static str,
        state: &'static str,
    },
}

impl RenderError {
    pub(crate) fn missing(resource: &'static str) -> Self {
        RenderError::ResourceAcquisitionFailure {
            resource,
            source: None,
        }
    }

    pub(crate) fn biome(resource: &'static str, err: BiomeError) -> Self {
        RenderError::ResourceAcquisitionFailure {
            resource,
            source: Some(err),
        }
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::ResourceAcquisitionFailure {
                resource,
                source: Some(err),
            } => write!(f, "could not acquire {}: {}", resource, err),
            RenderError::ResourceAcquisitionFailure {
                resource,
                source: None,
            } => write!(f, "could not acquire {}: not provided", resource),
            RenderError::IndexOutOfRange { table, index, len } => write!(
                f,
                "biome index {} out of range for {} table of {} colors",
                index, table, len
            ),
            RenderError::ContractViolation { op, state } => {
                write!(f, "{} called while render mode is {}", op, state)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ResourceAcquisitionFailure {
                source: Some(err), ..
            } => Some(err),
            _ => None,
        }
    }
}
