use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::bytecode::{FunctionGraph, compile_error::CompileError, verify::verify};

/// File signature of a serialized graph.
pub const MAGIC: [u8; 4] = *b"BFCG";

/// Bumped whenever the encoding of `FunctionGraph` changes.
pub const FORMAT_VERSION: u16 = 1;

/// Conventional extension for artifact files.
pub const EXTENSION: &str = "bfo";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode artifact: {0}")]
    Encode(#[source] postcard::Error),

    #[error("cannot decode artifact: {0}")]
    Decode(#[source] postcard::Error),

    #[error("not a compiled tape program (bad signature)")]
    BadMagic,

    #[error(
        "unsupported artifact version {found} (expected {expected})",
        expected = FORMAT_VERSION
    )]
    UnsupportedVersion { found: u16 },

    #[error("artifact holds an invalid graph: {0}")]
    Invalid(#[from] CompileError),
}

/// Portable on-disk form of a translated program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    magic: [u8; 4],
    version: u16,
    pub graph: FunctionGraph,
}

impl Artifact {
    pub fn new(graph: FunctionGraph) -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            graph,
        }
    }

    pub fn into_graph(self) -> FunctionGraph {
        self.graph
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        postcard::to_allocvec(self).map_err(ArtifactError::Encode)
    }

    /// Decode and re-verify an artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        if !bytes.starts_with(&MAGIC) {
            return Err(ArtifactError::BadMagic);
        }

        let artifact: Artifact = postcard::from_bytes(bytes).map_err(ArtifactError::Decode)?;
        if artifact.version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: artifact.version,
            });
        }

        verify(&artifact.graph)?;
        Ok(artifact)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read artifact");
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::compile::Compiler;
    use crate::bytecode::Op;

    fn sample() -> Artifact {
        Artifact::new(Compiler::new().compile("+[>+<-]>.").unwrap())
    }

    #[test]
    fn test_bytes_start_with_signature() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"BFCG");
    }

    #[test]
    fn test_decoding_restores_the_graph() {
        let artifact = sample();
        let decoded = Artifact::from_bytes(&artifact.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, artifact);
    }

    #[test]
    fn test_rejects_foreign_bytes() {
        assert!(matches!(
            Artifact::from_bytes(b"\x7fELF...."),
            Err(ArtifactError::BadMagic)
        ));
    }

    #[test]
    fn test_rejects_truncated_artifact() {
        let bytes = sample().to_bytes().unwrap();
        assert!(matches!(
            Artifact::from_bytes(&bytes[..bytes.len() / 2]),
            Err(ArtifactError::Decode(_))
        ));
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut artifact = sample();
        artifact.version = FORMAT_VERSION + 1;
        let bytes = artifact.to_bytes().unwrap();
        assert!(matches!(
            Artifact::from_bytes(&bytes),
            Err(ArtifactError::UnsupportedVersion { found }) if found == FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn test_loaded_graph_is_verified() {
        let mut artifact = sample();
        artifact.graph.blocks[0].ops.retain(|op| !matches!(op, Op::AllocTape { .. }));
        let bytes = artifact.to_bytes().unwrap();
        assert!(matches!(
            Artifact::from_bytes(&bytes),
            Err(ArtifactError::Invalid(_))
        ));

        let mut artifact = sample();
        artifact.graph.blocks.last_mut().unwrap().terminator = None;
        assert!(matches!(
            Artifact::from_bytes(&artifact.to_bytes().unwrap()),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("prog.{}", EXTENSION));
        let artifact = sample();
        artifact.write_to(&path).unwrap();
        assert_eq!(Artifact::read_from(&path).unwrap(), artifact);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifact::read_from(&dir.path().join("nope.bfo")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains("nope.bfo"));
    }
}
