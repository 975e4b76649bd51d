//! Constants and enums for the reference data directory.

use std::path::Path;

/// Reference files that must be present in a data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    /// `cog_alignment.fasta` (UK sequences)
    CogAlignment,
    /// `cog_metadata.csv` (UK metadata, searched by metadata filters)
    CogMetadata,
    /// `cog_global_metadata.csv`
    CogGlobalMetadata,
    /// `cog_global_alignment.fasta`
    CogGlobalAlignment,
    /// `cog_global_tree.nexus`
    CogGlobalTree,
}

impl DataFile {
    /// Every required file, in the order they are reported.
    pub const ALL: [DataFile; 5] = [
        DataFile::CogGlobalTree,
        DataFile::CogMetadata,
        DataFile::CogGlobalMetadata,
        DataFile::CogGlobalAlignment,
        DataFile::CogAlignment,
    ];

    /// File name inside the data directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CogAlignment => "cog_alignment.fasta",
            Self::CogMetadata => "cog_metadata.csv",
            Self::CogGlobalMetadata => "cog_global_metadata.csv",
            Self::CogGlobalAlignment => "cog_global_alignment.fasta",
            Self::CogGlobalTree => "cog_global_tree.nexus",
        }
    }

    /// Configuration key the resolved path is stored under.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::CogAlignment => "cog_seqs",
            Self::CogMetadata => "cog_metadata",
            Self::CogGlobalMetadata => "cog_global_metadata",
            Self::CogGlobalAlignment => "cog_global_seqs",
            Self::CogGlobalTree => "cog_tree",
        }
    }
}

impl AsRef<Path> for DataFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DataFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DataFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
