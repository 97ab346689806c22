use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ExportError;

/// Appended to the accession to form the output file name.
pub const OUTPUT_FILE_SUFFIX: &str = "_compound_from_chembl.csv";

/// Identifier used to look up a biological target (a protein name, gene
/// symbol, UniProt accession or ChEMBL id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accession(String);

impl Accession {
    pub fn new(value: impl Into<String>) -> Result<Self, ExportError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ExportError::InvalidAccession(
                "accession must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<accession>_compound_from_chembl.csv`
    pub fn output_file_name(&self) -> String {
        format!("{}{}", self.0, OUTPUT_FILE_SUFFIX)
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_file_name())
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Accession {
    type Error = ExportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Accession> for String {
    fn from(accession: Accession) -> Self {
        accession.0
    }
}

impl std::str::FromStr for Accession {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let accession = Accession::new("herg").unwrap();
        assert_eq!(accession.output_file_name(), "herg_compound_from_chembl.csv");
    }

    #[test]
    fn test_output_path_joins_dir() {
        let accession = Accession::new("P35367").unwrap();
        let path = accession.output_path(Path::new("/tmp/out"));
        assert_eq!(
            path,
            PathBuf::from("/tmp/out/P35367_compound_from_chembl.csv")
        );
    }

    #[test]
    fn test_trims_whitespace() {
        let accession = Accession::new("  herg \n").unwrap();
        assert_eq!(accession.as_str(), "herg");
    }

    #[test]
    fn test_empty_accession_rejected() {
        assert!(matches!(
            Accession::new(""),
            Err(ExportError::InvalidAccession(_))
        ));
        assert!(matches!(
            Accession::new("   "),
            Err(ExportError::InvalidAccession(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Accession = serde_json::from_str("\"herg\"").unwrap();
        assert_eq!(ok.as_str(), "herg");
        assert!(serde_json::from_str::<Accession>("\"\"").is_err());
    }
}
