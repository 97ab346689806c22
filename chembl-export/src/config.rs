use chembl_client::{
    ClientOptions, DEFAULT_BASE_URL, DEFAULT_SEARCH_LIMIT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, MAX_PAGE_SIZE,
};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use shared_types::{Accession, ResolutionPolicy, StandardType, DEFAULT_STANDARD_TYPE};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pipeline::PipelineOptions;

pub const DEFAULT_ACCESSION: &str = "herg";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub chembl: ChemblConfig,
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChemblConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: usize,
    pub search_limit: usize,
    pub user_agent: String,
}

impl Default for ChemblConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: MAX_PAGE_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExportSettings {
    pub accession: String,
    pub standard_type: String,
    pub output_dir: PathBuf,
    pub resolution: ResolutionPolicy,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            accession: DEFAULT_ACCESSION.to_string(),
            standard_type: DEFAULT_STANDARD_TYPE.to_string(),
            output_dir: PathBuf::from("."),
            resolution: ResolutionPolicy::First,
        }
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub accession: Option<String>,
    pub standard_type: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub resolution: Option<ResolutionPolicy>,
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

impl ExportConfig {
    /// Load from `explicit_path` if given (it must exist), otherwise from the
    /// default location if a file is there, otherwise built-in defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "Config file not found at {:?}",
                    path
                )));
            }
            let config = Self::load_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }

        let config_path = get_config_path();
        if config_path.exists() {
            let config = Self::load_file(&config_path)?;
            Ok((config, Some(config_path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        builder.try_deserialize()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        builder.try_deserialize()
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(accession) = overrides.accession {
            self.export.accession = accession;
        }
        if let Some(standard_type) = overrides.standard_type {
            self.export.standard_type = standard_type;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.export.output_dir = output_dir;
        }
        if let Some(resolution) = overrides.resolution {
            self.export.resolution = resolution;
        }
        if let Some(base_url) = overrides.base_url {
            self.chembl.base_url = base_url;
        }
        if let Some(page_size) = overrides.page_size {
            self.chembl.page_size = page_size;
        }
    }

    pub fn accession(&self) -> Result<Accession, shared_types::ExportError> {
        Accession::new(self.export.accession.as_str())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.chembl.base_url.clone(),
            timeout: Duration::from_secs(self.chembl.timeout_secs),
            page_size: self.chembl.page_size,
            user_agent: self.chembl.user_agent.clone(),
        }
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions, shared_types::ExportError> {
        Ok(PipelineOptions {
            standard_type: StandardType::new(self.export.standard_type.as_str())?,
            output_dir: self.export.output_dir.clone(),
            resolution: self.export.resolution,
            search_limit: self.chembl.search_limit,
        })
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("chembl-export").join("config.toml")
    } else {
        PathBuf::from("chembl-export.toml")
    }
}
