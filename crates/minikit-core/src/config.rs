use crate::abi::{self, AbiCallEncoder};
use crate::chain::Chain;
use crate::error::{MiniError, Result};
use crate::tx::{TxEncoding, TxType};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ContractConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default = "default_contract_address")]
    pub address: String,
    #[serde(default = "default_function")]
    pub function: String,
    /// JSON ABI file. The built-in `storeMessage(string,uint256)` ABI is used
    /// when unset. Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_path: Option<PathBuf>,
}

fn default_contract_address() -> String {
    "0x29792b598A30a6649a75c299f9FC67bfe6c033f2".to_string()
}

fn default_function() -> String {
    "storeMessage".to_string()
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: default_contract_address(),
            function: default_function(),
            abi_path: None,
        }
    }
}

impl ContractConfig {
    pub fn parsed_address(&self) -> Result<Address> {
        self.address
            .parse::<Address>()
            .map_err(|_| MiniError::InvalidAddress(self.address.clone()))
    }

    /// Load the configured ABI, or the built-in one.
    pub fn encoder(&self) -> Result<AbiCallEncoder> {
        match &self.abi_path {
            Some(path) => {
                let data = std::fs::read_to_string(path)?;
                AbiCallEncoder::from_json(&data)
            }
            None => AbiCallEncoder::from_json(abi::STORE_MESSAGE_ABI),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionConfig {
    #[serde(rename = "type", default)]
    pub tx_type: TxType,
    #[serde(default)]
    pub encoding: TxEncoding,
}

// ---------------------------------------------------------------------------
// MetadataConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub label: String,
    pub description: String,
    pub path: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            label: "Almacenar Mensaje".to_string(),
            description: "Almacena tu mensaje con un timestamp personalizado calculado para \
                          almacenamiento óptimo"
                .to_string(),
            path: "/api/mi-app".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamConfig {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ParamConfig {
    fn default() -> Self {
        Self {
            name: "mensaje".to_string(),
            label: "¡Mensaje de Prueba!".to_string(),
            description: Some(
                "Ingresa el mensaje que quieres almacenar en la blockchain".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub action: ActionConfig,
    #[serde(default)]
    pub param: ParamConfig,
}

fn default_url() -> String {
    "https://sherry.social".to_string()
}

fn default_icon() -> String {
    "https://avatars.githubusercontent.com/u/117962315".to_string()
}

fn default_title() -> String {
    "Mensaje con Timestamp".to_string()
}

fn default_description() -> String {
    "Almacena un mensaje con un timestamp optimizado calculado por nuestro algoritmo".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            icon: default_icon(),
            title: default_title(),
            description: default_description(),
            action: ActionConfig::default(),
            param: ParamConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// RouteConfig
// ---------------------------------------------------------------------------

/// One mounted action endpoint. Every route serves metadata and preflight;
/// `write` additionally mounts the transaction builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    #[serde(default)]
    pub write: bool,
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path: "/api/mi-app".to_string(),
            write: true,
        },
        RouteConfig {
            path: "/api/example".to_string(),
            write: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub transaction: TransactionConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

fn default_version() -> u32 {
    1
}

fn default_network() -> String {
    "fuji".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            network: default_network(),
            contract: ContractConfig::default(),
            transaction: TransactionConfig::default(),
            metadata: MetadataConfig::default(),
            routes: default_routes(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MiniError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&data)?;

        if let (Some(abi_path), Some(dir)) = (cfg.contract.abi_path.as_mut(), path.parent()) {
            if abi_path.is_relative() {
                *abi_path = dir.join(&*abi_path);
            }
        }
        Ok(cfg)
    }

    /// Load `path` when given, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn chain(&self) -> Result<Chain> {
        Chain::by_key(&self.network)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut error = |message: String| {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message,
            })
        };

        // 1. Network must be in the chain registry
        if let Err(e) = self.chain() {
            error(e.to_string());
        }

        // 2. Contract address must parse
        if let Err(e) = self.contract.parsed_address() {
            error(e.to_string());
        }

        // 3. ABI must load and expose `function(string, uintN)`
        match self.contract.encoder() {
            Ok(encoder) => {
                if let Err(e) = encoder.check_message_function(&self.contract.function) {
                    error(e.to_string());
                }
            }
            Err(e) => error(format!("failed to load contract ABI: {e}")),
        }

        // 4. Routes: non-empty, absolute, unique
        if self.routes.is_empty() {
            error("no routes configured".to_string());
        }
        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.path.starts_with('/') {
                error(format!("route path must start with '/': {}", route.path));
            }
            if !seen.insert(route.path.as_str()) {
                error(format!("duplicate route path: {}", route.path));
            }
        }

        if !self.routes.is_empty() && !self.routes.iter().any(|r| r.write) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no route has write enabled; transactions cannot be built".to_string(),
            });
        }

        warnings
    }
}
