use std::sync::Arc;

use alloy::primitives::{Address, U256};
use minikit_core::abi::{CallArg, CallEncoder};
use minikit_core::chain::Chain;
use minikit_core::clock::{Clock, SystemClock};
use minikit_core::config::{Config, WarnLevel};
use minikit_core::metadata::Metadata;
use minikit_core::offset;
use minikit_core::tx::{self, ExecutionResponse, TransactionSerializer, UnsignedTransaction};
use minikit_core::validate::{MetadataValidator, SchemaValidator, ValidatedMetadata};

/// Shared application state passed to all route handlers.
///
/// Everything here is read-only; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chain: Chain,
    pub contract: Address,
    pub validator: Arc<dyn MetadataValidator>,
    pub encoder: Arc<dyn CallEncoder>,
    pub serializer: Arc<dyn TransactionSerializer>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Resolve config into ready collaborators. Fails if the config has
    /// validation errors.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if !errors.is_empty() {
            anyhow::bail!("invalid config: {}", errors.join("; "));
        }

        let chain = config.chain()?;
        let contract = config.contract.parsed_address()?;
        let encoder = config.contract.encoder()?;
        let serializer = tx::serializer_for(config.transaction.encoding);

        Ok(Self {
            config: Arc::new(config),
            chain,
            contract,
            validator: Arc::new(SchemaValidator),
            encoder: Arc::new(encoder),
            serializer: Arc::from(serializer),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_validator(mut self, validator: impl MetadataValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn with_encoder(mut self, encoder: impl CallEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    pub fn with_serializer(mut self, serializer: impl TransactionSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Build and validate the action metadata for a caller at `base_url`.
    pub fn metadata(&self, base_url: &str) -> minikit_core::Result<ValidatedMetadata> {
        let metadata = Metadata::build(&self.config.metadata, &self.config.network, base_url);
        self.validator.validate(metadata)
    }

    /// Build the serialized unsigned transaction storing `message`.
    pub fn execute(&self, message: &str) -> minikit_core::Result<ExecutionResponse> {
        let timestamp = offset::optimized_timestamp(self.clock.as_ref(), message)?;
        let offset = offset::offset(message);

        let data = self.encoder.encode_call(
            &self.config.contract.function,
            &[
                CallArg::String(message.to_string()),
                CallArg::Uint(U256::from(timestamp)),
            ],
        )?;

        let envelope = UnsignedTransaction {
            to: self.contract,
            data,
            chain_id: self.chain.id,
            tx_type: self.config.transaction.tx_type,
        };
        let serialized_transaction = self.serializer.serialize(&envelope)?;

        tracing::info!(
            message_len = message.len(),
            offset,
            timestamp,
            chain_id = self.chain.id,
            "built unsigned transaction"
        );

        Ok(ExecutionResponse {
            serialized_transaction,
            chain_id: self.chain.name.to_string(),
        })
    }
}
