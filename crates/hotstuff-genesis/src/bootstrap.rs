//! Bootstrap: turn node keys into a genesis validator set.
//!
//! Brings together key parsing, canonical ordering, static endpoint
//! assignment and extra-data encoding.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use hotstuff_genesis_core::{
    Address, GenesisExtra, KeyCapability, NodeId, NodeRecord, ValidatorSet, EXTRA_VANITY,
};

use crate::error::{BootstrapError, Result};

/// Configuration for bootstrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Host used in every static endpoint.
    pub host: String,
    /// Port of the first validator; validator `i` (in canonical order) gets
    /// `base_port + i`.
    pub base_port: u16,
    /// Vanity bytes at the front of the genesis extra field.
    #[serde(with = "vanity_hex")]
    pub vanity: [u8; EXTRA_VANITY],
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            base_port: 30300,
            vanity: [0u8; EXTRA_VANITY],
        }
    }
}

impl BootstrapConfig {
    /// Load from a JSON document. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| BootstrapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(BootstrapError::InvalidConfig("host is empty".into()));
        }
        Ok(())
    }

    /// The port assigned to validator `index`.
    fn port_for(&self, index: usize) -> Result<u16> {
        u16::try_from(index)
            .ok()
            .and_then(|i| self.base_port.checked_add(i))
            .ok_or_else(|| {
                BootstrapError::InvalidConfig(format!(
                    "port for validator #{} overflows base port {}",
                    index, self.base_port
                ))
            })
    }
}

/// A validator set ready to be written into genesis.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    config: BootstrapConfig,
    validators: ValidatorSet,
}

impl Bootstrap {
    /// Parse hex node keys (secret or public), then order and annotate them.
    ///
    /// A key that fails to decode is reported with its input index.
    pub fn from_keys<K: AsRef<str>>(
        capability: Arc<dyn KeyCapability>,
        config: BootstrapConfig,
        keys: &[K],
    ) -> Result<Self> {
        let nodes = keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                NodeRecord::parse(key.as_ref(), capability.clone()).map_err(|source| {
                    warn!(index, error = %source, "rejecting node key");
                    BootstrapError::Key { index, source }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_nodes(config, nodes)
    }

    /// Generate `count` fresh validators.
    pub fn generate(
        capability: Arc<dyn KeyCapability>,
        config: BootstrapConfig,
        count: usize,
    ) -> Result<Self> {
        let nodes = (0..count)
            .map(|_| NodeRecord::generate(capability.clone()))
            .collect();
        Self::from_nodes(config, nodes)
    }

    /// Order existing records and attach their static endpoints.
    pub fn from_nodes(config: BootstrapConfig, nodes: Vec<NodeRecord>) -> Result<Self> {
        config.validate()?;

        let ordered = ValidatorSet::new(nodes).map_err(|e| {
            warn!(error = %e, "refusing to build validator set");
            BootstrapError::Core(e)
        })?;

        let annotated = ordered
            .into_nodes()
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let port = config.port_for(index)?;
                let node = node
                    .with_static_endpoint(&config.host, port)
                    .map_err(|source| BootstrapError::Endpoint { index, source })?;
                debug!(
                    index,
                    address = %node.address(),
                    port,
                    "validator"
                );
                Ok(node)
            })
            .collect::<Result<Vec<_>>>()?;

        // Already ordered and duplicate-free; re-wrapping keeps the order.
        let validators = ValidatorSet::new(annotated)?;
        info!(validators = validators.len(), "validator set ready");

        Ok(Self { config, validators })
    }

    /// The configuration in use.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// The validators in canonical order.
    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    /// The validator records in canonical order.
    pub fn nodes(&self) -> &[NodeRecord] {
        self.validators.nodes()
    }

    /// The validator addresses in canonical order.
    pub fn addresses(&self) -> Vec<Address> {
        self.validators.addresses()
    }

    /// The structured genesis extra value.
    pub fn extra(&self) -> GenesisExtra {
        GenesisExtra::genesis(self.addresses()).with_vanity(self.config.vanity)
    }

    /// Genesis extra-data bytes.
    pub fn genesis_extra(&self) -> Vec<u8> {
        let bytes = self.extra().encode();
        info!(len = bytes.len(), "encoded genesis extra");
        bytes
    }

    /// Genesis extra-data as `0x`-prefixed hex, as written into a genesis file.
    pub fn genesis_extra_hex(&self) -> String {
        format!("0x{}", hex::encode(self.genesis_extra()))
    }

    /// Static endpoint descriptors in canonical order.
    pub fn static_nodes(&self) -> Vec<String> {
        self.nodes()
            .iter()
            .filter_map(|n| n.static_endpoint_descriptor().map(str::to_string))
            .collect()
    }

    /// The static node list as pretty-printed JSON.
    pub fn static_nodes_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.static_nodes())?)
    }

    /// A serializable summary of the whole bootstrap.
    pub fn report(&self) -> BootstrapReport {
        BootstrapReport {
            validators: self
                .nodes()
                .iter()
                .map(|node| ValidatorEntry {
                    address: node.address(),
                    node_id: node.node_id(),
                    public_key: node.public_key().to_hex(),
                    static_endpoint: node
                        .static_endpoint_descriptor()
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect(),
            genesis_extra: self.genesis_extra_hex(),
        }
    }
}

/// One validator in a [`BootstrapReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorEntry {
    pub address: Address,
    pub node_id: NodeId,
    /// Compressed public key, `0x`-prefixed hex.
    pub public_key: String,
    pub static_endpoint: String,
}

/// Everything an operator distributes after bootstrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapReport {
    pub validators: Vec<ValidatorEntry>,
    pub genesis_extra: String,
}

mod vanity_hex {
    use hotstuff_genesis_core::EXTRA_VANITY;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        vanity: &[u8; EXTRA_VANITY],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(vanity)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[u8; EXTRA_VANITY], D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(stripped).map_err(serde::de::Error::custom)?;
        bytes.try_into().map_err(|b: Vec<u8>| {
            serde::de::Error::custom(format!(
                "vanity must be {} bytes, got {}",
                EXTRA_VANITY,
                b.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotstuff_genesis_core::{CoreError, Secp256k1};

    const KEY: &str = "562aa98da69477996bd82422b97698541f25e71ba2f803970947b3ad8bdb7afa";

    fn cap() -> Arc<dyn KeyCapability> {
        Arc::new(Secp256k1)
    }

    #[test]
    fn test_default_config() {
        let config = BootstrapConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.base_port, 30300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = BootstrapConfig::from_json(r#"{ "host": "10.0.0.5" }"#).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.base_port, 30300);
        assert_eq!(config.vanity, [0u8; EXTRA_VANITY]);
    }

    #[test]
    fn test_config_vanity_roundtrip() {
        let config = BootstrapConfig {
            vanity: [0x5a; EXTRA_VANITY],
            ..BootstrapConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(BootstrapConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_bad_vanity() {
        let err = BootstrapConfig::from_json(r#"{ "vanity": "0x1234" }"#).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidConfig(_)));

        let err = BootstrapConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_rejects_empty_host() {
        let err = BootstrapConfig::from_json(r#"{ "host": "" }"#).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidConfig(_)));
    }

    #[test]
    fn test_port_overflow() {
        let config = BootstrapConfig {
            base_port: u16::MAX,
            ..BootstrapConfig::default()
        };
        let err = Bootstrap::generate(cap(), config, 2).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_key_reports_index() {
        let keys = [KEY, "0xdeadbeef"];
        match Bootstrap::from_keys(cap(), BootstrapConfig::default(), &keys).unwrap_err() {
            BootstrapError::Key { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(source, CoreError::MalformedKeyEncoding(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let keys = [KEY, KEY];
        let err = Bootstrap::from_keys(cap(), BootstrapConfig::default(), &keys).unwrap_err();
        assert!(matches!(
            err.core(),
            Some(CoreError::DuplicateValidatorAddress { first: 0, second: 1, .. })
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let err = Bootstrap::generate(cap(), BootstrapConfig::default(), 0).unwrap_err();
        assert_eq!(err.core(), Some(&CoreError::EmptyValidatorSet));
    }

    #[test]
    fn test_ports_follow_canonical_order() {
        let bootstrap = Bootstrap::generate(cap(), BootstrapConfig::default(), 3).unwrap();
        let endpoints = bootstrap.static_nodes();
        assert_eq!(endpoints.len(), 3);
        for (i, (endpoint, node)) in endpoints.iter().zip(bootstrap.nodes()).enumerate() {
            assert_eq!(
                endpoint,
                &format!("{}@127.0.0.1:{}", node.node_id().to_hex(), 30300 + i)
            );
        }
    }

    #[test]
    fn test_vanity_is_prefix_of_extra() {
        let config = BootstrapConfig {
            vanity: [0x01; EXTRA_VANITY],
            ..BootstrapConfig::default()
        };
        let bootstrap = Bootstrap::from_keys(cap(), config, &[KEY]).unwrap();
        let extra = bootstrap.genesis_extra();
        assert_eq!(&extra[..EXTRA_VANITY], &[0x01; EXTRA_VANITY]);
        assert_eq!(
            GenesisExtra::decode(&extra).unwrap().validators,
            bootstrap.addresses()
        );
    }

    #[test]
    fn test_static_nodes_json() {
        let bootstrap = Bootstrap::from_keys(cap(), BootstrapConfig::default(), &[KEY]).unwrap();
        let json = bootstrap.static_nodes_json().unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bootstrap.static_nodes());
        assert!(json.contains('\n'));
    }
}
