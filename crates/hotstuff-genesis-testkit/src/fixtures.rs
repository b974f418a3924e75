//! Test fixtures and helpers.
//!
//! Reference node keys and a deterministic key capability for tests that
//! need reproducible "generated" validators.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use hotstuff_genesis_core::{
    keccak_address, Address, KeyCapability, NodeRecord, PublicKey, Secp256k1, SecretKey,
};

/// The four reference node keys used across the test suite.
pub const REFERENCE_NODE_KEYS: [&str; 4] = [
    "562aa98da69477996bd82422b97698541f25e71ba2f803970947b3ad8bdb7afa",
    "8bea3ce27136df435ada62a40a4226404879b3c42e2e86ba9a236b4a61c99c26",
    "53f7d9ec7657cdd3a3eaa8ddd126d36fbc60203448fca1bbfccec0d59d173da6",
    "305baf1e19a2da40b413dfb62b206b0ac74cb3d7e975cb70fe8391cbbe174f2a",
];

/// Published validator addresses, in their published (unsorted) order.
pub const REFERENCE_VALIDATORS: [&str; 4] = [
    "0x40FBBE484b8Ee6139Af08446950B088e10b2306A",
    "0x8C161d85fDC086AC6726bCEDe39f2CCB1Afa3bc8",
    "0x22C21D4F64aabA7ec837b6B93639dB8cF514dAD5",
    "0xBE6805C4c904B9cc39065ADC4cCcF4FCaB167AE6",
];

/// A key capability whose key generation is driven by a seeded RNG.
///
/// Address derivation is the production Keccak-256 derivation, so records
/// built with it are interchangeable with production ones.
pub struct SeededSecp256k1 {
    rng: Mutex<StdRng>,
}

impl SeededSecp256k1 {
    /// Create from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl KeyCapability for SeededSecp256k1 {
    fn generate_key_pair(&self) -> (SecretKey, PublicKey) {
        let mut rng = self.rng.lock().expect("seeded rng poisoned");
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            // Rejection-sample the rare out-of-range scalar.
            if let Ok(secret) = SecretKey::from_slice(&bytes) {
                let public = secret.public_key();
                return (secret, public);
            }
        }
    }

    fn derive_address(&self, public_key: &PublicKey) -> Address {
        keccak_address(public_key)
    }
}

/// The production capability, boxed for `NodeRecord`.
pub fn capability() -> Arc<dyn KeyCapability> {
    Arc::new(Secp256k1)
}

/// A seeded capability, boxed for `NodeRecord`.
pub fn seeded_capability(seed: u64) -> Arc<dyn KeyCapability> {
    Arc::new(SeededSecp256k1::new(seed))
}

/// Records for [`REFERENCE_NODE_KEYS`], in key order.
pub fn reference_nodes() -> Vec<NodeRecord> {
    let cap = capability();
    REFERENCE_NODE_KEYS
        .iter()
        .map(|key| NodeRecord::from_private_hex(key, cap.clone()).expect("reference key is valid"))
        .collect()
}

/// Parsed [`REFERENCE_VALIDATORS`], in published order.
pub fn reference_validators() -> Vec<Address> {
    REFERENCE_VALIDATORS
        .iter()
        .map(|a| Address::from_hex(a).expect("reference address is valid"))
        .collect()
}

/// `count` generated records from a seeded capability.
pub fn generated_nodes(seed: u64, count: usize) -> Vec<NodeRecord> {
    let cap = seeded_capability(seed);
    (0..count).map(|_| NodeRecord::generate(cap.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_nodes_distinct() {
        let nodes = reference_nodes();
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                assert_ne!(nodes[i].address(), nodes[j].address());
            }
        }
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let a = generated_nodes(7, 4);
        let b = generated_nodes(7, 4);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.address(), y.address());
            assert_eq!(x.raw_key_hex(), y.raw_key_hex());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generated_nodes(1, 1);
        let b = generated_nodes(2, 1);
        assert_ne!(a[0].address(), b[0].address());
    }

    #[test]
    fn test_reference_validators_parse() {
        assert_eq!(reference_validators().len(), 4);
    }
}
