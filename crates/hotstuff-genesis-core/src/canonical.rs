//! Canonical genesis extra-data encoding.
//!
//! The genesis header's extra field is laid out as:
//!
//! ```text
//! vanity (32 bytes) || RLP([validators, seal, committed_seal, salt])
//! ```
//!
//! - `validators`: list of 20-byte address strings, in the order given
//! - `seal`: byte string (empty at genesis)
//! - `committed_seal`: list of byte strings (empty at genesis)
//! - `salt`: byte string (empty at genesis)
//!
//! This is the layout the consensus engine reads back out of the genesis
//! header. It is FROZEN: any change yields a different genesis hash.
//!
//! The encoder never reorders its input. Callers order validators with
//! [`crate::ordering`] first.

use rlp::{Rlp, RlpStream};
use tracing::trace;

use crate::error::{CoreError, Result};
use crate::ordering::find_duplicate;
use crate::types::{decode_hex, Address, ADDRESS_LENGTH};

/// Bytes reserved for vanity data ahead of the RLP payload.
pub const EXTRA_VANITY: usize = 32;

/// Number of RLP list items in the extra payload.
const EXTRA_FIELDS: usize = 4;

/// RLP field positions.
mod fields {
    pub const VALIDATORS: usize = 0;
    pub const SEAL: usize = 1;
    pub const COMMITTED_SEAL: usize = 2;
    pub const SALT: usize = 3;
}

/// The decoded structure of a header's extra field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisExtra {
    pub vanity: [u8; EXTRA_VANITY],
    pub validators: Vec<Address>,
    pub seal: Vec<u8>,
    pub committed_seal: Vec<Vec<u8>>,
    pub salt: Vec<u8>,
}

impl GenesisExtra {
    /// The genesis form: zero vanity and no seals.
    pub fn genesis(validators: Vec<Address>) -> Self {
        Self {
            vanity: [0u8; EXTRA_VANITY],
            validators,
            seal: Vec::new(),
            committed_seal: Vec::new(),
            salt: Vec::new(),
        }
    }

    /// Replace the vanity bytes.
    pub fn with_vanity(mut self, vanity: [u8; EXTRA_VANITY]) -> Self {
        self.vanity = vanity;
        self
    }

    /// Encode to extra-data bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(EXTRA_FIELDS);

        stream.begin_list(self.validators.len());
        for validator in &self.validators {
            stream.append(&validator.0.to_vec());
        }
        stream.append(&self.seal);
        stream.begin_list(self.committed_seal.len());
        for seal in &self.committed_seal {
            stream.append(seal);
        }
        stream.append(&self.salt);

        let payload = stream.out();
        trace!(
            validators = self.validators.len(),
            payload_len = payload.len(),
            "encoded genesis extra"
        );

        let mut buf = Vec::with_capacity(EXTRA_VANITY + payload.len());
        buf.extend_from_slice(&self.vanity);
        buf.extend_from_slice(&payload);
        buf
    }

    /// Decode from extra-data bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < EXTRA_VANITY {
            return Err(CoreError::MalformedExtra(format!(
                "extra data is {} bytes, shorter than the {}-byte vanity",
                bytes.len(),
                EXTRA_VANITY
            )));
        }
        let (vanity_bytes, payload) = bytes.split_at(EXTRA_VANITY);
        let mut vanity = [0u8; EXTRA_VANITY];
        vanity.copy_from_slice(vanity_bytes);

        let rlp = Rlp::new(payload);
        if !rlp.is_list() {
            return Err(CoreError::MalformedExtra("payload is not an RLP list".into()));
        }
        let info = rlp.payload_info()?;
        if info.header_len + info.value_len != payload.len() {
            return Err(CoreError::MalformedExtra("trailing bytes after payload".into()));
        }
        let count = rlp.item_count()?;
        if count != EXTRA_FIELDS {
            return Err(CoreError::MalformedExtra(format!(
                "expected {} fields, found {}",
                EXTRA_FIELDS, count
            )));
        }

        let validators_rlp = rlp.at(fields::VALIDATORS)?;
        if !validators_rlp.is_list() {
            return Err(CoreError::MalformedExtra("validators is not a list".into()));
        }
        let validators = validators_rlp
            .iter()
            .map(|item| {
                if item.is_list() {
                    return Err(CoreError::MalformedExtra("validator entry is a list".into()));
                }
                let data = item.data()?;
                if data.len() != ADDRESS_LENGTH {
                    return Err(CoreError::MalformedExtra(format!(
                        "validator entry is {} bytes, expected {}",
                        data.len(),
                        ADDRESS_LENGTH
                    )));
                }
                Address::try_from(data)
            })
            .collect::<Result<Vec<_>>>()?;

        let seal: Vec<u8> = rlp.val_at(fields::SEAL)?;
        let committed_seal: Vec<Vec<u8>> = rlp.list_at(fields::COMMITTED_SEAL)?;
        let salt: Vec<u8> = rlp.val_at(fields::SALT)?;

        Ok(Self {
            vanity,
            validators,
            seal,
            committed_seal,
            salt,
        })
    }
}

/// Encode an ordered validator list into genesis extra data.
///
/// The list must be non-empty and free of duplicates. Its order is kept
/// exactly as given.
pub fn encode_genesis_extra(validators: &[Address]) -> Result<Vec<u8>> {
    check_validators(validators)?;
    Ok(GenesisExtra::genesis(validators.to_vec()).encode())
}

/// [`encode_genesis_extra`], rendered as `0x`-prefixed hex.
pub fn encode_genesis_extra_hex(validators: &[Address]) -> Result<String> {
    Ok(format!("0x{}", hex::encode(encode_genesis_extra(validators)?)))
}

/// Decode the validator list from genesis extra data.
///
/// The list must be non-empty and free of duplicates, the same as
/// [`encode_genesis_extra`] requires. Use [`GenesisExtra::decode`] for the
/// structure alone.
pub fn decode_genesis_extra(bytes: &[u8]) -> Result<Vec<Address>> {
    let validators = GenesisExtra::decode(bytes)?.validators;
    check_validators(&validators)?;
    Ok(validators)
}

/// [`decode_genesis_extra`] from `0x`-prefixed (or bare) hex.
pub fn decode_genesis_extra_hex(s: &str) -> Result<Vec<Address>> {
    let bytes = decode_hex(s).map_err(|e| CoreError::MalformedExtra(e.to_string()))?;
    decode_genesis_extra(&bytes)
}

/// Reject empty and duplicate-bearing validator lists.
fn check_validators(validators: &[Address]) -> Result<()> {
    if validators.is_empty() {
        return Err(CoreError::EmptyValidatorSet);
    }
    if let Some((address, first, second)) = find_duplicate(validators) {
        return Err(CoreError::DuplicateValidatorAddress {
            address,
            first,
            second,
        });
    }
    Ok(())
}
