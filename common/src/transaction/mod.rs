//! Transaction types and their wire forms.
//!
//! A [`Transaction`] is header + actions; signing covers
//! `sha256(chain_id || packed_transaction || 32 zero bytes)` and the signed
//! result travels to the node as a [`PackedTransaction`].

mod builder;

pub use builder::TransactionBuilder;

use serde::{Deserialize, Serialize};

use crate::{
    crypto::{sha256, Checksum256, Signature},
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
    time::TimePointSec,
};

/// Actor plus the permission it signs with, e.g. `alice@active`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

impl PermissionLevel {
    pub const fn new(actor: Name, permission: Name) -> Self {
        PermissionLevel { actor, permission }
    }
}

impl Serializer for PermissionLevel {
    fn write(&self, writer: &mut Writer) {
        self.actor.write(writer);
        self.permission.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(PermissionLevel {
            actor: Name::read(reader)?,
            permission: Name::read(reader)?,
        })
    }
}

/// A single contract call: which account's contract, which action, who
/// authorizes it, and the binary-packed arguments.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Action {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

impl Action {
    /// Pack `payload` as the action arguments.
    pub fn new<T: Serializer>(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        payload: &T,
    ) -> Self {
        Action {
            account,
            name,
            authorization,
            data: payload.to_bytes(),
        }
    }
}

impl Serializer for Action {
    fn write(&self, writer: &mut Writer) {
        self.account.write(writer);
        self.name.write(writer);
        self.authorization.write(writer);
        self.data.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Action {
            account: Name::read(reader)?,
            name: Name::read(reader)?,
            authorization: Vec::read(reader)?,
            data: Vec::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransactionExtension {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

impl Serializer for TransactionExtension {
    fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.kind);
        self.data.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TransactionExtension {
            kind: reader.read_u16()?,
            data: Vec::read(reader)?,
        })
    }
}

/// Expiration plus the TaPoS reference-block fields and resource limits.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub expiration: TimePointSec,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl Default for TransactionHeader {
    fn default() -> Self {
        TransactionHeader {
            expiration: TimePointSec::default(),
            ref_block_num: 0,
            ref_block_prefix: 0,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        }
    }
}

impl Serializer for TransactionHeader {
    fn write(&self, writer: &mut Writer) {
        self.expiration.write(writer);
        writer.write_u16(self.ref_block_num);
        writer.write_u32(self.ref_block_prefix);
        writer.write_varuint32(self.max_net_usage_words);
        writer.write_u8(self.max_cpu_usage_ms);
        writer.write_varuint32(self.delay_sec);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TransactionHeader {
            expiration: TimePointSec::read(reader)?,
            ref_block_num: reader.read_u16()?,
            ref_block_prefix: reader.read_u32()?,
            max_net_usage_words: reader.read_varuint32()?,
            max_cpu_usage_ms: reader.read_u8()?,
            delay_sec: reader.read_varuint32()?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub header: TransactionHeader,
    pub context_free_actions: Vec<Action>,
    pub actions: Vec<Action>,
    pub transaction_extensions: Vec<TransactionExtension>,
}

impl Transaction {
    /// Transaction id: the digest of the packed form.
    pub fn id(&self) -> Checksum256 {
        sha256(&self.to_bytes())
    }

    /// The digest that signatures cover. The trailing 32 zero bytes stand in
    /// for the context-free data digest, which tests never use.
    pub fn signing_digest(&self, chain_id: &Checksum256) -> Checksum256 {
        let packed = self.to_bytes();
        let mut buffer = Vec::with_capacity(32 + packed.len() + 32);
        buffer.extend_from_slice(chain_id.as_bytes());
        buffer.extend_from_slice(&packed);
        buffer.extend_from_slice(&[0u8; 32]);
        sha256(&buffer)
    }
}

impl Serializer for Transaction {
    fn write(&self, writer: &mut Writer) {
        self.header.write(writer);
        self.context_free_actions.write(writer);
        self.actions.write(writer);
        self.transaction_extensions.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Transaction {
            header: TransactionHeader::read(reader)?,
            context_free_actions: Vec::read(reader)?,
            actions: Vec::read(reader)?,
            transaction_extensions: Vec::read(reader)?,
        })
    }
}

/// A transaction together with the signatures that authorize it.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signatures: Vec<Signature>,
    pub context_free_data: Vec<Vec<u8>>,
}

/// The JSON envelope `push_transaction` accepts: signatures in text form and
/// the transaction itself packed to hex.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackedTransaction {
    pub signatures: Vec<String>,
    pub compression: String,
    pub packed_context_free_data: String,
    pub packed_trx: String,
}

impl From<&SignedTransaction> for PackedTransaction {
    fn from(signed: &SignedTransaction) -> Self {
        let packed_context_free_data = if signed.context_free_data.is_empty() {
            String::new()
        } else {
            hex::encode(signed.context_free_data.to_bytes())
        };
        PackedTransaction {
            signatures: signed.signatures.iter().map(|s| s.to_string()).collect(),
            compression: "none".to_string(),
            packed_context_free_data,
            packed_trx: hex::encode(signed.transaction.to_bytes()),
        }
    }
}
