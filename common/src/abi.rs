//! ABI definitions and their binary packing.
//!
//! Contracts ship a JSON ABI next to the wasm, but `setabi` wants the
//! binary-packed form; [`AbiDef::from_json`] + [`Serializer::to_bytes`]
//! perform that conversion.

use serde::{Deserialize, Serialize};

use crate::{
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct TypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

impl Serializer for TypeDef {
    fn write(&self, writer: &mut Writer) {
        self.new_type_name.write(writer);
        self.source_type.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TypeDef {
            new_type_name: String::read(reader)?,
            source_type: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl Serializer for FieldDef {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        self.field_type.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(FieldDef {
            name: String::read(reader)?,
            field_type: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl Serializer for StructDef {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        self.base.write(writer);
        self.fields.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(StructDef {
            name: String::read(reader)?,
            base: String::read(reader)?,
            fields: Vec::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: Name,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub ricardian_contract: String,
}

impl Serializer for ActionDef {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        self.action_type.write(writer);
        self.ricardian_contract.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(ActionDef {
            name: Name::read(reader)?,
            action_type: String::read(reader)?,
            ricardian_contract: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TableDef {
    pub name: Name,
    #[serde(default)]
    pub index_type: String,
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub row_type: String,
}

impl Serializer for TableDef {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        self.index_type.write(writer);
        self.key_names.write(writer);
        self.key_types.write(writer);
        self.row_type.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(TableDef {
            name: Name::read(reader)?,
            index_type: String::read(reader)?,
            key_names: Vec::read(reader)?,
            key_types: Vec::read(reader)?,
            row_type: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ClausePair {
    pub id: String,
    pub body: String,
}

impl Serializer for ClausePair {
    fn write(&self, writer: &mut Writer) {
        self.id.write(writer);
        self.body.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(ClausePair {
            id: String::read(reader)?,
            body: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error_code: u64,
    pub error_msg: String,
}

impl Serializer for ErrorMessage {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.error_code);
        self.error_msg.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(ErrorMessage {
            error_code: reader.read_u64()?,
            error_msg: String::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct AbiExtension {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

impl Serializer for AbiExtension {
    fn write(&self, writer: &mut Writer) {
        writer.write_u16(self.kind);
        self.data.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(AbiExtension {
            kind: reader.read_u16()?,
            data: Vec::read(reader)?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Serializer for VariantDef {
    fn write(&self, writer: &mut Writer) {
        self.name.write(writer);
        self.types.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(VariantDef {
            name: String::read(reader)?,
            types: Vec::read(reader)?,
        })
    }
}

/// A contract's ABI as found in its `.abi` JSON file.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct AbiDef {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default)]
    pub ricardian_clauses: Vec<ClausePair>,
    #[serde(default)]
    pub error_messages: Vec<ErrorMessage>,
    #[serde(default)]
    pub abi_extensions: Vec<AbiExtension>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

impl AbiDef {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Serializer for AbiDef {
    fn write(&self, writer: &mut Writer) {
        self.version.write(writer);
        self.types.write(writer);
        self.structs.write(writer);
        self.actions.write(writer);
        self.tables.write(writer);
        self.ricardian_clauses.write(writer);
        self.error_messages.write(writer);
        self.abi_extensions.write(writer);
        // Variants are a binary extension: appended only when present so
        // ABIs from older toolchains keep their byte-exact form
        if !self.variants.is_empty() {
            self.variants.write(writer);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let version = String::read(reader)?;
        let types = Vec::read(reader)?;
        let structs = Vec::read(reader)?;
        let actions = Vec::read(reader)?;
        let tables = Vec::read(reader)?;
        let ricardian_clauses = Vec::read(reader)?;
        let error_messages = Vec::read(reader)?;
        let abi_extensions = Vec::read(reader)?;
        let variants = if reader.remaining() > 0 {
            Vec::read(reader)?
        } else {
            Vec::new()
        };
        Ok(AbiDef {
            version,
            types,
            structs,
            actions,
            tables,
            ricardian_clauses,
            error_messages,
            abi_extensions,
            variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed-down version of the reference token contract's ABI
    const TOKEN_ABI: &str = r#"{
        "version": "eosio::abi/1.1",
        "types": [],
        "structs": [
            {
                "name": "create",
                "base": "",
                "fields": [
                    {"name": "issuer", "type": "name"},
                    {"name": "maximum_supply", "type": "asset"}
                ]
            },
            {
                "name": "transfer",
                "base": "",
                "fields": [
                    {"name": "from", "type": "name"},
                    {"name": "to", "type": "name"},
                    {"name": "quantity", "type": "asset"},
                    {"name": "memo", "type": "string"}
                ]
            },
            {
                "name": "account",
                "base": "",
                "fields": [
                    {"name": "balance", "type": "asset"}
                ]
            }
        ],
        "actions": [
            {"name": "create", "type": "create", "ricardian_contract": ""},
            {"name": "transfer", "type": "transfer", "ricardian_contract": ""}
        ],
        "tables": [
            {
                "name": "accounts",
                "index_type": "i64",
                "key_names": ["currency"],
                "key_types": ["uint64"],
                "type": "account"
            }
        ]
    }"#;

    #[test]
    fn test_parse_token_abi() {
        let abi = AbiDef::from_json(TOKEN_ABI).unwrap();
        assert_eq!(abi.version, "eosio::abi/1.1");
        assert_eq!(abi.structs.len(), 3);
        assert_eq!(abi.actions.len(), 2);
        assert_eq!(abi.actions[0].name.to_string(), "create");
        assert_eq!(abi.tables[0].name.to_string(), "accounts");
        assert_eq!(abi.tables[0].row_type, "account");
        assert!(abi.ricardian_clauses.is_empty());
        assert!(abi.variants.is_empty());
    }

    #[test]
    fn test_binary_form_starts_with_version() {
        let abi = AbiDef::from_json(TOKEN_ABI).unwrap();
        let bytes = abi.to_bytes();
        let version = b"eosio::abi/1.1";
        assert_eq!(bytes[0] as usize, version.len());
        assert_eq!(&bytes[1..1 + version.len()], version);
    }

    #[test]
    fn test_binary_roundtrip() {
        let abi = AbiDef::from_json(TOKEN_ABI).unwrap();
        let decoded = AbiDef::from_bytes(&abi.to_bytes()).unwrap();
        assert_eq!(decoded, abi);
    }

    #[test]
    fn test_roundtrip_with_variants() {
        let mut abi = AbiDef::from_json(TOKEN_ABI).unwrap();
        abi.variants.push(VariantDef {
            name: "key_variant".to_string(),
            types: vec!["name".to_string(), "uint64".to_string()],
        });
        let decoded = AbiDef::from_bytes(&abi.to_bytes()).unwrap();
        assert_eq!(decoded, abi);
    }

    #[test]
    fn test_missing_sections_default() {
        let abi = AbiDef::from_json(r#"{"version": "eosio::abi/1.0"}"#).unwrap();
        assert!(abi.structs.is_empty());
        assert!(abi.actions.is_empty());
        assert!(abi.tables.is_empty());
    }
}
