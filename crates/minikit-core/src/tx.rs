use alloy::consensus::{SignableTransaction, TxEip1559, TxEip2930, TxLegacy};
use alloy::primitives::{hex, Address, Bytes, Signature, TxKind};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    #[default]
    Legacy,
    Eip2930,
    Eip1559,
}

impl TxType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxType::Legacy => "legacy",
            TxType::Eip2930 => "eip2930",
            TxType::Eip1559 => "eip1559",
        }
    }
}

/// How an envelope is turned into the `serializedTransaction` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxEncoding {
    /// JSON object text, the shape wallet-side `deserialize` helpers expect.
    #[default]
    Json,
    /// 0x-hex of the unsigned RLP signing payload.
    Rlp,
}

/// A contract call prior to signing. Nonce, gas and fees are left for the
/// wallet to fill in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub to: Address,
    pub data: Bytes,
    pub chain_id: u64,
    pub tx_type: TxType,
}

/// Body returned by the transaction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub serialized_transaction: String,
    /// Display name of the chain, not its numeric id.
    pub chain_id: String,
}

pub trait TransactionSerializer: Send + Sync {
    fn serialize(&self, tx: &UnsignedTransaction) -> Result<String>;
}

pub fn serializer_for(encoding: TxEncoding) -> Box<dyn TransactionSerializer> {
    match encoding {
        TxEncoding::Json => Box::new(JsonEnvelopeSerializer),
        TxEncoding::Rlp => Box::new(RlpEnvelopeSerializer),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEnvelope<'a> {
    to: String,
    data: String,
    chain_id: u64,
    #[serde(rename = "type")]
    tx_type: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelopeSerializer;

impl TransactionSerializer for JsonEnvelopeSerializer {
    fn serialize(&self, tx: &UnsignedTransaction) -> Result<String> {
        let envelope = JsonEnvelope {
            to: tx.to.to_checksum(None),
            data: hex::encode_prefixed(&tx.data),
            chain_id: tx.chain_id,
            tx_type: tx.tx_type.as_str(),
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

// ---------------------------------------------------------------------------
// RLP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct RlpEnvelopeSerializer;

impl RlpEnvelopeSerializer {
    fn signing_payload(tx: &UnsignedTransaction) -> Vec<u8> {
        let to = TxKind::Call(tx.to);
        let input = tx.data.clone();
        match tx.tx_type {
            // EIP-155: chain id plus two empty fields appended.
            TxType::Legacy => SignableTransaction::<Signature>::encoded_for_signing(&TxLegacy {
                chain_id: Some(tx.chain_id),
                to,
                input,
                ..Default::default()
            }),
            TxType::Eip2930 => {
                SignableTransaction::<Signature>::encoded_for_signing(&TxEip2930 {
                    chain_id: tx.chain_id,
                    to,
                    input,
                    ..Default::default()
                })
            }
            TxType::Eip1559 => {
                SignableTransaction::<Signature>::encoded_for_signing(&TxEip1559 {
                    chain_id: tx.chain_id,
                    to,
                    input,
                    ..Default::default()
                })
            }
        }
    }
}

impl TransactionSerializer for RlpEnvelopeSerializer {
    fn serialize(&self, tx: &UnsignedTransaction) -> Result<String> {
        Ok(hex::encode_prefixed(Self::signing_payload(tx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn sample(tx_type: TxType) -> UnsignedTransaction {
        UnsignedTransaction {
            to: address!("0x29792b598A30a6649a75c299f9FC67bfe6c033f2"),
            data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
            chain_id: 43113,
            tx_type,
        }
    }

    #[test]
    fn json_envelope_shape() {
        let tx = sample(TxType::Legacy);
        let out = JsonEnvelopeSerializer.serialize(&tx).unwrap();
        let expected = format!(
            r#"{{"to":"{}","data":"0xdeadbeef","chainId":43113,"type":"legacy"}}"#,
            tx.to.to_checksum(None)
        );
        assert_eq!(out, expected);
        assert!(out.to_lowercase().contains("0x29792b598a30a6649a75c299f9fc67bfe6c033f2"));
    }

    #[test]
    fn json_envelope_reports_type() {
        let out = JsonEnvelopeSerializer.serialize(&sample(TxType::Eip1559)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "eip1559");
    }

    #[test]
    fn legacy_rlp_is_eip155_signing_payload() {
        let out = RlpEnvelopeSerializer.serialize(&sample(TxType::Legacy)).unwrap();
        // list header, then nonce/gasPrice/gas as empty strings (0x80 each)
        // and a 20-byte address (0x94 prefix)
        assert!(out.starts_with("0x"));
        let bytes = hex::decode(&out).unwrap();
        assert!(bytes[0] >= 0xc0, "expected an RLP list, got {:#x}", bytes[0]);
        let body = &bytes[1..];
        assert_eq!(&body[..4], &[0x80u8, 0x80, 0x80, 0x94]);
        // trailing: chainId (43113 = 0xa869), r = 0, s = 0
        assert!(bytes.ends_with(&[0x82u8, 0xa8, 0x69, 0x80, 0x80]));
    }

    #[test]
    fn typed_rlp_payloads_carry_type_byte() {
        let eip2930 = hex::decode(
            RlpEnvelopeSerializer
                .serialize(&sample(TxType::Eip2930))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(eip2930[0], 0x01);

        let eip1559 = hex::decode(
            RlpEnvelopeSerializer
                .serialize(&sample(TxType::Eip1559))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(eip1559[0], 0x02);
    }

    #[test]
    fn serializers_are_deterministic() {
        for encoding in [TxEncoding::Json, TxEncoding::Rlp] {
            let s = serializer_for(encoding);
            let tx = sample(TxType::Legacy);
            assert_eq!(s.serialize(&tx).unwrap(), s.serialize(&tx).unwrap());
        }
    }

    #[test]
    fn different_data_changes_output() {
        let s = RlpEnvelopeSerializer;
        let a = sample(TxType::Legacy);
        let mut b = a.clone();
        b.data = Bytes::from(vec![0x00]);
        assert_ne!(s.serialize(&a).unwrap(), s.serialize(&b).unwrap());
    }

    #[test]
    fn execution_response_field_names() {
        let resp = ExecutionResponse {
            serialized_transaction: "0x".into(),
            chain_id: "Avalanche Fuji".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["serializedTransaction"], "0x");
        assert_eq!(json["chainId"], "Avalanche Fuji");
    }
}
