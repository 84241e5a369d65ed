//! Contract call encoding.
//!
//! [`CallEncoder`] is the seam the transaction builder calls through;
//! [`AbiCallEncoder`] implements it over a JSON ABI with alloy's dynamic
//! encoder so the target contract can change without recompiling.

use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Bytes, U256};

use crate::error::{MiniError, Result};

/// Built-in ABI of the message store contract.
pub const STORE_MESSAGE_ABI: &str = r#"[
  {
    "type": "function",
    "name": "storeMessage",
    "inputs": [
      { "name": "message", "type": "string", "internalType": "string" },
      { "name": "timestamp", "type": "uint256", "internalType": "uint256" }
    ],
    "outputs": [],
    "stateMutability": "nonpayable"
  }
]"#;

/// A single call argument before it is matched against the ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    String(String),
    Uint(U256),
}

impl CallArg {
    fn to_sol_value(&self, index: usize, ty: &DynSolType) -> Result<DynSolValue> {
        match (self, ty) {
            (CallArg::String(s), DynSolType::String) => Ok(DynSolValue::String(s.clone())),
            (CallArg::Uint(v), DynSolType::Uint(bits)) if v.bit_len() <= *bits => {
                Ok(DynSolValue::Uint(*v, *bits))
            }
            _ => Err(MiniError::ArgumentMismatch {
                index,
                expected: ty.sol_type_name().into_owned(),
            }),
        }
    }
}

pub trait CallEncoder: Send + Sync {
    /// Encode `function(args...)` as call data: 4-byte selector followed by
    /// the ABI-encoded arguments.
    fn encode_call(&self, function: &str, args: &[CallArg]) -> Result<Bytes>;
}

#[derive(Debug, Clone)]
pub struct AbiCallEncoder {
    abi: JsonAbi,
}

impl AbiCallEncoder {
    pub fn new(abi: JsonAbi) -> Self {
        Self { abi }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let abi: JsonAbi =
            serde_json::from_str(json).map_err(|e| MiniError::AbiJson(e.to_string()))?;
        Ok(Self::new(abi))
    }

    fn resolve(&self, name: &str, arity: usize) -> Result<&Function> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == arity))
            .ok_or_else(|| MiniError::FunctionNotFound(name.to_string()))
    }

    /// Check that `name(string, uintN)` exists, the shape the transaction
    /// builder calls.
    pub fn check_message_function(&self, name: &str) -> Result<()> {
        let func = self.resolve(name, 2)?;
        let types = func
            .inputs
            .iter()
            .map(|p| p.resolve())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        match types.as_slice() {
            [DynSolType::String, DynSolType::Uint(_)] => Ok(()),
            _ => Err(MiniError::AbiJson(format!(
                "{} must take (string, uint), found {}",
                name,
                func.signature()
            ))),
        }
    }
}

impl CallEncoder for AbiCallEncoder {
    fn encode_call(&self, function: &str, args: &[CallArg]) -> Result<Bytes> {
        let func = self.resolve(function, args.len())?;

        let values = func
            .inputs
            .iter()
            .zip(args)
            .enumerate()
            .map(|(i, (param, arg))| arg.to_sol_value(i, &param.resolve()?))
            .collect::<Result<Vec<_>>>()?;

        let data = func.abi_encode_input(&values)?;
        Ok(Bytes::from(data))
    }
}
