//! Utility functions for the token resolver core
//!
//! Pure helpers shared by the per-family services: hex and ABI decoding,
//! address checksums, and a few string helpers.

use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;
use ethers::abi::{self, ParamType, Token as AbiToken};
use ethers::types::{Address as EvmAddress, U256};
use sha2::{Digest, Sha256};

/// Decode a `0x`-prefixed (or bare) hex payload
pub fn decode_hex_data(data: &str) -> TokenResult<Vec<u8>> {
    let trimmed = data.trim();
    let bare = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(bare)?)
}

/// Decode an ABI encoded `string` return value, accepting the legacy
/// `bytes32` encoding some early tokens use.
pub fn decode_abi_string(data: &[u8]) -> TokenResult<String> {
    if data.is_empty() {
        return Err(TokenError::decode("Empty return data"));
    }

    if data.len() == 32 {
        let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
        let text = std::str::from_utf8(&data[..end])
            .map_err(|_| TokenError::decode("bytes32 value is not utf8"))?;
        return Ok(text.trim().to_string());
    }

    // Decoded as bytes: the ethers string decoder replaces invalid utf8
    let tokens = abi::decode(&[ParamType::Bytes], data)
        .map_err(|e| TokenError::decode(format!("ABI string decoding failed: {}", e)))?;
    let bytes = match tokens.into_iter().next() {
        Some(AbiToken::Bytes(bytes)) => bytes,
        _ => return Err(TokenError::decode("ABI string decoding returned no value")),
    };
    let text = String::from_utf8(bytes).map_err(|_| TokenError::decode("ABI string is not utf8"))?;
    Ok(text.trim().to_string())
}

/// Decode an ABI encoded `uint8` return value
pub fn decode_abi_u8(data: &[u8]) -> TokenResult<u8> {
    if data.is_empty() {
        return Err(TokenError::decode("Empty return data"));
    }

    let tokens = abi::decode(&[ParamType::Uint(256)], data)
        .map_err(|e| TokenError::decode(format!("ABI uint decoding failed: {}", e)))?;
    let value = match tokens.into_iter().next() {
        Some(AbiToken::Uint(value)) => value,
        _ => return Err(TokenError::decode("ABI uint decoding returned no value")),
    };

    if value > U256::from(u8::MAX) {
        return Err(TokenError::decode(format!("Decimals value out of range: {}", value)));
    }
    Ok(value.low_u32() as u8)
}

/// Check that a mixed-case EVM address matches its EIP-55 checksum
pub fn is_eip55_checksum_valid(address: &str) -> bool {
    let hex_part = match address.strip_prefix("0x") {
        Some(hex_part) => hex_part,
        None => return false,
    };
    let bytes = match hex::decode(hex_part) {
        Ok(bytes) if bytes.len() == 20 => bytes,
        _ => return false,
    };

    let checksummed = ethers::utils::to_checksum(&EvmAddress::from_slice(&bytes), None);
    checksummed == address
}

/// Decode a base58check string, returning the payload without its checksum
pub fn base58check_decode(value: &str) -> Option<Vec<u8>> {
    let decoded = bs58::decode(value).into_vec().ok()?;
    if decoded.len() < 5 {
        return None;
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let digest = Sha256::digest(Sha256::digest(payload));
    if &digest[..4] != checksum {
        return None;
    }
    Some(payload.to_vec())
}

/// Encode a payload as base58check
pub fn base58check_encode(payload: &[u8]) -> String {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut data = payload.to_vec();
    data.extend_from_slice(&digest[..4]);
    bs58::encode(data).into_string()
}

/// CRC16/XMODEM, the checksum of user-friendly Ton addresses
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if (crc & 0x8000) != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Shorten a reference for log lines
pub fn short_reference(reference: &str) -> String {
    let chars: Vec<char> = reference.chars().collect();
    if chars.len() <= 12 {
        return reference.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Return the first non-empty string among candidate JSON values
pub fn first_non_empty_string<'a>(
    values: impl IntoIterator<Item = Option<&'a serde_json::Value>>,
) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .filter_map(|value| value.as_str())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
