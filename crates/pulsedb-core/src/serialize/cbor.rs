use crate::serialize::{MAX_ROW_BYTES, SerializeError};
use serde::{Serialize, de::DeserializeOwned};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Serialize a value into CBOR bytes.
pub(super) fn serialize<T>(t: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    let bytes = to_vec(t).map_err(|e| SerializeError::Serialize(e.to_string()))?;
    if bytes.len() > MAX_ROW_BYTES {
        return Err(SerializeError::Serialize(format!(
            "payload of {} bytes exceeds maximum of {MAX_ROW_BYTES}",
            bytes.len()
        )));
    }

    Ok(bytes)
}

/// Deserialize CBOR bytes into a value.
///
/// Input size is bounded before decode, and a panic inside the decoder is
/// reported as a deserialize error.
pub(super) fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > MAX_ROW_BYTES {
        return Err(SerializeError::Deserialize(
            "payload exceeds maximum allowed size".into(),
        ));
    }

    let result = catch_unwind(AssertUnwindSafe(|| from_slice(bytes)));

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SerializeError::Deserialize(err.to_string())),
        Err(_) => Err(SerializeError::Deserialize(
            "panic during CBOR deserialization".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_payload_is_rejected_before_decode() {
        let bytes = vec![0u8; MAX_ROW_BYTES + 1];
        let err = deserialize::<Vec<String>>(&bytes).expect_err("oversized payload should fail");

        assert!(matches!(err, SerializeError::Deserialize(_)));
    }

    #[test]
    fn garbage_bytes_report_deserialize_error() {
        let err = deserialize::<Vec<String>>(&[0xff, 0x00, 0x13])
            .expect_err("garbage should not decode as a key list");

        assert!(matches!(err, SerializeError::Deserialize(_)));
    }
}
