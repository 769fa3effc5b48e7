//! Digest System - SHA-256 for Manifests
//!
//! Content digests make rendered avatars reproducible artifacts: the job
//! digest pins the request, the manifest digest pins the full output
//! record, and per-export digests pin the encoded bytes.

use serde::Serialize;
use serde_json::{to_string, Map, Value};
use sha2::{Digest, Sha256};

use crate::export::ExportFormat;

/// SHA-256 of raw bytes as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Canonical JSON: keys sorted recursively, no whitespace. Two values that
/// differ only in field order canonicalize identically.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&canonicalize(&v))
}

fn canonicalize(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(canonicalize).collect()),
        _ => v.clone(),
    }
}

/// Digest of a full manifest in canonical form.
pub fn manifest_digest<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(manifest)?.as_bytes()))
}

/// Digest of a render job: identical (seed, size, formats, engine) always
/// produce the same value, across processes and machines. This is the
/// determinism anchor manifests are audited against.
pub fn job_digest(seed: &str, size: u32, formats: &[ExportFormat], engine_version: &str) -> String {
    let formats: Vec<&str> = formats.iter().map(|f| f.extension()).collect();
    let combined = format!("{}:{}:{}:{}", seed, size, formats.join(","), engine_version);
    sha256_hex(combined.as_bytes())
}

// We need hex encoding
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys_recursively() {
        let obj = json!({"z": 1, "a": {"d": 4, "b": 2}, "m": 3});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":{"b":2,"d":4},"m":3,"z":1}"#);
    }

    #[test]
    fn digests_are_stable() {
        let data = b"punk pixels";
        assert_eq!(sha256_hex(data), sha256_hex(data));

        let manifest = json!({"seed": "@Jampzey", "size": 44});
        assert_eq!(
            manifest_digest(&manifest).unwrap(),
            manifest_digest(&manifest).unwrap()
        );
    }

    #[test]
    fn job_digest_pins_every_input() {
        let base = job_digest("@Jampzey", 44, &[ExportFormat::Png], "1.0.0");
        assert_eq!(base, job_digest("@Jampzey", 44, &[ExportFormat::Png], "1.0.0"));
        assert_ne!(base, job_digest("@Jampzey", 80, &[ExportFormat::Png], "1.0.0"));
        assert_ne!(base, job_digest("@Hydraze420", 44, &[ExportFormat::Png], "1.0.0"));
        assert_ne!(base, job_digest("@Jampzey", 44, &[ExportFormat::Svg], "1.0.0"));
        assert_ne!(base, job_digest("@Jampzey", 44, &[ExportFormat::Png], "1.1.0"));
    }
}
