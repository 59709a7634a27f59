//! Extraction of the raw Ed25519 scalar from a PKCS8 (RFC 5958 / RFC 8410)
//! private key, as written by `openssl genpkey -algorithm ed25519`.

use std::path::Path;

use log::debug;
use pkcs8::{
    der::{asn1::OctetStringRef, Decode},
    ObjectIdentifier, PrivateKeyInfo, SecretDocument,
};

use super::ed25519::PrivateScalar;
use crate::error::{Error, Result};

/// id-Ed25519 from RFC 8410
pub const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

const PEM_LABEL: &str = "PRIVATE KEY";

/// Reads a PEM encoded PKCS8 file and returns the Ed25519 scalar inside
pub fn read_pem_file(path: &Path) -> Result<PrivateScalar> {
    let pem = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    extract_pem(&pem).map_err(|e| match e {
        Error::Format(msg) => Error::Format(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

pub fn extract_pem(pem: &str) -> Result<PrivateScalar> {
    let (label, doc) =
        SecretDocument::from_pem(pem).map_err(|e| Error::Format(format!("PEM: {}", e)))?;
    if label != PEM_LABEL {
        return Err(Error::Format(format!(
            "expected \"{}\" PEM block, got \"{}\"",
            PEM_LABEL, label
        )));
    }
    extract(doc.as_bytes())
}

/// Parses DER encoded `PrivateKeyInfo` and returns the 32 byte scalar wrapped
/// in its inner `CurvePrivateKey` octet string.
pub fn extract(pkcs8_der: &[u8]) -> Result<PrivateScalar> {
    let info = PrivateKeyInfo::try_from(pkcs8_der).map_err(|e| Error::Format(e.to_string()))?;

    if info.algorithm.oid != ED25519_OID {
        return Err(Error::UnsupportedAlgorithm {
            oid: info.algorithm.oid.to_string(),
        });
    }
    // RFC 8410 section 3: parameters MUST be absent
    if info.algorithm.parameters.is_some() {
        return Err(Error::Format(
            "Ed25519 algorithm identifier carries parameters".to_string(),
        ));
    }

    let inner = OctetStringRef::from_der(info.private_key)
        .map_err(|e| Error::Format(format!("CurvePrivateKey: {}", e)))?;
    let scalar = PrivateScalar::from_slice(inner.as_bytes())?;

    debug!(
        "PKCS8 Ed25519 key parsed (embedded public key: {})",
        info.public_key.is_some()
    );
    Ok(scalar)
}
