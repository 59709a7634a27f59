use std::fmt;

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Raw Ed25519 private key (RFC 8032 "secret key"), 32 bytes
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateScalar([u8; 32]);

impl PrivateScalar {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(key: &[u8]) -> Result<Self> {
        if key.len() != 32 {
            return Err(Error::Format(format!(
                "Ed25519 private key must be 32 bytes, got {}",
                key.len()
            )));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(key);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateScalar([REDACTED])")
    }
}

/// Compressed Edwards point: y little-endian, sign of x in the top bit
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicPoint([u8; 32]);

impl PublicPoint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PublicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicPoint({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// RFC 8032 section 5.1.5 key generation
pub fn derive_public_key(scalar: &PrivateScalar) -> PublicPoint {
    let mut h = Sha512::digest(scalar.as_bytes());
    let mut lower = [0u8; 32];
    lower.copy_from_slice(&h[..32]);
    h.as_mut_slice().zeroize();

    let s = clamp_scalar(lower);
    lower.zeroize();

    let point = EdwardsPoint::mul_base(&s);
    PublicPoint(point.compress().to_bytes())
}

/// Full validation of an encoded public point.
///
/// Rejects encodings that are not canonical, do not decode onto
/// `-x^2 + y^2 = 1 + d*x^2*y^2 (mod 2^255 - 19)`, have small order (the
/// identity included) or carry a torsion component.
pub fn validate(point: &PublicPoint) -> Result<()> {
    let compressed = CompressedEdwardsY(point.0);
    let decoded = compressed
        .decompress()
        .ok_or(Error::InvalidPoint("not on the Ed25519 curve"))?;

    // Catches y >= p and the negative zero x coordinate
    if decoded.compress() != compressed {
        return Err(Error::InvalidPoint("non-canonical encoding"));
    }
    if decoded.is_small_order() {
        return Err(Error::InvalidPoint("low order point"));
    }
    if !decoded.is_torsion_free() {
        return Err(Error::InvalidPoint("point has a torsion component"));
    }
    Ok(())
}

pub fn derive_validated(scalar: &PrivateScalar) -> Result<PublicPoint> {
    let point = derive_public_key(scalar);
    validate(&point)?;
    Ok(point)
}

fn clamp_scalar(mut scalar: [u8; 32]) -> Scalar {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;

    // Clamped value may exceed the group order, reducing it does not change
    // the product with the prime order base point
    let s = Scalar::from_bytes_mod_order(scalar);
    scalar.zeroize();
    s
}
