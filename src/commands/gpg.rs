//! OpenPGP v4 packet encoding of Ed25519 key material (RFC 4880 section 5.5,
//! EdDSA as in RFC 9580 section 5.5.5.5 "legacy" Ed25519).

use std::time::SystemTime;

use log::debug;
use openpgp::{
    crypto::mpi::{self, MPI},
    packet::{
        key::{Key4, PrimaryRole, PublicParts, SecretParts},
        Key,
    },
    serialize::MarshalInto,
    types::{Curve, PublicKeyAlgorithm, Timestamp},
    Fingerprint, KeyID,
};
use sha1::{Digest, Sha1};

use super::ed25519::{PrivateScalar, PublicPoint};
use crate::error::Result;

/// Public key packet tag in old format, used when hashing keys
const KEY_HASH_TAG: u8 = 0x99;

/// Builds the v4 EdDSA public key packet for `point`.
///
/// The point is stored as a native point, `0x40 || point`, so the MPI has
/// 263 significant bits.
pub fn build_public_key_packet(
    point: &PublicPoint,
    creation_time: SystemTime,
) -> Result<Key4<PublicParts, PrimaryRole>> {
    // Key4 stores whole seconds
    let creation_time: SystemTime = Timestamp::try_from(creation_time)?.into();
    let key = Key4::new(
        creation_time,
        PublicKeyAlgorithm::EdDSA,
        mpi::PublicKey::EdDSA {
            curve: Curve::Ed25519,
            q: MPI::new_compressed_point(point.as_bytes()),
        },
    )?;
    Ok(key)
}

/// Serialized public key packet body: version, creation time, algorithm and
/// the algorithm specific MPIs
pub fn public_key_body<P, R>(key: &Key4<P, R>) -> Result<Vec<u8>>
where
    P: openpgp::packet::key::KeyParts,
    R: openpgp::packet::key::KeyRole,
{
    let creation_time = Timestamp::try_from(key.creation_time())?;
    let mut body = vec![4];
    body.extend_from_slice(&u32::from(creation_time).to_be_bytes());
    body.push(u8::from(key.pk_algo()));
    body.extend_from_slice(&key.mpis().to_vec()?);
    Ok(body)
}

/// v4 fingerprint: SHA-1 over `0x99 || len(body) as u16 BE || body`
pub fn compute_fingerprint<P, R>(key: &Key4<P, R>) -> Result<Fingerprint>
where
    P: openpgp::packet::key::KeyParts,
    R: openpgp::packet::key::KeyRole,
{
    let body = public_key_body(key)?;
    let len = u16::try_from(body.len())
        .map_err(|_| anyhow::anyhow!("Key packet body too long: {} bytes", body.len()))?;

    let mut hasher = Sha1::new();
    hasher.update([KEY_HASH_TAG]);
    hasher.update(len.to_be_bytes());
    hasher.update(&body);
    let digest = hasher.finalize();

    debug!("Hashed {} byte key packet body", body.len());
    Ok(Fingerprint::from_bytes(&digest))
}

/// Low 64 bits of a v4 fingerprint
pub fn key_id(fingerprint: &Fingerprint) -> KeyID {
    KeyID::from(fingerprint)
}

/// Plaintext secret MPI for the scalar. Only ever written to disk after
/// `export::encrypt_secret_key`.
pub fn build_private_key_material(scalar: &PrivateScalar) -> mpi::SecretKeyMaterial {
    mpi::SecretKeyMaterial::EdDSA {
        scalar: MPI::new(scalar.as_bytes()).into(),
    }
}

/// Pairs the public packet with its plaintext secret so it can sign
pub fn attach_secret(
    public: Key4<PublicParts, PrimaryRole>,
    material: mpi::SecretKeyMaterial,
) -> Result<Key<SecretParts, PrimaryRole>> {
    let key = Key4::<SecretParts, PrimaryRole>::with_secret(
        public.creation_time(),
        public.pk_algo(),
        public.mpis().clone(),
        material.into(),
    )?;
    Ok(key.into())
}

/// Point stored in an EdDSA key packet, without the `0x40` prefix
pub fn public_point<P, R>(key: &Key<P, R>) -> Option<PublicPoint>
where
    P: openpgp::packet::key::KeyParts,
    R: openpgp::packet::key::KeyRole,
{
    match key.mpis() {
        mpi::PublicKey::EdDSA {
            curve: Curve::Ed25519,
            q,
        } => {
            let value = q.value();
            if value.len() != 33 || value[0] != 0x40 {
                return None;
            }
            let mut point = [0u8; 32];
            point.copy_from_slice(&value[1..]);
            Some(PublicPoint::from_bytes(point))
        }
        _ => None,
    }
}
