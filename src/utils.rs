use log::debug;
use openpgp::{packet::key::SecretKeyMaterial, Cert};

/// Logs the keys and user IDs of a certificate at debug level
pub fn log_cert(cert: &Cert) {
    debug!("CRT {} with keyid {}", cert, cert.keyid());
    for k in cert.keys() {
        debug!("FPR {} algo {}", k.fingerprint(), k.pk_algo());
        match k.optional_secret() {
            Some(SecretKeyMaterial::Encrypted(e)) => {
                debug!("Secret key encrypted with {}", e.algo());
            }
            Some(SecretKeyMaterial::Unencrypted(_)) => {
                debug!("Secret key is not encrypted");
            }
            None => {}
        }
    }
    for ua in cert.userids() {
        debug!(
            "UID {:?} with {} self signature(s)",
            String::from_utf8_lossy(ua.userid().value()),
            ua.self_signatures().into_iter().count()
        );
    }
}

/// Strips ASCII armor, returning the binary packet stream
#[cfg(test)]
pub fn dearmor(armored: &[u8]) -> std::io::Result<Vec<u8>> {
    use std::io::Read;

    let mut reader = openpgp::armor::Reader::from_bytes(armored, None);
    let mut binary = Vec::new();
    reader.read_to_end(&mut binary)?;
    Ok(binary)
}

/// CRC-24 of RFC 4880 section 6.1
#[cfg(test)]
pub fn crc24(data: &[u8]) -> u32 {
    const CRC24_INIT: u32 = 0xB704CE;
    const CRC24_POLY: u32 = 0x1864CFB;

    let mut crc = CRC24_INIT;
    for byte in data {
        crc ^= (*byte as u32) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & 0x1000000 != 0 {
                crc ^= CRC24_POLY;
            }
        }
    }
    crc & 0xFFFFFF
}
