use std::{
    path::PathBuf,
    time::{Duration, SystemTime},
};

use clap::Args;
use log::{info, warn};
use openpgp::{crypto::Password, packet::UserID, Fingerprint, KeyID};

use super::{
    ed25519, export,
    export::{ExportKind, KeyPairPaths},
    gpg, pem,
};
use crate::{
    error::{Error, Result},
    utils::log_cert,
};

#[derive(Args, Debug)]
pub struct PemToGpgOpts {
    #[arg(short, long, help = "ASCII armor the output (.asc instead of .bpg)")]
    pub armor: bool,

    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory the secret and public key files are written to"
    )]
    pub output_dir: PathBuf,

    #[arg(
        short = 't',
        long,
        value_name = "UNIX_SECS",
        help = "Key creation timestamp, defaults to now",
        value_parser = parse_time
    )]
    pub creation_time: Option<SystemTime>,

    #[arg(value_name = "IDENTITY", help = "User ID bound to the key, e.g. \"Name <mail>\"")]
    pub identity: String,

    #[arg(value_name = "PASSPHRASE", help = "Passphrase protecting the secret key")]
    pub passphrase: String,

    #[arg(value_name = "PEMFILE", help = "PKCS8 PEM file holding an Ed25519 private key")]
    pub pem_file: PathBuf,
}

/// Everything one conversion needs
pub struct Config {
    pub identity: String,
    pub passphrase: Password,
    pub pem_file: PathBuf,
    pub armor: bool,
    pub output_dir: PathBuf,
    pub creation_time: SystemTime,
}

impl From<PemToGpgOpts> for Config {
    fn from(opts: PemToGpgOpts) -> Self {
        Config {
            identity: opts.identity,
            passphrase: Password::from(opts.passphrase),
            pem_file: opts.pem_file,
            armor: opts.armor,
            output_dir: opts.output_dir,
            creation_time: opts.creation_time.unwrap_or_else(SystemTime::now),
        }
    }
}

#[derive(Debug)]
pub struct Conversion {
    pub fingerprint: Fingerprint,
    pub key_id: KeyID,
    pub paths: KeyPairPaths,
}

/// Converts the PEM key into `secret.<ext>` and `pub.<ext>`
pub fn pem_to_gpg(config: Config) -> Result<Conversion> {
    if config.identity.is_empty() {
        return Err(Error::Usage("identity must not be empty".to_string()));
    }

    let scalar = pem::read_pem_file(&config.pem_file)?;
    info!("Read Ed25519 private key from {}", config.pem_file.display());

    let point = ed25519::derive_validated(&scalar)?;
    info!("Derived public key {}", point);

    let public = gpg::build_public_key_packet(&point, config.creation_time)?;
    let fingerprint = gpg::compute_fingerprint(&public)?;
    let key_id = gpg::key_id(&fingerprint);
    info!("Fingerprint {} key ID {}", fingerprint, key_id);

    let key = gpg::attach_secret(public, gpg::build_private_key_material(&scalar))?;
    let user_id = UserID::from(config.identity.as_str());
    let certification = export::certify(&user_id, &key)?;

    let key = export::encrypt_secret_key(key, &config.passphrase)?;
    if export::decrypt_secret_scalar(&key, &config.passphrase)? != scalar {
        return Err(anyhow::anyhow!("Encrypted secret key does not decrypt to the input key").into());
    }

    let cert = export::assemble(key, user_id, certification)?;
    if cert.fingerprint() != fingerprint {
        return Err(anyhow::anyhow!(
            "Certificate fingerprint {} differs from computed {}",
            cert.fingerprint(),
            fingerprint
        )
        .into());
    }
    if gpg::public_point(cert.primary_key().key()) != Some(point) {
        return Err(Error::InvalidPoint("certificate does not carry the derived point"));
    }
    log_cert(&cert);

    let secret = export::serialize(&cert, ExportKind::Secret, config.armor)?;
    let public = export::serialize(&cert, ExportKind::Public, config.armor)?;
    if !config.armor {
        warn!("Writing binary keys, pass -a for ASCII armored output");
    }
    let paths = export::write_key_pair(&config.output_dir, config.armor, &secret, &public)?;

    Ok(Conversion {
        fingerprint,
        key_id,
        paths,
    })
}

// parse string to systemtime, OpenPGP timestamps are 32 bit
fn parse_time(time: &str) -> std::result::Result<SystemTime, String> {
    let time = time.parse::<u32>().map_err(|_| {
        format!("Unable to parse time, expected seconds since epoch up to {}", u32::MAX)
    })?;
    SystemTime::UNIX_EPOCH
        .checked_add(Duration::from_secs(u64::from(time)))
        .ok_or_else(|| "Creation time out of range".to_string())
}
