pub mod ed25519;
pub mod export;
pub mod gpg;
pub mod pem;
pub mod pem_to_gpg;
