extern crate sequoia_openpgp as openpgp;

mod commands;
mod error;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use commands::pem_to_gpg::{pem_to_gpg, Config, PemToGpgOpts};
use env_logger::Builder;
use log::{error, LevelFilter};

/// Convert a PKCS8 PEM Ed25519 private key into an OpenPGP key pair
///
/// Writes secret.<ext> (passphrase protected) and pub.<ext>, where <ext> is
/// asc with --armor and bpg otherwise.
#[derive(Parser, Debug)]
#[command(version = "0.1", arg_required_else_help = true)]
struct Opts {
    #[arg(short, long, action = clap::ArgAction::Count, help = "More logging, repeat for debug and trace")]
    verbose: u8,

    #[command(flatten)]
    convert: PemToGpgOpts,
}

fn main() -> ExitCode {
    let opts: Opts = Opts::parse();
    setup_logging(opts.verbose);

    match pem_to_gpg(Config::from(opts.convert)) {
        Ok(conversion) => {
            println!("Fingerprint: {}", conversion.fingerprint);
            println!("Key ID:      {}", conversion.key_id);
            println!("Secret key:  {}", conversion.paths.secret.display());
            println!("Public key:  {}", conversion.paths.public.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG wins over -v
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
