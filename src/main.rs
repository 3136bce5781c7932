use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use aegis::cli::{
    handle_batch_command, handle_decrypt, handle_encrypt, handle_keygen, BatchCommands,
    DecryptArgs, EncryptArgs, KeygenArgs,
};
use aegis::config::{paths::AegisPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "aegis",
    author = "GamicGo",
    version,
    about = "AES-256 text encryption with portable tokens",
    long_about = "Aegis encrypts text under a secret key and produces a self-contained \
                  base64url token. Anyone with the token and the key can recover the \
                  text; without the key it cannot be recovered."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text into a token
    #[command(alias = "seal")]
    Encrypt(EncryptArgs),

    /// Decrypt a token back into text
    #[command(alias = "open")]
    Decrypt(DecryptArgs),

    /// Generate a random secret key
    Keygen(KeygenArgs),

    /// Encrypt or decrypt many items from a CSV file
    #[command(subcommand)]
    Batch(BatchCommands),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = AegisPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Encrypt(args)) => handle_encrypt(&paths, &settings, args)?,
        Some(Commands::Decrypt(args)) => handle_decrypt(&paths, &settings, args)?,
        Some(Commands::Keygen(args)) => handle_keygen(&paths, &settings, args)?,
        Some(Commands::Batch(cmd)) => handle_batch_command(&settings, cmd)?,
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("Aegis Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Export directory: {}", settings.export_dir(&paths).display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Output format:     {:?}", settings.output_format);
            match settings.batch_parallelism {
                Some(n) => println!("  Batch parallelism: {}", n),
                None => println!("  Batch parallelism: all cores"),
            }
            println!();
            println!("Envelope format:");
            println!(
                "  PBKDF2-HMAC-SHA256, {} iterations",
                aegis::crypto::key_derivation::PBKDF2_ITERATIONS
            );
            println!("  AES-256-CBC with PKCS#7 padding");
        }
        None => {
            println!("Aegis - AES-256 text encryption");
            println!();
            println!("Run 'aegis --help' for usage information.");
            println!("Run 'aegis keygen' to create a secret key.");
        }
    }

    Ok(())
}
