//! CLI arguments and server configuration defaults.

use clap::Parser;
use shadow_rs::formatcp;

use crate::build;

const VERSION_INFO: &str = formatcp!(
    r#"{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}"#,
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

pub const DEFAULT_HTTP_PORT: u16 = 8616;
pub const DEFAULT_BIND: &str = "::";
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024 * 1024;

/// CLI arguments and environment configuration for the server.
#[derive(Parser, Debug)]
#[command(name = "file-passer", version = VERSION_INFO, about = "File Passer server")]
pub struct Args {
    #[arg(
        short = 'r',
        long,
        env = "FILE_PASSER_ROOT",
        default_value = ".",
        help = "Directory that uploads are written to and listings are read from"
    )]
    pub root: String,
    #[arg(
        short = 'b',
        long,
        env = "FILE_PASSER_BIND",
        default_value = DEFAULT_BIND,
        help = "Bind address"
    )]
    pub bind: String,
    #[arg(
        short = 'p',
        long,
        env = "FILE_PASSER_PORT",
        default_value_t = DEFAULT_HTTP_PORT,
        help = "HTTP port"
    )]
    pub port: u16,
    #[arg(
        long,
        env = "FILE_PASSER_MAX_BODY_SIZE",
        default_value_t = DEFAULT_MAX_BODY_SIZE,
        help = "Max request body size in bytes (0 to disable)"
    )]
    pub max_body_size: usize,
}
