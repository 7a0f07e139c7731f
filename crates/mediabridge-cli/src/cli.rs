//! CLI argument definitions for mediabridge.
//!
//! Every command works offline. `normalize` replays a captured provider
//! response through the matching service operation, `classify` runs a
//! described transport failure through the error classifier.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `normalize` | Validate and adapt a captured response body |
//! | `classify` | Classify a transport failure |
//! | `providers` | Show which providers the environment configures |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! mediabridge normalize --provider radarr --operation get_queue queue.json --pretty
//! mediabridge classify --provider sonarr --operation get_series --status 503
//! mediabridge classify --provider jellyfin --operation get_item --network-code ECONNREFUSED
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mediabridge_core::ProviderId;

/// Offline normalization of media-stack provider responses.
#[derive(Debug, Parser)]
#[command(name = "mediabridge", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log debug events to stderr. `RUST_LOG` overrides this.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a captured response body through a service operation.
    Normalize(NormalizeArgs),
    /// Classify a transport failure as a service would.
    Classify(ClassifyArgs),
    /// List providers and whether the environment configures them.
    Providers,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Provider that produced the payload.
    #[arg(long)]
    pub provider: ProviderId,

    /// Service operation, e.g. `get_item`, `get_requests`, `get_queue`.
    #[arg(long)]
    pub operation: String,

    /// JSON file holding the raw response body.
    pub file: PathBuf,

    /// Item id, request id or search term. Required by operations that target one item.
    #[arg(long)]
    pub item_id: Option<String>,

    /// Media-server id stamped onto adapted items.
    #[arg(long, default_value = "replay")]
    pub server_id: String,

    /// Media-server base URL used for image links.
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub provider: ProviderId,

    #[arg(long)]
    pub operation: String,

    /// HTTP status returned by the provider.
    #[arg(long, conflicts_with = "network_code")]
    pub status: Option<u16>,

    /// JSON file holding the error response body.
    #[arg(long, requires = "status")]
    pub body: Option<PathBuf>,

    /// Socket error code such as `ECONNREFUSED` or `ETIMEDOUT`.
    #[arg(long)]
    pub network_code: Option<String>,

    /// Transport message.
    #[arg(long, default_value = "request failed")]
    pub message: String,

    #[arg(long)]
    pub item_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_normalize_arguments() {
        let cli = Cli::try_parse_from([
            "mediabridge",
            "normalize",
            "--provider",
            "Radarr",
            "--operation",
            "get_queue",
            "queue.json",
            "--pretty",
        ])
        .expect("valid arguments");

        assert!(cli.pretty);
        let Command::Normalize(args) = cli.command else {
            panic!("expected normalize");
        };
        assert_eq!(args.provider, ProviderId::Radarr);
        assert_eq!(args.file, PathBuf::from("queue.json"));
        assert_eq!(args.server_id, "replay");
    }

    #[test]
    fn rejects_unknown_provider() {
        let parsed = Cli::try_parse_from([
            "mediabridge",
            "classify",
            "--provider",
            "plex",
            "--operation",
            "get_item",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn status_and_network_code_conflict() {
        let parsed = Cli::try_parse_from([
            "mediabridge",
            "classify",
            "--provider",
            "sonarr",
            "--operation",
            "get_series",
            "--status",
            "500",
            "--network-code",
            "ETIMEDOUT",
        ]);
        assert!(parsed.is_err());
    }
}
