//! Tracing configuration.
//!
//! Output format is controlled by `MODLOWER_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! MODLOWER_LOG=debug MODLOWER_LOG_FORMAT=tree cargo test
//! MODLOWER_LOG="modlower::transforms=trace" cargo test
//! ```
//!
//! The subscriber is only installed when `MODLOWER_LOG` (or `RUST_LOG`) is
//! set, so there is zero overhead otherwise.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("MODLOWER_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Build an `EnvFilter` from `MODLOWER_LOG`, falling back to `RUST_LOG`.
/// Values use `RUST_LOG` syntax (e.g. `debug`, `modlower::transforms=trace`).
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("MODLOWER_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `MODLOWER_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never interferes with emitted JavaScript on stdout.
pub fn init_tracing() {
    let requested =
        std::env::var("MODLOWER_LOG").is_ok() || std::env::var("RUST_LOG").is_ok();
    if !requested {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
