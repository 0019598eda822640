//! Tracing setup (§10.1): `RUST_LOG` drives the filter; `-v`/`-vv` raises the
//! default level when `RUST_LOG` isn't set. Spans render as a tree so the
//! `store.*`/`graph.build`/`composer.compose` nesting from §10 is readable.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
        .init();
}
