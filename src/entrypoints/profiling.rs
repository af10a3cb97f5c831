/*!
Logging and profiling setup.

- `setup_logging()` installs the tracing subscriber, with a default filter
  when `RUST_LOG` is not set.
- `ProfilingServer` (only with `feature = "profiling"`) turns on puffin scope
  collection and serves it over HTTP for `puffin_viewer`.
*/

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER_DEBUG: &str =
    "debug,eframe::native=warn,egui::context=warn,walkers=info,hyper_util=info,reqwest::connect=info";
const DEFAULT_FILTER_RELEASE: &str = "info,eframe::native=warn,egui::context=warn,walkers=warn";

/// Initialize the fmt subscriber filtered by `RUST_LOG` or a sensible default
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cfg!(debug_assertions) {
            DEFAULT_FILTER_DEBUG
        } else {
            DEFAULT_FILTER_RELEASE
        })
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

#[cfg(feature = "profiling")]
pub struct ProfilingServer {
    server: Option<puffin_http::Server>,
}

#[cfg(feature = "profiling")]
impl ProfilingServer {
    pub const ADDRESS: &str = "127.0.0.1:8585";

    pub fn start() -> Self {
        puffin::set_scopes_on(true); // tell puffin to collect data

        match puffin_http::Server::new(Self::ADDRESS) {
            Ok(puffin_server) => {
                tracing::info!(
                    "Profiling enabled, to view: cargo install puffin_viewer && ~/.cargo/bin/puffin_viewer --url {}",
                    Self::ADDRESS
                );

                ProfilingServer {
                    server: Some(puffin_server),
                }
            }
            Err(err) => {
                tracing::error!("Failed to start puffin server: {err}");
                ProfilingServer { server: None }
            }
        }
    }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilingServer {
    fn drop(&mut self) {
        puffin::set_scopes_on(false);
        // Dropping the server will close it.
        self.server = None;
    }
}
