use std::sync::Once;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::FilterFn;

static INIT: Once = Once::new();

/// Route `tracing` output to logcat on Android and stderr elsewhere.
/// Only the first call has any effect.
#[uniffi::export]
pub fn init_logging() {
    INIT.call_once(install_subscriber);
}

/// Debug and above from this workspace's crates only. Dependencies like the HTTP
/// client are kept out.
fn own_crates(metadata: &Metadata<'_>) -> bool {
    is_own_event(metadata.level(), metadata.module_path())
}

fn is_own_event(level: &Level, module_path: Option<&str>) -> bool {
    level <= &Level::DEBUG && module_path.unwrap_or_default().starts_with("campus_hunt")
}

#[cfg(target_os = "android")]
fn install_subscriber() {
    use tracing_logcat::{LogcatMakeWriter, LogcatTag};
    use tracing_subscriber::{fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt};

    let tag = LogcatTag::Fixed(env!("CARGO_PKG_NAME").to_owned());
    let writer = match LogcatMakeWriter::new(tag) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("failed to initialize logcat writer: {e}");
            return;
        }
    };

    // logcat records the level and timestamp itself
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().with_level(false).without_time())
        .with_writer(writer)
        .with_ansi(false);
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(FilterFn::new(own_crates))
        .try_init();
}

#[cfg(not(target_os = "android"))]
fn install_subscriber() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(FilterFn::new(own_crates))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_own_crates() {
        assert!(is_own_event(&Level::DEBUG, Some("campus_hunt_core::session::driver")));
        assert!(is_own_event(&Level::WARN, Some("campus_hunt_mobile::state::runtime")));
        assert!(!is_own_event(&Level::TRACE, Some("campus_hunt_core::location")));
        assert!(!is_own_event(&Level::DEBUG, Some("hyper_util::client::legacy")));
        assert!(!is_own_event(&Level::ERROR, Some("reqwest::connect")));
        assert!(!is_own_event(&Level::ERROR, None));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        tracing::debug!("logging initialized");
    }
}
