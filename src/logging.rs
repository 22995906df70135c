//! ログ初期化
//!
//! `RUST_LOG` で絞り込み可能（例: `RUST_LOG=book_csv_common=debug`）。
//! 未指定時は warn、`--verbose` 指定時は debug。出力先は stderr。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time();

    // テストなどで二重初期化された場合は無視
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
