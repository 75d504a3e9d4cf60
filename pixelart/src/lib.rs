//! Pixel Art Utility
//!
//! Decodes an image, pixelates it by block averaging and writes the result.
//! The pixelated image can also be sent to an external generation API that
//! returns a stylized pixel art variant.
//!
//! # Architecture
//! - `pipeline`: decode (async) followed by synchronous transform and export
//! - `config`: TOML configuration file with environment overrides
//! - `cli`: command line entry point

pub mod cli;
pub mod config;
pub mod pipeline;

/// Initializes the logger.
///
/// Log lines carry a local timestamp, the level, the file name and line
/// number. The level defaults to `info` and follows `RUST_LOG` when set.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
