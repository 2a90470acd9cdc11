use chrono::Local;
use log::LevelFilter;
use std::io::Write;

/// Level for `-v` repetitions; `quiet` wins over any verbosity.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Text logs on stderr as `YYYY-MM-DD HH:MM:SS [LEVEL] message`.
/// `RUST_LOG` overrides the level chosen on the command line.
pub fn init_logger(verbosity: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity, quiet))
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level().to_string().to_uppercase(),
                record.args()
            )
        });

    // A second init (tests) keeps the first logger.
    let _ = builder.try_init();
}
