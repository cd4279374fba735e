mod cli;
mod error_fmt;
mod monitor;
mod trend_cmd;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use eyre::Result;
use sprout_config::Config;
use sprout_core::SensorError;
use sprout_traits::MonotonicClock;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let _ = color_eyre::install();

    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = if cli.cmd.needs_config() {
        Some(
            sprout_config::load_file(&cli.config)
                .map_err(|e| SensorError::Config(format!("{e:#}")))?,
        )
    } else {
        None
    };

    init_tracing(cli.json, cli.log_level.as_deref(), cfg.as_ref());

    match (cli.cmd, cfg) {
        (Commands::Monitor { ticks, tick_ms }, Some(cfg)) => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let flag = Arc::clone(&shutdown);
                if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
                    tracing::warn!(error = %e, "failed to install Ctrl-C handler");
                }
            }
            let tick_ms = tick_ms.unwrap_or(cfg.monitor.tick_ms);
            if tick_ms == 0 {
                return Err(SensorError::Config("--tick-ms must be >= 1".into()).into());
            }
            monitor::run_monitor(
                &cfg,
                MonotonicClock::new(),
                ticks,
                tick_ms,
                cli.json,
                shutdown,
            )?;
        }
        (Commands::SelfCheck, Some(cfg)) => {
            let names = monitor::self_check(&cfg, MonotonicClock::new())?;
            if cli.json {
                println!("{}", serde_json::json!({ "self_check": "ok", "sensors": names }));
            } else {
                for n in &names {
                    println!("ok: {n}");
                }
                println!("self-check ok");
            }
        }
        (
            Commands::Trend {
                window,
                min,
                max,
                values,
            },
            _,
        ) => {
            let range = min.zip(max);
            let summary = trend_cmd::fit_values(window, &values, range)?;
            if cli.json {
                println!("{summary}");
            } else {
                println!("{}", trend_cmd::format_human(&summary));
            }
        }
        (_, None) => eyre::bail!("internal error: command needs a config but none was loaded"),
    }
    Ok(())
}

/// Level used when `RUST_LOG` is unset: `--log-level`, then
/// `[logging].level`, then "info".
fn resolve_level(cli_level: Option<&str>, cfg: Option<&Config>) -> String {
    cli_level
        .or_else(|| cfg.and_then(|c| c.logging.level.as_deref()))
        .unwrap_or("info")
        .to_string()
}

fn init_tracing(json: bool, cli_level: Option<&str>, cfg: Option<&Config>) {
    let level = resolve_level(cli_level, cfg);
    let make_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let console = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(make_filter())
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(make_filter())
            .boxed()
    };

    let file_layer = cfg
        .and_then(|c| c.logging.file.as_deref().map(|f| (f, c.logging.rotation.as_deref())))
        .map(|(file, rotation)| {
            let path = std::path::Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .map_or_else(|| "sprout.log".into(), |n| n.to_os_string());
            let appender = match rotation {
                Some("daily") => tracing_appender::rolling::daily(dir, &name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, &name),
                _ => tracing_appender::rolling::never(dir, &name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(make_filter())
                .boxed()
        });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();
}
