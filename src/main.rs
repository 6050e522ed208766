// SPDX-License-Identifier: MPL-2.0
use iced_marquee::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_marquee

USAGE:
  iced_marquee [OPTIONS] [MEDIA]

OPTIONS:
  --lang <id>          Interface language (e.g. en-US, fr)
  --config-dir <dir>   Directory holding settings.toml
  --log <filter>       Log filter, overrides RUST_LOG (e.g. debug, iced_marquee=trace)
  -h, --help           Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        eprintln!("invalid --lang: {err}");
        None
    });
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            eprintln!("invalid --config-dir: {err}");
            None
        });
    let log: Option<String> = args.opt_value_from_str("--log").unwrap_or_else(|err| {
        eprintln!("invalid --log: {err}");
        None
    });
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    init_logging(log.as_deref());
    paths::init_cli_override(config_dir.clone());

    app::run(Flags {
        lang,
        file_path,
        config_dir,
    })
}

/// `--log` wins over `RUST_LOG`; without either only `info` and above is shown.
fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|err| {
            eprintln!("invalid --log filter: {err}");
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
