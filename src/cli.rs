use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Basketball team season stats in the terminal
///
/// Shows one team's record, averages, home/away split and game list for a
/// season, using the balldontlie API. Responses are cached for five minutes
/// and the last good response is shown when the API is unreachable.
///
/// An API key is required: set it once with --set-api-key or export
/// BALLDONTLIE_API_KEY.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Season to show, e.g. 2023 for the 2023-24 season. Defaults to the configured season.
    #[arg(long, short = 's', help_heading = "Query")]
    pub season: Option<i32>,

    /// Number of games to request (1-100). Defaults to the configured page size.
    #[arg(long = "per-page", short = 'n', help_heading = "Query",
          value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,

    /// Team id to show instead of the configured team.
    #[arg(long = "team-id", short = 't', help_heading = "Query")]
    pub team_id: Option<u32>,

    /// Re-query every SECS seconds until ctrl-c. Repeats inside the cache window
    /// are answered from the cache.
    #[arg(long, value_name = "SECS", help_heading = "Display Options",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,

    /// Disable colored output.
    #[arg(long = "plain", short = 'p', help_heading = "Display Options")]
    pub plain: bool,

    /// Store the API key in the config file and exit.
    #[arg(long = "set-api-key", value_name = "KEY", help_heading = "Configuration")]
    pub set_api_key: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

/// Config operations print and exit without touching the API
pub fn is_config_operation(args: &Args) -> bool {
    args.list_config || args.set_api_key.is_some()
}
