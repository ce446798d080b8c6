use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType, SetTitle},
};
use hoopstats::cli::{Args, is_config_operation};
use hoopstats::config::Config;
use hoopstats::data_fetcher::StatsService;
use hoopstats::error::AppError;
use hoopstats::logging::setup_logging;
use hoopstats::report::{ReportOptions, render_report};
use std::io::{Write, stdout};
use std::path::Path;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

/// Ticks at `period`; a tick missed during a slow fetch is delayed, not replayed in a burst.
fn watch_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Fetches team info and games concurrently and prints the report.
async fn show_report(
    service: &StatsService,
    season: i32,
    per_page: u32,
    options: ReportOptions,
) -> Result<(), AppError> {
    let (team, games) = futures::join!(
        service.get_team_info(),
        service.get_team_games(season, per_page)
    );

    let report = render_report(team.as_ref(), &games, season, options);
    let mut stdout = stdout();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

async fn run_config_operation(args: &Args) -> Result<(), AppError> {
    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    if let Some(api_key) = &args.set_api_key {
        let config_path = Config::get_config_path();
        let mut config = if Path::new(&config_path).exists() {
            Config::load_from_path(&config_path).await?
        } else {
            Config::default()
        };
        config.api_key = api_key.trim().to_string();
        config.validate()?;
        config.save().await?;
        println!("API key saved to {config_path}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (log_file_path, _guard) = setup_logging(&args).await?;
    info!("Logs are being written to: {log_file_path}");

    if is_config_operation(&args) {
        return run_config_operation(&args).await;
    }

    // Fail early on a missing API key or invalid settings
    let mut config = Config::load().await?;
    if let Some(team_id) = args.team_id {
        config.team_id = team_id;
    }
    let season = args.season.unwrap_or(config.season);
    let per_page = args.per_page.unwrap_or(config.per_page);
    let options = ReportOptions { color: !args.plain };

    let service = StatsService::new(config)?;
    execute!(stdout(), SetTitle("hoopstats"))?;

    let Some(interval_secs) = args.watch else {
        return show_report(&service, season, per_page, options).await;
    };

    info!("Watching season {season} every {interval_secs}s");
    let mut interval = watch_interval(Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received ctrl-c, exiting watch mode");
                break;
            }
            _ = interval.tick() => {
                execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                show_report(&service, season, per_page, options).await?;
                let stats = service.cache_stats().await;
                if stats.games.stale > 0 {
                    warn!("Serving {} stale game lists", stats.games.stale);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watch_interval_does_not_burst_after_slow_tick() {
        let period = Duration::from_millis(50);
        let mut interval = watch_interval(period);
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Delay);

        interval.tick().await;
        // A fetch that outlasts several periods
        tokio::time::sleep(Duration::from_millis(180)).await;
        interval.tick().await;

        let start = std::time::Instant::now();
        interval.tick().await;
        assert!(
            start.elapsed() >= Duration::from_millis(40),
            "missed ticks must not fire back to back"
        );
    }
}
