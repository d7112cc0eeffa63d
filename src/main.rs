use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use cwplan::config::{Config, check_timespan};
use cwplan::model::{CalendarWeek, Summary, SummaryType, create_summary};
use cwplan::panel::CalendarWeekPanels;
use cwplan::storage::LocalStorage;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cwplan")]
#[command(about = "Calendar-week view of demand, production, deliveries and stock")]
struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ISO week of a date (today by default)
    Week { date: Option<NaiveDate> },
    /// Move a week forward or backward, e.g. `step 2020-W52 2`
    Step {
        week: CalendarWeek,
        #[arg(allow_negative_numbers = true)]
        offset: i64,
    },
    /// Week panels of the summary view
    Panels {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Weekly totals of a snapshot file
    Summary {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        view: Option<SummaryType>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        days: Option<u32>,
        /// Also print the days of expanded panels
        #[arg(long, default_value_t = false)]
        daily: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load_from(p),
        None => Config::load(),
    }
}

fn build_panels(config: &Config, from: NaiveDate, count: Option<usize>) -> CalendarWeekPanels {
    match count.or(config.panel_count) {
        Some(n) => CalendarWeekPanels::with_count(from, n),
        None => CalendarWeekPanels::starting(from),
    }
}

fn print_week(cw: &CalendarWeek) {
    println!(
        "{}  {}  {} - {}",
        cw,
        cw.label(),
        cw.start_date(),
        cw.end_date()
    );
}

fn print_summary(summary: &Summary, panels: &CalendarWeekPanels, daily: bool) {
    let primary = match summary.kind {
        SummaryType::Demand => "Demand",
        SummaryType::Production => "Production",
    };
    println!(
        "{:<7} {:<25} {:>12} {:>12} {:>12}",
        "Week", "Dates", primary, "Deliveries", "Stock"
    );
    for panel in panels.iter() {
        let totals = summary.week_totals(panel.item);
        let stock = totals
            .stock_total
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<7} {:<25} {:>12.2} {:>12.2} {:>12}{}",
            panel.item.label(),
            format!("{} - {}", panel.item.start_date(), panel.item.end_date()),
            totals.primary_value_total,
            totals.delivery_total,
            stock,
            if totals.is_short() { "  !" } else { "" }
        );
        if daily && panel.is_expanded {
            for date in panel.item.days() {
                if let Some(day) = summary.day(date) {
                    println!(
                        "  {:<31} {:>12.2} {:>12.2} {:>12.2}",
                        date.format("%a %Y-%m-%d").to_string(),
                        day.primary_value_total,
                        day.delivery_total,
                        day.stock_total
                    );
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Week { date } => {
            let date = date.unwrap_or(today);
            let cw = CalendarWeek::checked_from_date(date)
                .with_context(|| format!("The week of {} is outside the supported date range", date))?;
            print_week(&cw);
        }
        Commands::Step { week, offset } => {
            let cw = week.checked_step(offset).with_context(|| {
                format!("{} moved by {} weeks is outside the supported date range", week, offset)
            })?;
            print_week(&cw);
        }
        Commands::Panels { from, count } => {
            let config = load_config(cli.config.as_ref())?;
            let panels = build_panels(&config, from.unwrap_or(today), count);
            for panel in panels.iter() {
                let marker = if panel.is_expanded { "[-]" } else { "[+]" };
                print!("{} ", marker);
                print_week(&panel.item);
            }
        }
        Commands::Summary {
            file,
            view,
            from,
            days,
            daily,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let path = file
                .or_else(|| config.data_file.clone())
                .or_else(LocalStorage::default_path)
                .context("No snapshot file given and no data directory available")?;
            let days = check_timespan(days.unwrap_or(config.timespan_days)).context("Invalid --days")?;
            let snapshot = LocalStorage::load_snapshot(&path)?;
            let from = from.unwrap_or(today);
            let kind = view.unwrap_or(config.default_view);
            let summary = create_summary(kind, &snapshot, from, days);
            log::info!("Summarised {} as {} view", path.display(), kind);
            let panels = build_panels(&config, from, None);
            print_summary(&summary, &panels, daily);
        }
    }
    Ok(())
}
