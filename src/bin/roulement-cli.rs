#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use roulement::{
    scheduler::{EngineOptions, Scheduler},
    storage::{JsonStorage, Storage, Workspace},
    OperatingHours, ShiftOrigin, TimeWindow,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de planning mensuel
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de travail (employés + horaires)
    #[arg(long, global = true, default_value = "workspace.json")]
    workspace: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un workspace d'exemple (semaine type, aucun employé)
    Init {
        /// Écrase un fichier existant
        #[arg(long)]
        force: bool,
    },

    /// Générer le planning d'un mois
    ///
    /// Code de sortie 2 si un jour est dégradé (plafond d'itérations, dernier
    /// recours, personne) ou si l'audit trouve des conflits. Les jours couverts
    /// avec des trous sont signalés sur stderr sans changer le code de sortie.
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Fermeture ponctuelle (YYYY-MM-DD), répétable, sans modifier le workspace
        #[arg(long)]
        closed: Vec<NaiveDate>,
        /// Ouverture ponctuelle `YYYY-MM-DD=HH:MM-HH:MM`, répétable
        #[arg(long)]
        open: Vec<String>,
        /// Le dernier recours respecte aussi le plafond mensuel
        #[arg(long)]
        strict_fallback: bool,
        #[arg(long, default_value_t = 1000)]
        max_iterations: usize,
    },

    /// Afficher les horaires effectifs de chaque date du mois
    Hours {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workspace)?;

    let code = match cli.cmd {
        Commands::Init { force } => {
            if storage.exists() && !force {
                bail!("{} already exists (use --force)", storage.path().display());
            }
            let workspace = Workspace {
                hours: OperatingHours::with_default_week(),
                ..Workspace::default()
            };
            storage.save(&workspace)?;
            println!("Workspace written to {}", storage.path().display());
            0
        }
        Commands::Generate {
            year,
            month,
            closed,
            open,
            strict_fallback,
            max_iterations,
        } => {
            let workspace = storage.load()?;
            let mut hours = workspace.hours.clone();
            for date in closed {
                hours.set_closed_for_date(date);
            }
            for raw in open {
                let (date, window) = parse_open_override(&raw)?;
                hours.set_hours_for_date(date, window);
            }
            let opts = EngineOptions {
                max_iterations_per_day: max_iterations,
                enforce_cap_in_fallback: strict_fallback,
                ..EngineOptions::default()
            };

            let scheduler = Scheduler::new(&workspace.employees, &hours)?.with_options(opts);
            let (schedule, report) = scheduler.generate_with_report(year, month)?;

            // impression compacte
            for s in &schedule {
                let marker = match s.origin() {
                    ShiftOrigin::Regular => "",
                    ShiftOrigin::Relaxed => " (min)",
                    ShiftOrigin::Fallback => " (fallback)",
                };
                println!(
                    "{} {} | {} | {}{}",
                    s.date(),
                    s.weekday(),
                    s.window(),
                    s.employee(),
                    marker
                );
            }
            println!("--");
            for (name, total) in schedule.hours_by_employee() {
                println!("{name}: {total:.2} h");
            }

            let conflicts = scheduler.detect_conflicts(&schedule);
            for c in &conflicts {
                eprintln!("{} {} {}: {:?}", c.date, c.start.format("%H:%M"), c.employee, c.kind);
            }
            for day in report.partial_days() {
                eprintln!("{}: {:?}", day.date, day.outcome);
            }
            if report.is_degraded() || !conflicts.is_empty() {
                for day in report.degraded_days() {
                    eprintln!("{}: {:?}", day.date, day.outcome);
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }
        Commands::Hours { year, month } => {
            let workspace = storage.load()?;
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .with_context(|| format!("invalid month: {year}-{month}"))?;
            for date in first.iter_days().take_while(|d| d.month() == month) {
                match workspace.hours.get_hours(date.weekday(), Some(date)) {
                    Some(window) => println!("{} {} | {}", date, date.weekday(), window),
                    None => println!("{} {} | closed", date, date.weekday()),
                }
            }
            0
        }
    };

    std::process::exit(code);
}

fn parse_open_override(raw: &str) -> Result<(NaiveDate, TimeWindow)> {
    let (date, window) = raw
        .split_once('=')
        .with_context(|| format!("expected DATE=HH:MM-HH:MM, got {raw}"))?;
    let date: NaiveDate = date.trim().parse().context("date YYYY-MM-DD")?;
    let window: TimeWindow = window.parse()?;
    Ok((date, window))
}
