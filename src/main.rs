use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};
use scheme_advisor::catalog::{Category, Scheme};
use scheme_advisor::config::{Config, ConfigOverrides};
use scheme_advisor::eligibility::{RecommendationReport, SchemeMatch};
use scheme_advisor::engine::Engine;
use scheme_advisor::error::EngineError;
use scheme_advisor::output::csv::{matches_to_csv, schemes_to_csv};
use scheme_advisor::output::table::{
    render_matches_table, render_questions_table, render_report, render_scheme_detail,
    render_schemes_table, render_score_breakdown,
};
use scheme_advisor::output::{render_json, OutputFormat};
use scheme_advisor::questions::{AnswerSheet, Question};
use scheme_advisor::server::run_server;
use scheme_advisor::wizard::{Wizard, WizardStep};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "scheme-advisor",
    about = "Match farmers to government schemes they qualify for"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Alternative TOML scheme catalog.
    #[arg(long)]
    catalog: Option<String>,
    /// Number of ranked schemes to show.
    #[arg(long)]
    top: Option<usize>,
    #[arg(long = "log-level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the questionnaire.
    Questions,
    /// Browse the scheme catalog.
    Schemes {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one scheme in full.
    Scheme { id: String },
    /// Check a single scheme against partial answers.
    Check {
        id: String,
        #[arg(short, long = "answer")]
        answer: Vec<String>,
    },
    /// Rank the catalog for a complete set of answers.
    Recommend {
        #[arg(short, long = "answer")]
        answer: Vec<String>,
        #[arg(long = "answers-file")]
        answers_file: Option<PathBuf>,
    },
    /// Answer the questionnaire interactively.
    Wizard,
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        catalog_path: cli.catalog.clone(),
        top_n: cli.top,
        log_level: cli.log_level.clone(),
    });
    init_tracing(&config.logging.level);

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let engine = Arc::new(config.build_engine()?);
    let top_n = config.presentation.top_n;

    match &cli.command {
        Commands::Questions => match cli.output {
            OutputFormat::Table => println!("{}", render_questions_table(engine.questions())),
            OutputFormat::Json => {
                let questions: Vec<&Question> = engine.questions().iter().collect();
                println!("{}", render_json(&questions)?);
            }
            OutputFormat::Csv => {
                warn!("CSV output for questions not implemented, using JSON");
                let questions: Vec<&Question> = engine.questions().iter().collect();
                println!("{}", render_json(&questions)?);
            }
        },
        Commands::Schemes { category, search } => {
            let category = category.as_deref().map(Category::from_str).transpose()?;
            let schemes = engine.catalog().search(category, search.as_deref());
            print_schemes(&schemes, cli.output)?;
        }
        Commands::Scheme { id } => {
            let scheme = engine.catalog().require(id)?;
            print_scheme(scheme, cli.output)?;
        }
        Commands::Check { id, answer } => {
            let sheet = AnswerSheet::from_pairs(answer.iter().map(String::as_str))?;
            let mut wizard = Wizard::new(Arc::clone(&engine));
            wizard.fill(&sheet)?;
            let result = engine.check(id, wizard.answers())?;
            print_check(&result, cli.output)?;
        }
        Commands::Recommend {
            answer,
            answers_file,
        } => {
            let sheet = load_sheet(answer, answers_file.as_deref())?;
            let wizard = Wizard::replay(Arc::clone(&engine), &sheet)?;
            let report = wizard
                .into_report()
                .ok_or_else(|| anyhow!("questionnaire did not complete"))?;
            print_report(report, top_n, cli.output)?;
        }
        Commands::Wizard => run_wizard(Arc::clone(&engine), top_n, cli.output)?,
        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let bind = format!("{host}:{port}");
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            run_server(config.clone(), engine, addr).await?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

/// Answers file first, then `--answer` pairs, which win per question.
fn load_sheet(pairs: &[String], file: Option<&Path>) -> Result<AnswerSheet> {
    let mut sheet = match file {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed reading answers: {}", path.display()))?;
            toml::from_str::<AnswerSheet>(&data)
                .with_context(|| format!("failed parsing answers: {}", path.display()))?
        }
        None => AnswerSheet::default(),
    };
    let flags = AnswerSheet::from_pairs(pairs.iter().map(String::as_str))?;
    sheet.0.extend(flags.0);
    Ok(sheet)
}

fn run_wizard(engine: Arc<Engine>, top_n: usize, format: OutputFormat) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut wizard = Wizard::new(engine);
    info!("interactive questionnaire started");

    loop {
        match wizard.step() {
            WizardStep::Question(index) => {
                let question = wizard
                    .current_question()
                    .cloned()
                    .ok_or_else(|| anyhow!("no question at position {index}"))?;
                let (position, total) = wizard.progress();
                let prompt = format!("[{position}/{total}] {}", question.prompt);
                let back = if question.is_multi() {
                    ask_multi(&theme, &mut wizard, &question, &prompt)?
                } else {
                    ask_single(&theme, &mut wizard, &question, &prompt)?
                };
                if back {
                    wizard.retreat();
                    continue;
                }
                match wizard.advance() {
                    Ok(_) => {}
                    Err(EngineError::Validation { message, .. }) => eprintln!("{message}"),
                    Err(err) => return Err(err.into()),
                }
            }
            WizardStep::Results => {
                if let Some(report) = wizard.report() {
                    print_report(report.clone(), top_n, format)?;
                }
                let choice = Select::with_theme(&theme)
                    .with_prompt("What next?")
                    .items(&["Back", "Start over", "Quit"])
                    .default(2)
                    .interact()?;
                match choice {
                    0 => {
                        wizard.retreat();
                    }
                    1 => wizard.restart(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

/// Returns `true` when the farmer asked to go back.
fn ask_single(
    theme: &ColorfulTheme,
    wizard: &mut Wizard,
    question: &Question,
    prompt: &str,
) -> Result<bool> {
    let choices = owned_choices(question);
    let mut items: Vec<String> = choices.iter().map(|(_, label)| label.clone()).collect();
    let can_go_back = wizard.step() != WizardStep::Question(0);
    if can_go_back {
        items.push("Back".to_string());
    }
    let current = wizard.answers().single(&question.id);
    let default = choices
        .iter()
        .position(|(value, _)| Some(value.as_str()) == current)
        .unwrap_or(0);

    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;
    match choices.get(picked) {
        Some((value, _)) => {
            wizard.select_single(&question.id, value)?;
            Ok(false)
        }
        None => Ok(true),
    }
}

fn ask_multi(
    theme: &ColorfulTheme,
    wizard: &mut Wizard,
    question: &Question,
    prompt: &str,
) -> Result<bool> {
    let choices = owned_choices(question);
    let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
    let selected: Vec<bool> = choices
        .iter()
        .map(|(value, _)| wizard.answers().contains(&question.id, value))
        .collect();

    let picked = MultiSelect::with_theme(theme)
        .with_prompt(format!("{prompt} (space to toggle)"))
        .items(&labels)
        .defaults(&selected)
        .interact()?;
    for (idx, (value, _)) in choices.iter().enumerate() {
        if picked.contains(&idx) != selected[idx] {
            wizard.toggle_multi(&question.id, value)?;
        }
    }

    if wizard.step() == WizardStep::Question(0) {
        return Ok(false);
    }
    let nav = Select::with_theme(theme)
        .items(&["Continue", "Back"])
        .default(0)
        .interact()?;
    Ok(nav == 1)
}

fn owned_choices(question: &Question) -> Vec<(String, String)> {
    question
        .choices()
        .into_iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

fn print_report(report: RecommendationReport, top_n: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_report(&report, top_n)),
        OutputFormat::Json => println!("{}", render_json(&report.truncated(top_n))?),
        OutputFormat::Csv => {
            let report = report.truncated(top_n);
            println!("{}", matches_to_csv(&report.matches)?);
        }
    }
    Ok(())
}

fn print_check(result: &SchemeMatch, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_matches_table(std::slice::from_ref(result)));
            if !result.score.components.is_empty() {
                println!("{}", render_score_breakdown(result));
            }
        }
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => println!("{}", matches_to_csv(std::slice::from_ref(result))?),
    }
    Ok(())
}

fn print_schemes(schemes: &[&Scheme], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_schemes_table(schemes)),
        OutputFormat::Json => println!("{}", render_json(schemes)?),
        OutputFormat::Csv => println!("{}", schemes_to_csv(schemes)?),
    }
    Ok(())
}

fn print_scheme(scheme: &Scheme, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_scheme_detail(scheme)),
        OutputFormat::Json => println!("{}", render_json(scheme)?),
        OutputFormat::Csv => println!("{}", schemes_to_csv(&[scheme])?),
    }
    Ok(())
}
