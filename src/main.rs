//! FitWell CLI
//!
//! Command-line client for the FitWell backend. Every subcommand runs the
//! same flow as the matching page of the web app; the session lives in a
//! SQLite file instead of `localStorage`.

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use fitwell::client::{FitwellApi, HttpClient};
use fitwell::config::{generate_default_config, Config};
use fitwell::flows::{self, DayState, FeedbackOutcome, Outcome};
use fitwell::models::{
    DailyLog, DietForm, ExerciseForm, FeedbackForm, LoginForm, MetricsForm, RegistrationForm,
    Report, ReportPeriod,
};
use fitwell::routes::Route;
use fitwell::session::{SessionStore, SqliteStorage};

#[derive(Parser)]
#[command(name = "fitwell")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track meals and workouts with FitWell")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        /// Password (default: read from stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Password (default: read from stdin)
        #[arg(long)]
        password: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<String>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        age: Option<String>,
        /// male, female or other
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        goal: Option<String>,
    },

    /// Print the Kakao sign-in URL to open in a browser
    OauthUrl,

    /// Finish a Kakao sign-in from the redirect URL (or just its query)
    OauthCallback { url: String },

    /// Log a meal
    Diet {
        food_name: String,
        /// Kilocalories
        calories: String,
    },

    /// Log a workout
    Exercise {
        exercise_type: String,
        /// Minutes, or e.g. "1h 30m"
        duration: String,
    },

    /// Update body metrics
    Metrics {
        /// Weight in kg
        #[arg(long)]
        weight: Option<String>,
        /// Skeletal muscle mass in kg
        #[arg(long)]
        muscle: Option<String>,
    },

    /// Show the weekly and/or monthly report
    Report {
        /// weekly or monthly (default: both)
        period: Option<ReportPeriod>,
    },

    /// Show meals and workouts of one day
    Day {
        /// YYYY-MM-DD (default: today)
        date: Option<String>,
    },

    /// AI feedback
    Feedback {
        #[command(subcommand)]
        command: FeedbackCommand,
    },

    /// Print the default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FeedbackCommand {
    /// Ask a question
    Ask { prompt: Vec<String> },
    /// Feedback on your recent records
    Generate,
    /// Earlier feedback
    History,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    fitwell::logging::init(&config.logging, "");

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let api = HttpClient::from_config(&config.api)?;
    let storage = SqliteStorage::open(&config.session.db_path)
        .with_context(|| format!("Failed to open session store {}", config.session.db_path))?;
    let store = SessionStore::new(storage);

    run(cli, &config, &api, &store).await
}

async fn run(
    cli: Cli,
    config: &Config,
    api: &dyn FitwellApi,
    store: &SessionStore<SqliteStorage>,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            finish(flows::login(api, store, &LoginForm::new(email, password)).await)
        }

        Commands::Logout => finish(flows::logout(store)),

        Commands::Whoami => {
            match store.load()? {
                Some(session) => {
                    println!("{} (id {})", session.display_name(), session.user_id);
                    if let Some(profile) = session.profile() {
                        if let Some(email) = &profile.email {
                            println!("  email:  {}", email);
                        }
                        if let Some(weight) = profile.weight {
                            println!("  weight: {} kg", weight);
                        }
                        if let Some(smm) = profile.skeletal_muscle_mass {
                            println!("  muscle: {} kg", smm);
                        }
                        if let Some(goal) = &profile.goal {
                            println!("  goal:   {}", goal);
                        }
                    }
                }
                None => println!("Not signed in."),
            }
            Ok(())
        }

        Commands::Register {
            name,
            email,
            password,
            height,
            weight,
            age,
            gender,
            goal,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password: password_or_prompt(password)?,
                height: height.unwrap_or_default(),
                weight: weight.unwrap_or_default(),
                age: age.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
                goal: goal.unwrap_or_default(),
            };
            finish(flows::register(api, &form).await)
        }

        Commands::OauthUrl => {
            let provider = config.oauth.provider();
            if !provider.is_configured() {
                bail!("No OAuth client id configured; set [oauth] client_id or FITWELL_OAUTH_CLIENT_ID");
            }
            println!("{}", flows::authorize_url(&provider));
            Ok(())
        }

        Commands::OauthCallback { url } => {
            let query = url.split_once('?').map(|(_, q)| q).unwrap_or(url.as_str());
            finish(flows::handle_callback(api, store, query).await)
        }

        Commands::Diet {
            food_name,
            calories,
        } => {
            let diet = DietForm::new(food_name, calories);
            finish(flows::save_entries(api, store, &diet, &ExerciseForm::default()).await)
        }

        Commands::Exercise {
            exercise_type,
            duration,
        } => {
            let exercise = ExerciseForm::new(exercise_type, duration);
            finish(flows::save_entries(api, store, &DietForm::default(), &exercise).await)
        }

        Commands::Metrics { weight, muscle } => {
            let form = MetricsForm::new(weight.unwrap_or_default(), muscle.unwrap_or_default());
            finish(flows::update_metrics(api, store, &form).await)
        }

        Commands::Report { period } => {
            let user_id = require_user(store)?;
            let reports = flows::load_reports(api, &user_id).await;
            let periods = match period {
                Some(p) => vec![p],
                None => vec![ReportPeriod::Weekly, ReportPeriod::Monthly],
            };

            for period in periods {
                match reports.get(period) {
                    Ok(report) => print_report(period, report, cli.format)?,
                    Err(e) => eprintln!("{} unavailable: {}", period.title(), e),
                }
            }
            Ok(())
        }

        Commands::Day { date } => {
            let user_id = require_user(store)?;
            let date = match date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date {:?}, expected YYYY-MM-DD", s))?,
                None => Local::now().date_naive(),
            };

            let mut dashboard = flows::DashboardState::new();
            match dashboard.select_date(api, &user_id, date).await {
                DayState::Loaded(log) => print_day(date, log, cli.format),
                DayState::Failed(e) => bail!("Could not load {}: {}", date, e),
                DayState::Loading => bail!("Could not load {}", date),
            }
        }

        Commands::Feedback { command } => {
            let outcome = match command {
                FeedbackCommand::Ask { prompt } => {
                    let form = FeedbackForm::new(prompt.join(" "));
                    flows::ask_feedback(api, store, &form).await
                }
                FeedbackCommand::Generate => flows::generate_feedback(api, store).await,
                FeedbackCommand::History => {
                    let items = match flows::feedback_history(api, store).await {
                        None => bail!(not_logged_in()),
                        Some(Err(e)) => bail!("Could not load feedback history: {}", e),
                        Some(Ok(items)) => items,
                    };
                    if cli.format == OutputFormat::Json {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    } else if items.is_empty() {
                        println!("No feedback yet.");
                    } else {
                        for item in items {
                            println!("[{}]", item.created_label());
                            println!("{}", item.content);
                            println!();
                        }
                    }
                    return Ok(());
                }
            };

            match outcome {
                FeedbackOutcome::NotLoggedIn => bail!(not_logged_in()),
                FeedbackOutcome::Invalid(message) => bail!(message),
                other => {
                    if let Some(text) = other.display_text() {
                        println!("{}", text);
                    }
                    Ok(())
                }
            }
        }

        Commands::Config { .. } => Ok(()),
    }
}

fn not_logged_in() -> &'static str {
    "Not signed in. Run `fitwell login <email>` first."
}

fn require_user(store: &SessionStore<SqliteStorage>) -> anyhow::Result<fitwell::UserId> {
    match flows::current_user(store) {
        Some(user_id) => Ok(user_id),
        None => bail!(not_logged_in()),
    }
}

/// Print a flow outcome; error notices become the exit status
fn finish(outcome: Outcome) -> anyhow::Result<()> {
    match &outcome {
        Outcome::NotLoggedIn => bail!(not_logged_in()),
        Outcome::Stay(notice) if notice.is_error() => bail!(notice.message().to_string()),
        Outcome::Navigate {
            to: Route::Signup { prefill: Some(form) },
            ..
        } => {
            println!("No FitWell account yet for this sign-in. Create one with:");
            println!(
                "  fitwell register --name {:?} --email {:?}",
                form.name, form.email
            );
            Ok(())
        }
        Outcome::Navigate { notice: Some(notice), .. } if notice.is_error() => {
            bail!(notice.message().to_string())
        }
        _ => {
            if let Some(notice) = outcome.notice() {
                println!("{}", notice.message());
            }
            Ok(())
        }
    }
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_report(period: ReportPeriod, report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "period": period, "report": report });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["period", "date", "calories", "exercise"])?;
            for point in report.points() {
                let calories = point.calories.to_string();
                let exercise = point.exercise.to_string();
                writer.write_record([
                    period.as_str(),
                    point.date.as_str(),
                    calories.as_str(),
                    exercise.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("{}", period.title());
            if report.is_empty() {
                println!("  No records yet.");
                println!();
                return Ok(());
            }

            println!("{:<12} {:>10} {:>10}", "Date", "Intake", "Burned");
            println!("{}", "-".repeat(34));
            for point in report.points() {
                println!("{:<12} {:>10.0} {:>10.0}", point.date, point.calories, point.exercise);
            }
            let summary = report.summary();
            println!("{}", "-".repeat(34));
            println!(
                "{:<12} {:>10.0} {:>10.0}",
                "Average", summary.avg_calories, summary.avg_exercise
            );
            println!();
        }
    }
    Ok(())
}

fn print_day(date: NaiveDate, log: &DailyLog, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(log)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["kind", "name", "minutes", "calories"])?;
            for meal in &log.meal_logs {
                let calories = meal.calories.to_string();
                writer.write_record(["meal", meal.food_name.as_str(), "", calories.as_str()])?;
            }
            for ex in &log.exercise_logs {
                let minutes = ex.duration.to_string();
                let calories = ex.calories_burned.to_string();
                writer.write_record([
                    "exercise",
                    ex.exercise_type.as_str(),
                    minutes.as_str(),
                    calories.as_str(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            println!("{}", date.format("%A, %B %-d, %Y"));
            if log.is_empty() {
                println!("  Nothing recorded.");
                return Ok(());
            }

            println!();
            println!("Meals");
            for meal in &log.meal_logs {
                println!("  {:<24} {:>8.0} kcal", meal.food_name, meal.calories);
            }
            println!();
            println!("Exercise");
            for ex in &log.exercise_logs {
                println!(
                    "  {:<24} {:>5.0} min {:>8.0} kcal",
                    ex.exercise_type, ex.duration, ex.calories_burned
                );
            }
            println!();
            println!(
                "In {:.0} kcal, out {:.0} kcal, net {:.0} kcal",
                log.calories_in(),
                log.calories_out(),
                log.net_calories()
            );
        }
    }
    Ok(())
}
