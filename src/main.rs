//! Command-line front end for the integration tutor.
//!
//! One-shot subcommands expose the normalizer, the answer checker and the
//! differentiator; `quiz` runs a line-oriented session over stdin.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use calctutor::{
    Catalog, Event, Oracle, Screen, Session, Verdict, Verification, differentiate, load_config,
    logging, normalize, parse_expr, pretty, render, simplify_fully,
};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "calctutor",
    version,
    about = "Check antiderivatives typed in informal calculus notation"
)]
struct Cli {
    /// TOML configuration file. Defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "calctutor.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized form of informal input.
    Normalize { text: String },
    /// Check an antiderivative against an integrand.
    Check {
        /// Integrand in canonical syntax, e.g. `cos(x)`.
        #[arg(long)]
        integrand: String,
        /// Sample points overriding the configured ones, e.g. `2,3,4`.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        points: Vec<i64>,
        /// Candidate antiderivative in informal notation.
        answer: String,
    },
    /// Print the derivative of an expression.
    Diff { expr: String },
    /// List the exercise topics.
    Topics,
    /// Interactive quiz: a topic id to start, answers to submit, `next`,
    /// `back`, `quit`.
    Quiz,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("load config {}", cli.config.display()))?;
    let oracle = Oracle::new(config.oracle.clone());
    match cli.command {
        Command::Normalize { text } => {
            println!("{}", normalize(&text));
            Ok(())
        }
        Command::Check {
            integrand,
            points,
            answer,
        } => cmd_check(&oracle, &integrand, &points, &answer),
        Command::Diff { expr } => cmd_diff(&oracle, &expr),
        Command::Topics => cmd_topics(&load_catalog(config.catalog.as_deref())?),
        Command::Quiz => cmd_quiz(&load_catalog(config.catalog.as_deref())?, &oracle),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            Catalog::load(path).with_context(|| format!("load catalog {}", path.display()))
        }
        None => Ok(Catalog::builtin()),
    }
}

fn cmd_check(oracle: &Oracle, integrand: &str, points: &[i64], answer: &str) -> Result<()> {
    let normalized = normalize(answer);
    let verification = oracle.verify_with_points(&normalized, integrand, points);
    if let Some(diagnostic) = verification.diagnostic.as_ref() {
        debug!(%diagnostic, "check detail");
    }
    for line in check_report(&verification) {
        println!("{line}");
    }
    if verification.verdict != Verdict::Correct {
        bail!("answer not accepted");
    }
    Ok(())
}

/// Learner-facing lines for a check. Sampled values stay out of it.
fn check_report(verification: &Verification) -> Vec<String> {
    let mut lines = vec![verification.verdict.to_string()];
    if let Some(candidate) = verification.candidate.as_ref() {
        lines.push(format!("answer: {}", render(candidate)));
    }
    lines
}

fn cmd_diff(oracle: &Oracle, input: &str) -> Result<()> {
    let expr = parse_expr(&normalize(input)).context("parse expression")?;
    let derivative = simplify_fully(differentiate(&oracle.config().variable, &expr));
    println!("{}", pretty(&derivative));
    Ok(())
}

fn cmd_topics(catalog: &Catalog) -> Result<()> {
    for topic in catalog.topics() {
        println!("{:<8} {} ({} exercises)", topic.id, topic.title, topic.len());
    }
    Ok(())
}

fn cmd_quiz(catalog: &Catalog, oracle: &Oracle) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut session = Session::new();
    show(&mut stdout, &session, catalog)?;

    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let input = line.trim();
        let event = match (session.screen(), input) {
            (_, "quit") => break,
            (_, "") => continue,
            (Screen::Menu, id) => Event::Select(id.to_string()),
            (_, "next") => Event::Advance,
            (_, "back") => Event::Back,
            (_, answer) => Event::Submit(answer.to_string()),
        };
        session = session.apply(event, catalog, oracle);
        show(&mut stdout, &session, catalog)?;
    }
    Ok(())
}

fn show(out: &mut impl Write, session: &Session, catalog: &Catalog) -> Result<()> {
    match session.screen() {
        Screen::Menu => {
            writeln!(out, "Choose a topic:")?;
            for topic in catalog.topics() {
                writeln!(out, "  {:<8} {}", topic.id, topic.title)?;
            }
        }
        Screen::InTopic { topic, index } => {
            if session.verdict().is_none() {
                let total = catalog.topic(topic).map_or(0, |t| t.len());
                if let Some(exercise) = session.current_exercise(catalog) {
                    writeln!(out, "[{}/{}] {}", index + 1, total, exercise.problem)?;
                }
            } else {
                writeln!(out, "{}", session.feedback())?;
                if let Some(rendered) = session.rendered() {
                    writeln!(out, "Your answer: {rendered} + C")?;
                }
                if session.can_advance(catalog) {
                    writeln!(out, "Type `next` for the next exercise.")?;
                }
            }
        }
    }
    out.flush().context("flush stdout")?;
    Ok(())
}
