use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::env;
use std::io::Write;
use uuid::Uuid;

use aceit_planner::cache::{self, AnalysisCache};
use aceit_planner::config::Config;
use aceit_planner::models::plan::StudyPlan;
use aceit_planner::service::http::HttpPlanService;
use aceit_planner::service::PlanService;
use aceit_planner::timer::{PomodoroConfig, PomodoroPhase, PomodoroTimer};
use aceit_planner::workflow::CompletionWorkflow;
use aceit_planner::{render, stats};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aceit_planner=info".into()),
        )
        .init();

    let config = Config::from_env();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("week") => cmd_week(&config, parse_date_arg(args.get(1))?).await,
        Some("summary") => cmd_summary(&config, parse_date_arg(args.get(1))?).await,
        Some("complete") => cmd_complete(&config, &args[1..]).await,
        Some("uncomplete") => cmd_uncomplete(&config, &args[1..]).await,
        Some("analysis") => cmd_analysis(&config, parse_date_arg(args.get(1))?).await,
        Some("pomodoro") => cmd_pomodoro(&config).await,
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("aceit-planner — study plan client");
    println!();
    println!("Usage:");
    println!("  aceit-planner week [YYYY-MM-DD]        render the week grid");
    println!("  aceit-planner summary [YYYY-MM-DD]     weekly progress summary");
    println!("  aceit-planner complete <slot-id> [--correct N --wrong N --blank N | --skip]");
    println!("  aceit-planner uncomplete <slot-id>     clear a slot's completion");
    println!("  aceit-planner analysis [YYYY-MM-DD]    AI daily analysis (cached)");
    println!("  aceit-planner pomodoro                 run a pomodoro countdown");
}

/// Dates always come from local calendar fields, never a UTC timestamp.
fn parse_date_arg(arg: Option<&String>) -> anyhow::Result<NaiveDate> {
    match arg {
        None => Ok(Local::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("dates must be YYYY-MM-DD, got {raw}")),
    }
}

async fn cmd_week(config: &Config, reference: NaiveDate) -> anyhow::Result<()> {
    let service = HttpPlanService::new(config)?;
    let plan = service.fetch_active_plan().await?;
    println!("{} ({} .. {})", plan.title, plan.start_date, plan.end_date);
    println!();
    print!(
        "{}",
        render::render_week(&plan, reference, config.pixels_per_hour)
    );
    Ok(())
}

async fn cmd_summary(config: &Config, reference: NaiveDate) -> anyhow::Result<()> {
    let service = HttpPlanService::new(config)?;
    let plan = service.fetch_active_plan().await?;
    let summary = stats::week_summary(&plan, reference);

    println!(
        "Week {} .. {}",
        summary.week_start, summary.week_end
    );
    println!(
        "Studied {} of {} planned minutes ({:.0}%)",
        summary.completed_minutes,
        summary.planned_minutes,
        summary.completion_rate * 100.0
    );
    println!(
        "Questions: {} solved — {} correct, {} wrong, {} blank",
        summary.questions.total(),
        summary.questions.correct,
        summary.questions.wrong,
        summary.questions.blank
    );
    if let Some(best) = &summary.best_day {
        println!("Best day: {best}");
    }
    if let Some(worst) = &summary.worst_day {
        println!("Weakest day: {worst}");
    }
    println!();
    for day in &summary.days {
        println!(
            "  {}  {:>3}/{:>3} min  ({}/{} slots)",
            day.date,
            day.completed_minutes,
            day.planned_minutes,
            day.slots_completed,
            day.slots_total
        );
    }
    Ok(())
}

async fn cmd_complete(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let slot_id = parse_slot_id(args)?;
    let mut correct = String::new();
    let mut wrong = String::new();
    let mut blank = String::new();
    let mut skip = false;

    let mut flags = args[1..].iter();
    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--skip" => skip = true,
            "--correct" => correct = flags.next().cloned().unwrap_or_default(),
            "--wrong" => wrong = flags.next().cloned().unwrap_or_default(),
            "--blank" => blank = flags.next().cloned().unwrap_or_default(),
            other => anyhow::bail!("unknown flag: {other}"),
        }
    }

    let service = HttpPlanService::new(config)?;
    let plan = service.fetch_active_plan().await?;
    let slot = plan
        .find_slot(slot_id)
        .context("the active plan has no such slot")?;
    if slot.completed {
        anyhow::bail!("slot is already complete; use `uncomplete` to clear it");
    }

    let mut workflow = CompletionWorkflow::new(service, plan.id);
    workflow.begin_complete(slot_id)?;
    let refreshed = if skip {
        workflow.skip_outcome().await?
    } else {
        workflow.submit_outcome(&correct, &wrong, &blank).await?
    };

    report_slot(&refreshed, slot_id);
    Ok(())
}

async fn cmd_uncomplete(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let slot_id = parse_slot_id(args)?;

    let service = HttpPlanService::new(config)?;
    let plan = service.fetch_active_plan().await?;
    let slot = plan
        .find_slot(slot_id)
        .context("the active plan has no such slot")?;
    if !slot.completed {
        anyhow::bail!("slot is not complete");
    }

    let mut workflow = CompletionWorkflow::new(service, plan.id);
    let refreshed = workflow.mark_incomplete(slot_id).await?;

    report_slot(&refreshed, slot_id);
    Ok(())
}

fn parse_slot_id(args: &[String]) -> anyhow::Result<Uuid> {
    args.first()
        .context("a slot id is required")?
        .parse()
        .context("slot id must be a UUID")
}

fn report_slot(plan: &StudyPlan, slot_id: Uuid) {
    match plan.find_slot(slot_id) {
        Some(slot) => {
            let status = if slot.completed { "complete" } else { "not complete" };
            match slot.outcome {
                Some(outcome) => println!(
                    "{} {}..{} is now {status} ({} correct, {} wrong, {} blank)",
                    slot.subject.name,
                    slot.start_time,
                    slot.end_time,
                    outcome.correct,
                    outcome.wrong,
                    outcome.blank
                ),
                None => println!(
                    "{} {}..{} is now {status}",
                    slot.subject.name, slot.start_time, slot.end_time
                ),
            }
        }
        // The slot vanished between the write and the refresh; the refreshed
        // plan is still the truth.
        None => println!("slot {slot_id} is no longer part of the plan"),
    }
}

async fn cmd_analysis(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let service = HttpPlanService::new(config)?;
    let me = service.fetch_me().await?;
    let cache = AnalysisCache::new(config.cache_dir.clone());

    let analysis = cache::daily_analysis_cached(&service, &cache, &me, date).await?;

    println!("Analysis for {} — {}", date, me.display_name);
    println!();
    println!("{}", analysis.summary);
    if !analysis.strengths.is_empty() {
        println!();
        println!("Strengths:");
        for item in &analysis.strengths {
            println!("  - {item}");
        }
    }
    if !analysis.weak_topics.is_empty() {
        println!();
        println!("Needs work:");
        for item in &analysis.weak_topics {
            println!("  - {item}");
        }
    }
    if !analysis.recommendation.is_empty() {
        println!();
        println!("Next: {}", analysis.recommendation);
    }
    Ok(())
}

async fn cmd_pomodoro(config: &Config) -> anyhow::Result<()> {
    let mut timer = PomodoroTimer::new(PomodoroConfig::from_config(config));
    println!(
        "{} — {} (ctrl-c to stop)",
        timer.phase().label(),
        timer.format_remaining()
    );

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    interval.tick().await; // first tick fires immediately
    loop {
        interval.tick().await;
        match timer.tick() {
            Some(phase) => {
                println!();
                println!(
                    "{} done — {} for {} (sessions: {})",
                    match phase {
                        PomodoroPhase::Focus => "Break",
                        _ => "Focus",
                    },
                    phase.label(),
                    timer.format_remaining(),
                    timer.focus_completed()
                );
            }
            None => {
                print!("\r{} {}   ", timer.phase().label(), timer.format_remaining());
                std::io::stdout().flush()?;
            }
        }
    }
}
