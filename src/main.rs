use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use ministry_scheduler::config::AppConfig;
use ministry_scheduler::engine::Engine;
use ministry_scheduler::member::Member;
use ministry_scheduler::schedule::{MeetingSchedule, RoleSlot};
use ministry_scheduler::store::MemoryStore;
use ministry_scheduler::web::{run_server, WebState};

#[derive(Parser, Debug)]
#[command(name = "ministry-scheduler")]
#[command(version)]
#[command(about = "Assignment engine for congregation meeting schedules")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the confirmation-link web endpoint
    Serve(ServeArgs),

    /// Auto-fill the open slots of one week's schedule
    Plan(PlanArgs),

    /// List the assignments a member already holds on a date
    Conflicts(ConflictArgs),
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// JSON data file backing the store
    #[arg(long, default_value = "scheduler-data.json")]
    data: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Schedule date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// JSON data file backing the store
    #[arg(long, default_value = "scheduler-data.json")]
    data: PathBuf,

    /// Persist the plan (and regenerate that date's history rows)
    #[arg(long)]
    save: bool,
}

#[derive(Parser, Debug)]
struct ConflictArgs {
    /// Date to scan (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Member id
    #[arg(long)]
    member: Uuid,

    /// JSON data file backing the store
    #[arg(long, default_value = "scheduler-data.json")]
    data: PathBuf,
}

// =============================================================================
// Entry point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Serve(serve_args) => {
            let config = AppConfig {
                listen_addr: format!("127.0.0.1:{}", serve_args.port).parse()?,
                data_path: serve_args.data,
            };
            let engine = open_engine(&config.data_path)?;
            run_server(config.listen_addr, WebState { engine }).await;
        }
        Commands::Plan(plan_args) => {
            let engine = open_engine(&plan_args.data)?;
            let planned = engine.plan_week(plan_args.date).await?;
            let members = member_names(&engine).await?;
            print_plan(&planned, &members);
            if plan_args.save {
                engine.save_schedule(&planned).await?;
                println!("Saved.");
            }
        }
        Commands::Conflicts(conflict_args) => {
            let engine = open_engine(&conflict_args.data)?;
            let labels = engine
                .scan_conflicts(conflict_args.date, conflict_args.member)
                .await;
            if labels.is_empty() {
                println!("No conflicts on {}", conflict_args.date);
            } else {
                for label in labels {
                    println!("{}", label);
                }
            }
        }
    }

    Ok(())
}

fn open_engine(path: &PathBuf) -> Result<Engine, Box<dyn std::error::Error>> {
    let store = MemoryStore::open(path)?;
    Ok(Engine::new(Arc::new(store)))
}

async fn member_names(engine: &Engine) -> Result<HashMap<Uuid, String>, Box<dyn std::error::Error>> {
    let members: Vec<Member> = engine.repository().active_members().await?;
    Ok(members.into_iter().map(|m| (m.id, m.name)).collect())
}

fn print_plan(schedule: &MeetingSchedule, names: &HashMap<Uuid, String>) {
    let display = |slot: &RoleSlot| match slot.member {
        Some(id) => names.get(&id).cloned().unwrap_or_else(|| id.to_string()),
        None => "(unassigned)".to_string(),
    };

    println!("Schedule for {}", schedule.date);
    println!("  Chairman:       {}", display(&schedule.chairman));
    println!("  Opening prayer: {}", display(&schedule.opening_prayer));
    for part in &schedule.parts {
        let main = part
            .member
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| "(unassigned)".to_string());
        print!("  {} ({} min): {}", part.name, part.duration_minutes, main);
        if part.kind.needs_assistant() {
            let assistant = part
                .assistant
                .and_then(|id| names.get(&id).cloned())
                .unwrap_or_else(|| "(unassigned)".to_string());
            print!(" / {}", assistant);
        }
        println!();
    }
    println!("  Closing prayer: {}", display(&schedule.closing_prayer));
}
