//! Terminal front end over the roster core.
//!
//! # Responsibility
//! - Drive a demo-seeded `RosterSession` from command-line flags.
//! - Print the derived table, dashboard figures and grade chart.

mod render;

use clap::{Args, Parser, Subcommand};
use log::error;
use roster_core::{
    core_version, DefaultRosterSession, Grade, RosterConfig, SortField, Subject,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Student roster: list, filter, sort and summarize students.")]
struct CommandLine {
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Start from an empty roster instead of the demo students.
    #[arg(long, global = true)]
    empty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the filtered and sorted student table
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show dashboard figures and the grade distribution
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Show grade filter options
    Grades,
    /// Add one student, then show the table
    Add(AddArgs),
    /// Print the core version
    Version,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive match on name or email
    #[arg(long, short)]
    search: Option<String>,
    /// Exact grade label, e.g. `B+`
    #[arg(long, short, value_parser = parse_grade)]
    grade: Option<Grade>,
    /// Sort column; repeat to toggle direction
    #[arg(long, value_parser = parse_sort_field)]
    sort: Vec<SortField>,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, allow_negative_numbers = true)]
    age: i64,
    #[arg(long)]
    grade: String,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    attendance: i64,
    /// Catalog subject; repeatable
    #[arg(long = "subject", value_parser = parse_subject)]
    subjects: Vec<Subject>,
    #[arg(long)]
    json: bool,
}

fn parse_grade(value: &str) -> Result<Grade, String> {
    Grade::parse(value).ok_or_else(|| format!("unknown grade `{value}`"))
}

fn parse_sort_field(value: &str) -> Result<SortField, String> {
    SortField::parse(value).ok_or_else(|| {
        format!("unknown sort field `{value}`; expected name|email|grade|age|attendance")
    })
}

fn parse_subject(value: &str) -> Result<Subject, String> {
    Subject::parse(value).ok_or_else(|| format!("unknown subject `{value}`"))
}

fn main() -> ExitCode {
    let cli = CommandLine::parse();

    let mut config = RosterConfig {
        log_dir: cli.log_dir.clone(),
        seed_demo_roster: !cli.empty,
        // One-shot process: nothing would ever observe the dismissal.
        notice_dismiss_after: None,
        ..RosterConfig::default()
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Err(err) = config.init_logging() {
        eprintln!("roster: {err}");
        return ExitCode::FAILURE;
    }

    let mut session = DefaultRosterSession::from_config(&config);
    match run(&mut session, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error");
            eprintln!("roster: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(session: &mut DefaultRosterSession, command: Commands) -> Result<(), String> {
    match command {
        Commands::List(args) => {
            if let Some(term) = args.search {
                session.set_search_term(term);
            }
            session.set_grade_filter(args.grade);
            for field in args.sort {
                session.sort_by(field);
            }
            if args.json {
                print_json(&session.visible())
            } else {
                print!("{}", render::table(session));
                Ok(())
            }
        }
        Commands::Stats { json } => {
            if json {
                print_json(session.stats())
            } else {
                print!("{}", render::dashboard(session));
                Ok(())
            }
        }
        Commands::Grades => {
            for grade in session.unique_grades() {
                println!("{grade}");
            }
            Ok(())
        }
        Commands::Add(args) => {
            {
                let draft = session.draft_mut();
                draft.name = args.name;
                draft.email = args.email;
                draft.age = Some(args.age);
                draft.grade = args.grade;
                draft.attendance = Some(args.attendance);
                for subject in args.subjects {
                    draft.toggle_subject(subject, true);
                }
            }
            let created = session.add_student().map_err(|err| err.to_string())?;
            if args.json {
                print_json(&created)
            } else {
                if let Some(notice) = session.notice() {
                    println!("{}", notice.message);
                }
                print!("{}", render::table(session));
                Ok(())
            }
        }
        Commands::Version => {
            println!("roster_core version={}", core_version());
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}
