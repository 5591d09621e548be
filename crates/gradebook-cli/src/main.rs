//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gradebook_core::config::{load_config_from, GradebookConfig};
use gradebook_core::Student;

mod commands;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Track assignments, students, and grades")]
struct Cli {
    /// Gradebook file (defaults to the configured path)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty gradebook file
    Init,

    /// Print the whole gradebook
    Show {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Apply record files (ASSIGNMENT, STUDENT, GRADES_FOR_*, GRADEBOOK)
    Import {
        /// Record files, applied in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Add one assignment; every student starts at 0 on it
    AddAssignment {
        name: String,
        #[arg(allow_negative_numbers = true)]
        total_points: f64,
        #[arg(allow_negative_numbers = true)]
        percent_of_grade: f64,
    },

    /// Enroll one student with a 0 on every existing assignment
    AddStudent {
        username: String,
        first_name: String,
        last_name: String,
        advisor: String,
        grad_year: i32,
    },

    /// Change one student's grade on one assignment
    Grade {
        assignment: String,
        username: String,
        #[arg(allow_negative_numbers = true)]
        grade: f64,
    },

    /// Report every grade for one student
    Student { username: String },

    /// Report one assignment with its statistics
    Assignment { name: String },

    /// Report the current grade of every student
    Current {
        /// Output format: text, json, table
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show average, median, min, and max for an assignment
    Stats { assignment: String },
}

fn main() {
    let cli = Cli::parse();

    let config = load_config_from(cli.config.as_deref());
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| GradebookConfig::default().log_filter);
    init_tracing(&log_filter);

    let result = config.and_then(|config| {
        let path = cli.file.unwrap_or_else(|| config.gradebook_path.clone());
        tracing::debug!("using gradebook file {}", path.display());

        match cli.command {
            Commands::Init => commands::init::execute(&path),
            Commands::Show { format } => commands::show::execute(&path, &format),
            Commands::Import { inputs } => {
                commands::import::execute(&path, &inputs, config.autosave)
            }
            Commands::AddAssignment {
                name,
                total_points,
                percent_of_grade,
            } => commands::add::assignment(
                &path,
                &name,
                total_points,
                percent_of_grade,
                config.autosave,
            ),
            Commands::AddStudent {
                username,
                first_name,
                last_name,
                advisor,
                grad_year,
            } => commands::add::student(
                &path,
                Student::new(username, first_name, last_name, advisor, grad_year),
                config.autosave,
            ),
            Commands::Grade {
                assignment,
                username,
                grade,
            } => commands::grade::execute(&path, &assignment, &username, grade, config.autosave),
            Commands::Student { username } => commands::report::student(&path, &username),
            Commands::Assignment { name } => commands::report::assignment(&path, &name),
            Commands::Current { format } => commands::report::current(&path, &format),
            Commands::Stats { assignment } => commands::stats::execute(&path, &assignment),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
