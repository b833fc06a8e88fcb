//! Terminal front end for the student-admin API.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use student_admin::client::{
    ApiClient, Dashboard, LoginForm, NoticeLevel, Outcome, RegisterForm, SessionStore, StudentForm,
    View, DEFAULT_BASE_URL,
};
use student_admin::models::StudentStatus;
use student_admin::telemetry::init_cli_telemetry;
use student_admin::validators::password_strength;

#[derive(Parser)]
#[command(name = "sa-client")]
#[command(about = "Student admin client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the backend
    #[arg(long, global = true, env = "BACKEND_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the session token is kept
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Show the student list
    Dashboard,

    /// Add a student, then show the refreshed list
    AddStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        course: String,
        /// active or inactive
        #[arg(long, default_value = "active")]
        status: StudentStatus,
    },

    /// Forget the stored session token
    Logout,

    /// Invalidate every token issued to this account, then log out
    LogoutAll,

    /// Show the logged-in account
    Whoami,

    /// Rate a password the way the register form does
    Strength { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_telemetry(cli.verbose);

    let session = match cli.session_file {
        Some(path) => SessionStore::new(path),
        None => SessionStore::new(SessionStore::default_path()?),
    };

    let mut api = ApiClient::new(&cli.base_url, Duration::from_secs(cli.timeout))?;
    if let Some(token) = session
        .load()
        .with_context(|| format!("Reading session from {}", session.path().display()))?
    {
        api.set_token(Some(token));
    }

    let outcome = match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => {
            if let Some(view) = RegisterForm::on_enter(&session)? {
                report(&Outcome::default().navigate(view));
                return Ok(());
            }
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password: confirm,
            };
            if let Some(strength) = form.strength() {
                println!("Password strength: {}", strength);
            }
            form.submit(&api).await
        }
        Commands::Login { email, password } => {
            LoginForm { email, password }
                .submit(&mut api, &session)
                .await
        }
        Commands::Dashboard => {
            let mut dashboard = Dashboard::new();
            let outcome = dashboard.mount(&api).await;
            if !outcome.is_error() {
                print!("{}", dashboard.render_table());
            }
            outcome
        }
        Commands::AddStudent {
            name,
            email,
            course,
            status,
        } => {
            let mut dashboard = Dashboard::new();
            let mounted = dashboard.mount(&api).await;
            if mounted.is_error() {
                mounted
            } else {
                dashboard.form = StudentForm {
                    name,
                    email,
                    course,
                    status,
                };
                let outcome = dashboard.add_student(&api).await;
                print!("{}", dashboard.render_table());
                outcome
            }
        }
        Commands::Logout => Dashboard::new().logout(&mut api, &session),
        Commands::LogoutAll => {
            api.logout_all()
                .await
                .context("Failed to revoke tokens")?;
            Dashboard::new().logout(&mut api, &session)
        }
        Commands::Whoami => {
            let user = api.me().await.context("Not logged in")?;
            println!("{} <{}>", user.name.as_deref().unwrap_or("(no name)"), user.email);
            Outcome::default()
        }
        Commands::Strength { password } => {
            println!("{}", password_strength(&password));
            Outcome::default()
        }
    };

    report(&outcome);

    if outcome.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn report(outcome: &Outcome) {
    if let Some(notice) = &outcome.notice {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }

    if let Some(view) = outcome.navigate_to {
        let hint = match view {
            View::Login => "sa-client login --email <EMAIL> --password <PASSWORD>",
            View::Register => "sa-client register --email <EMAIL> --password <PASSWORD> --confirm <PASSWORD>",
            View::Dashboard => "sa-client dashboard",
        };
        println!("next: {}", hint);
    }
}
