//! Servifix notification CLI.
//!
//! Composes the notification service over an on-disk SQLite database and
//! prints each result envelope as JSON.
//!
//! ```sh
//! servifix account add alice
//! servifix create --title Maintenance --content Pipes --date 2030-01-02 --account 1
//! servifix get 1
//! servifix delete 1
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;

use servifix_core::db::open_db;
use servifix_core::{
    default_log_level, init_logging, ApiResponse, DuplicateCheck, NotificationId,
    NotificationRequest, NotificationService, RepoError, ServiceConfig, SqliteAccountRepository,
    SqliteNotificationRepository,
};

#[derive(Parser, Debug)]
#[command(name = "servifix", version, about = "Manage account notifications")]
struct Cli {
    /// SQLite database file, created and migrated on first use.
    #[arg(long, env = "SERVIFIX_DB", default_value = "servifix.db")]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "SERVIFIX_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "SERVIFIX_LOG_DIR")]
    log_dir: Option<String>,

    /// Duplicate rule predicate (legacy, account_scoped).
    #[arg(long, env = "SERVIFIX_DUPLICATE_CHECK", default_value_t = DuplicateCheck::AccountScoped)]
    duplicate_check: DuplicateCheck,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Account administration.
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },
    /// Fetch one notification.
    Get { id: NotificationId },
    /// Create a notification.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Effective date, `YYYY-MM-DD`; must be after today.
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "account")]
        account_id: i64,
    },
    /// Delete a notification. Succeeds even if the id does not exist.
    Delete { id: NotificationId },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    /// Register an account.
    Add { username: String },
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref())?;
    debug!(
        "event=cli_start module=cli status=ok version={}",
        servifix_core::core_version()
    );

    let conn = open_db(&cli.db)?;
    let config = ServiceConfig {
        duplicate_check: cli.duplicate_check,
    };

    let success = match cli.command {
        Command::Account {
            command: AccountCommand::Add { username },
        } => {
            let account = SqliteAccountRepository::try_new(&conn)?.insert_account(&username)?;
            print_json(&account)?;
            true
        }
        Command::Get { id } => {
            let service = build_service(&conn, config)?;
            print_envelope(&service.get_notification_by_id(id))?
        }
        Command::Create {
            title,
            content,
            date,
            account_id,
        } => {
            let request = NotificationRequest {
                title,
                content,
                date,
                account_id,
            };
            let service = build_service(&conn, config)?;
            print_envelope(&service.create_notification(&request))?
        }
        Command::Delete { id } => {
            let service = build_service(&conn, config)?;
            print_envelope(&service.delete_notification(id))?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

type CliService<'conn> =
    NotificationService<SqliteNotificationRepository<'conn>, SqliteAccountRepository<'conn>>;

fn build_service(conn: &Connection, config: ServiceConfig) -> Result<CliService<'_>, RepoError> {
    Ok(NotificationService::new(
        SqliteNotificationRepository::try_new(conn)?,
        SqliteAccountRepository::try_new(conn)?,
        config,
    ))
}

fn print_envelope<T: Serialize>(response: &ApiResponse<T>) -> Result<bool, Box<dyn Error>> {
    print_json(response)?;
    Ok(response.is_success())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
