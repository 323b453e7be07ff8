//! Loan Chat
//!
//! Terminal front end for the loan advisor agents.
//!
//! Usage:
//!   loan-chat                               # interactive session
//!   loan-chat --agent sales                 # start with the Sales agent
//!   loan-chat --message "I need 5 lakh"     # send one message and exit
//!   loan-chat --config loan-chat.toml --base-url http://localhost:8000

mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use loan_chat_agent::{ChatMessage, ChatSession, LetterPreview};
use loan_chat_client::LoanApiClient;
use loan_chat_config::{LoggingSettings, Settings};
use loan_chat_core::AgentKind;
use loan_chat_persistence::CustomerIdStore;

use commands::{Command, Input, HELP};

#[derive(Parser, Debug)]
#[command(name = "loan-chat", version)]
#[command(about = "Chat with the loan advisor agents from the terminal")]
struct Args {
    /// Settings file (TOML or YAML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Agent to start with (Master, Sales, KYC, Underwriting, Eligibility, PDF)
    #[arg(long, short = 'a')]
    agent: Option<AgentKind>,

    /// Backend base URL, overrides settings
    #[arg(long)]
    base_url: Option<String>,

    /// Send one message, print the reply and exit
    #[arg(long, short = 'm')]
    message: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    if let Some(base_url) = args.base_url {
        settings.api.base_url = base_url;
        settings.validate()?;
    }
    init_tracing(&settings.logging, args.json_logs);

    let customer_id = CustomerIdStore::new(&settings.session.customer_id_path)
        .load_or_create()
        .context("Failed to load customer id")?;
    let client = LoanApiClient::new(&settings.api)?;
    tracing::info!(
        base_url = %client.resolver().base_url(),
        customer_id = %customer_id,
        "Loan chat starting"
    );

    let mut session = ChatSession::new(Arc::new(client), customer_id)
        .with_agent(args.agent.unwrap_or(settings.session.default_agent))
        .with_user_context(settings.session.user_context.clone());

    match args.message {
        Some(message) => one_shot(&mut session, &message).await,
        None => repl(&mut session).await,
    }
}

fn init_tracing(logging: &LoggingSettings, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json || force_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn one_shot(session: &mut ChatSession, message: &str) -> Result<()> {
    let Some(outcome) = session.send(message).await else {
        anyhow::bail!("message is empty");
    };
    print_replies(&outcome.replies);
    match outcome.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

async fn repl(session: &mut ChatSession) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Loan chat - talking to {}. Type /help for commands.", session.active_agent().label());
    loop {
        stdout
            .write_all(format!("[{}] > ", session.active_agent()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse_input(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Message(text)) => {
                if let Some(outcome) = session.send(&text).await {
                    print_replies(&outcome.replies);
                }
            }
            Ok(Input::Command(Command::Quit)) => break,
            Ok(Input::Command(command)) => run_command(session, command).await?,
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

async fn run_command(session: &mut ChatSession, command: Command) -> Result<()> {
    match command {
        Command::Agent(agent) => {
            session.set_active_agent(agent);
            println!("Now talking to {} ({})", agent.label(), agent.description());
        }
        Command::ListAgents => {
            for agent in AgentKind::ALL {
                let marker = if agent == session.active_agent() { "*" } else { " " };
                println!("{} {:<12} {}", marker, agent.key(), agent.description());
            }
        }
        Command::New => {
            session.new_chat();
            println!("Started a new chat.");
        }
        Command::Health => println!("Backend: {}", session.check_backend().await),
        Command::Letter(path) => save_letter(session, path.as_deref()).await?,
        Command::Context(context) => {
            session.set_user_context(context);
            match session.user_context() {
                Some(context) => println!("Context set: {}", context),
                None => println!("Context cleared."),
            }
        }
        Command::Status => print_status(session),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

async fn save_letter(session: &ChatSession, path: Option<&Path>) -> Result<()> {
    match session.preview_letter().await {
        Ok(LetterPreview::Pdf(bytes)) => {
            let default_path;
            let path = match path {
                Some(path) => path,
                None => {
                    let id = session.application_id().unwrap_or("application");
                    default_path = PathBuf::from(format!("sanction-letter-{}.pdf", id));
                    default_path.as_path()
                }
            };
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Saved sanction letter to {} ({} bytes)", path.display(), bytes.len());
        }
        Ok(LetterPreview::Inline { text, reason }) => {
            println!("PDF unavailable ({}). Showing text preview:\n\n{}", reason, text);
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn print_status(session: &ChatSession) {
    let fields = session.known_fields();
    println!("Customer ID:     {}", session.customer_id());
    println!("Agent:           {}", session.active_agent().label());
    println!("Application ID:  {}", session.application_id().unwrap_or("-"));
    println!("Awaiting salary: {}", if session.awaiting_salary() { "yes" } else { "no" });
    println!("Monthly salary:  {}", show(session.detected_monthly_salary()));
    println!("Loan amount:     {}", show(fields.loan_amount));
    println!("Tenure (months): {}", show(fields.tenure_months));
    println!("Context:         {}", session.user_context().unwrap_or("-"));
}

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_replies(replies: &[ChatMessage]) {
    for reply in replies {
        println!("{}: {}\n", reply.agent, reply.content);
    }
}
