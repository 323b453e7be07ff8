//! Slash command parsing for the terminal chat

use std::path::PathBuf;

use loan_chat_core::{AgentKind, ParseAgentError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  /agent [name]     switch agent (Master, Sales, KYC, Underwriting, Eligibility, PDF); list agents without a name
  /new              start a new chat
  /health           check backend status
  /letter [path]    fetch the sanction letter (saved as PDF, or shown as a text preview)
  /context [text]   set context sent with every message; clear it without text
  /status           show session state
  /help             show this help
  /quit             exit
Anything else is sent to the active agent.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Agent(AgentKind),
    ListAgents,
    New,
    Health,
    Letter(Option<PathBuf>),
    Context(Option<String>),
    Status,
    Help,
    Quit,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Message(String),
    Command(Command),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '/{0}', try /help")]
    Unknown(String),

    #[error(transparent)]
    Agent(#[from] ParseAgentError),
}

pub fn parse_input(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Input::Message(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    let command = match name.to_lowercase().as_str() {
        "agent" => match arg {
            Some(agent) => Command::Agent(agent.parse()?),
            None => Command::ListAgents,
        },
        "new" => Command::New,
        "health" => Command::Health,
        "letter" => Command::Letter(arg.map(PathBuf::from)),
        "context" => Command::Context(arg.map(str::to_string)),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Input::Command(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_input(line).unwrap() {
            Input::Command(cmd) => cmd,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn test_messages_and_blank_lines() {
        assert_eq!(parse_input("   ").unwrap(), Input::Empty);
        assert_eq!(
            parse_input("  I want a loan of 5 lakh \n").unwrap(),
            Input::Message("I want a loan of 5 lakh".to_string())
        );
    }

    #[test]
    fn test_agent_switch() {
        assert_eq!(command("/agent kyc"), Command::Agent(AgentKind::Kyc));
        assert_eq!(command("/agent  Sales Agent"), Command::Agent(AgentKind::Sales));
        assert_eq!(command("/agent"), Command::ListAgents);
        assert!(matches!(parse_input("/agent banker"), Err(CommandError::Agent(_))));
    }

    #[test]
    fn test_arguments() {
        assert_eq!(
            command("/letter out/letter.pdf"),
            Command::Letter(Some(PathBuf::from("out/letter.pdf")))
        );
        assert_eq!(command("/letter"), Command::Letter(None));
        assert_eq!(
            command("/context salaried,  Pune "),
            Command::Context(Some("salaried,  Pune".to_string()))
        );
        assert_eq!(command("/context"), Command::Context(None));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(command("/new"), Command::New);
        assert_eq!(command("/HEALTH"), Command::Health);
        assert_eq!(command("/status"), Command::Status);
        assert_eq!(command("/help"), Command::Help);
        assert_eq!(command("/exit"), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_input("/transfer 500").unwrap_err();
        assert_eq!(err.to_string(), "unknown command '/transfer', try /help");
    }
}
