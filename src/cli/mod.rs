//! Catalog CLI commands.
//!
//! Commands for listing and invoking tools, prompts and resources from a
//! shell. Results are printed to stdout as JSON; logs go to stderr.

use anyhow::Context;
use clap::Subcommand;

use crate::config::SevenRoomsConfig;
use crate::context::CallContext;
use crate::error::ConfigError;
use crate::prompts::PromptArgs;
use crate::server::ReservationServer;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List tools and their parameter schemas
    Tools,

    /// Call a tool
    Call {
        /// Tool name (e.g., "find_available_time")
        tool: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List prompts and their arguments
    Prompts,

    /// Render a prompt
    Prompt {
        /// Prompt name (e.g., "check_availability")
        name: String,

        /// Arguments as a JSON object of strings
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List resource templates
    Resources,

    /// Read a resource (e.g., "reservation://Jardin/2025-06-01/19:00/2")
    Read { uri: String },
}

impl Command {
    /// Whether the command reaches SevenRooms.
    pub fn needs_upstream(&self) -> bool {
        matches!(self, Command::Call { .. } | Command::Read { .. })
    }
}

/// Load connection settings for a command.
///
/// Listing and prompt rendering work without credentials; only commands
/// that reach SevenRooms fail on missing variables.
pub fn load_config<F>(cmd: &Command, lookup: F) -> Result<SevenRoomsConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match SevenRoomsConfig::from_lookup(lookup) {
        Err(ConfigError::MissingEnv(missing)) if !cmd.needs_upstream() => {
            tracing::debug!(?missing, "SevenRooms not configured, running offline");
            Ok(SevenRoomsConfig::new("", "", ""))
        }
        result => result,
    }
}

/// Run a catalog command.
pub async fn run_command(server: &ReservationServer, cmd: Command) -> anyhow::Result<()> {
    let output = match cmd {
        Command::Tools => serde_json::to_value(server.list_tools())?,
        Command::Call { tool, args } => {
            let args = parse_object(&args)?;
            if server.tool_requires_approval(&tool) == Some(true) {
                tracing::info!(tool = %tool, "Tool changes a reservation");
            }
            let output = server
                .call_tool(&tool, args, &CallContext::new())
                .await
                .with_context(|| format!("tool '{}' failed", tool))?;
            output.result
        }
        Command::Prompts => serde_json::to_value(server.list_prompts())?,
        Command::Prompt { name, args } => {
            let args = parse_prompt_args(&args)?;
            serde_json::to_value(server.get_prompt(&name, &args)?)?
        }
        Command::Resources => serde_json::to_value(server.list_resource_templates())?,
        Command::Read { uri } => serde_json::to_value(server.read_resource(&uri).await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_object(raw: &str) -> anyhow::Result<serde_json::Value> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("--args must be valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--args must be a JSON object");
    }
    Ok(value)
}

/// Prompt arguments are strings; numbers and booleans are accepted and stringified.
fn parse_prompt_args(raw: &str) -> anyhow::Result<PromptArgs> {
    let value = parse_object(raw)?;
    let mut args = PromptArgs::new();
    if let serde_json::Value::Object(map) = value {
        for (key, value) in map {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => anyhow::bail!("argument '{}' must be a string, got {}", key, other),
            };
            args.insert(key, text);
        }
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use crate::config::{ENV_BASE, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_TIMEOUT_SECS};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn call_command() -> Command {
        Command::Call {
            tool: "list_reservation".to_string(),
            args: "{}".to_string(),
        }
    }

    #[test]
    fn test_offline_commands_load_without_credentials() {
        for cmd in [
            Command::Tools,
            Command::Prompts,
            Command::Resources,
            Command::Prompt {
                name: "browse_restaurants".to_string(),
                args: "{}".to_string(),
            },
        ] {
            let config = load_config(&cmd, no_env).unwrap();
            assert!(config.base_url.is_empty());
        }
    }

    #[test]
    fn test_upstream_commands_require_credentials() {
        let read = Command::Read {
            uri: "reservation://Jardin/2025-06-01/19:00/2".to_string(),
        };
        for cmd in [call_command(), read] {
            match load_config(&cmd, no_env).unwrap_err() {
                ConfigError::MissingEnv(missing) => {
                    assert_eq!(missing, vec![ENV_BASE, ENV_CLIENT_ID, ENV_CLIENT_SECRET]);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    fn env_with_timeout(timeout: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| match key {
            ENV_BASE => Some("https://api.example.com/".to_string()),
            ENV_CLIENT_ID => Some("client".to_string()),
            ENV_CLIENT_SECRET => Some("secret".to_string()),
            ENV_TIMEOUT_SECS => Some(timeout.to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_configured_values_pass_through() {
        let config = load_config(&call_command(), env_with_timeout("10")).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");

        // A malformed value is still an error for offline commands.
        let err = load_config(&Command::Tools, env_with_timeout("soon")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_listing_runs_without_credentials() {
        let config = load_config(&Command::Tools, no_env).unwrap();
        let server = ReservationServer::from_config(config);
        run_command(&server, Command::Tools).await.unwrap();
        run_command(&server, Command::Resources).await.unwrap();
    }

    #[test]
    fn test_parse_object() {
        assert!(parse_object(r#"{"a": 1}"#).is_ok());
        assert!(parse_object("[1]").is_err());
        assert!(parse_object("nope").is_err());
    }

    #[test]
    fn test_parse_prompt_args() {
        let args = parse_prompt_args(r#"{"restaurant": "Jardin", "party": 2, "skip": null}"#)
            .unwrap();
        assert_eq!(args.get("restaurant").map(String::as_str), Some("Jardin"));
        assert_eq!(args.get("party").map(String::as_str), Some("2"));
        assert!(!args.contains_key("skip"));
        assert!(parse_prompt_args(r#"{"x": [1]}"#).is_err());
    }
}
