use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

const DEFAULT_BRAVE_API_BASE_URL: &str = "https://api.search.brave.com/res/v1";
const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";

#[derive(Parser, Debug)]
#[command(
    name = "research-mcpd",
    version,
    about = "Brave Search and Gemini research MCP daemon."
)]
struct CliArgs {
    #[arg(long, env = "BRAVE_API_KEY")]
    brave_api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,

    #[arg(long, env = "BRAVE_API_BASE_URL", default_value = DEFAULT_BRAVE_API_BASE_URL)]
    brave_api_base_url: String,

    #[arg(long, env = "GEMINI_API_BASE_URL", default_value = DEFAULT_GEMINI_API_BASE_URL)]
    gemini_api_base_url: String,

    #[arg(
        long = "stdio",
        env = "RESEARCH_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "RESEARCH_MCP_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_http_serve: bool,

    #[arg(long, env = "RESEARCH_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct ResearchConfig {
    pub brave_api_key: String,
    pub gemini_api_key: Option<String>,
    pub brave_api_base_url: String,
    pub gemini_api_base_url: String,
    pub enable_stdio: bool,
    pub mcp_http_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl ResearchConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for ResearchConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let brave_api_key = args
            .brave_api_key
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("BRAVE_API_KEY"))?;
        let gemini_api_key = args.gemini_api_key.filter(|value| !value.trim().is_empty());

        if args.brave_api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "BRAVE_API_BASE_URL",
                value: args.brave_api_base_url,
            });
        }
        if args.gemini_api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "GEMINI_API_BASE_URL",
                value: args.gemini_api_base_url,
            });
        }

        if !args.enable_stdio && !args.mcp_http_serve {
            return Err(ConfigError::InvalidSetting {
                name: "RESEARCH_ENABLE_STDIO",
                value: "false (no transport enabled)".to_string(),
            });
        }

        Ok(Self {
            brave_api_key,
            gemini_api_key,
            brave_api_base_url: args.brave_api_base_url,
            gemini_api_base_url: args.gemini_api_base_url,
            enable_stdio: args.enable_stdio,
            mcp_http_serve: args.mcp_http_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}
