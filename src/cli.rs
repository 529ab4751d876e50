//! CLI - Command Line Interface for StreamHub
//!
//! Every command is one API call (login/register also persist the token).
//! All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! streamhub login neo --password 'Matrix123'
//! streamhub browse --type movie --per-page 8
//! streamhub info 42 --json
//! streamhub favorites add 42
//! streamhub admin stats
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::ApiError;
use crate::models::{ContentType, SortBy, SortOrder, StatusFilter};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error or server failure
    NetworkError = 3,
    /// Missing, expired or insufficient credentials
    Unauthorized = 4,
    /// Resource not found
    NotFound = 5,
}

impl ExitCode {
    /// Map an API failure to the exit code a script should see
    pub fn from_api_error(err: &ApiError) -> Self {
        match err.status() {
            Some(401) | Some(403) => ExitCode::Unauthorized,
            Some(404) => ExitCode::NotFound,
            Some(400) | Some(409) => ExitCode::InvalidArgs,
            _ => match err {
                ApiError::InvalidRequest(_) => ExitCode::InvalidArgs,
                ApiError::Storage(_) => ExitCode::Error,
                _ => ExitCode::NetworkError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// StreamHub - browse and manage a streaming catalog from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "streamhub",
    version,
    about = "Client for the StreamHub streaming API",
    long_about = "Browse the StreamHub catalog, manage favorites and watch \
                  history, and run admin operations against the REST API.",
    after_help = "EXAMPLES:\n\
                  streamhub login neo -p Matrix123      Log in and keep the session\n\
                  streamhub browse -t movie --per-page 8 List movies\n\
                  streamhub info 42 --json               Content detail as JSON\n\
                  streamhub admin stats                  Dashboard statistics"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and STREAMHUB_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginCmd),

    /// Create an account and store the session token
    Register(RegisterCmd),

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user's profile
    Whoami,

    /// List catalog content
    #[command(visible_alias = "ls")]
    Browse(BrowseCmd),

    /// Get details for a movie or series
    #[command(visible_alias = "i")]
    Info(IdArg),

    /// List episodes of a series
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),

    /// Search content by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List genres
    Genres,

    /// Personal recommendations
    #[command(visible_alias = "rec")]
    Recommendations,

    /// Rate content from 1 to 10
    Rate(RateCmd),

    /// List comments on content
    Comments(CommentsCmd),

    /// Post a comment or reply
    Comment(CommentCmd),

    /// Manage favorites
    #[command(visible_alias = "fav", subcommand)]
    Favorites(FavoritesCmd),

    /// Show watch history
    History(PageArgs),

    /// Report playback progress
    Progress(ProgressCmd),

    /// List notifications
    #[command(visible_alias = "notif")]
    Notifications(NotificationsCmd),

    /// Mark a notification as read
    Read(IdArg),

    /// Administrative operations
    #[command(subcommand)]
    Admin(AdminCmd),

    /// Show or change local settings
    #[command(subcommand)]
    Config(ConfigCmd),
}

// =============================================================================
// Shared Arguments
// =============================================================================

/// Single numeric id
#[derive(Args, Debug)]
pub struct IdArg {
    /// Numeric id
    #[arg(required = true)]
    pub id: u64,
}

/// Pagination flags
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,
}

// =============================================================================
// Auth Commands
// =============================================================================

#[derive(Args, Debug)]
pub struct LoginCmd {
    /// Username or email
    #[arg(required = true)]
    pub username: String,

    /// Password
    #[arg(long, short = 'p', required = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterCmd {
    #[arg(required = true)]
    pub username: String,

    #[arg(required = true)]
    pub email: String,

    /// Password (8+ chars, upper, lower and digit)
    #[arg(long, short = 'p', required = true)]
    pub password: String,
}

// =============================================================================
// Catalog Commands
// =============================================================================

/// Content kind filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Movie,
    Series,
}

impl From<TypeFilter> for ContentType {
    fn from(t: TypeFilter) -> Self {
        match t {
            TypeFilter::Movie => ContentType::Movie,
            TypeFilter::Series => ContentType::Series,
        }
    }
}

/// Sort key for browse
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseSort {
    /// Newest first (default)
    #[default]
    Created,
    Rating,
    Views,
    Title,
}

impl From<BrowseSort> for SortBy {
    fn from(s: BrowseSort) -> Self {
        match s {
            BrowseSort::Created => SortBy::CreatedAt,
            BrowseSort::Rating => SortBy::Rating,
            BrowseSort::Views => SortBy::ViewCount,
            BrowseSort::Title => SortBy::Title,
        }
    }
}

#[derive(Args, Debug)]
pub struct BrowseCmd {
    /// Filter by content type
    #[arg(long = "type", short = 't', value_enum)]
    pub content_type: Option<TypeFilter>,

    /// Filter by genre id
    #[arg(long, short = 'g')]
    pub genre: Option<u64>,

    /// Title filter
    #[arg(long)]
    pub search: Option<String>,

    /// Sort criterion
    #[arg(long, value_enum)]
    pub sort: Option<BrowseSort>,

    /// Ascending order (default is descending)
    #[arg(long)]
    pub asc: bool,

    /// Only featured content
    #[arg(long, short = 'f')]
    pub featured: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

impl BrowseCmd {
    pub fn order(&self) -> Option<SortOrder> {
        self.asc.then_some(SortOrder::Asc)
    }
}

#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// Series id
    #[arg(required = true)]
    pub series_id: u64,

    /// Only this season
    #[arg(long, short = 's')]
    pub season: Option<u32>,
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, description, director, cast)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

// =============================================================================
// Interaction Commands
// =============================================================================

#[derive(Args, Debug)]
pub struct RateCmd {
    /// Content id
    #[arg(required = true)]
    pub content_id: u64,

    /// Score from 1 to 10
    #[arg(required = true, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub score: u8,
}

#[derive(Args, Debug)]
pub struct CommentsCmd {
    /// Content id
    #[arg(required = true)]
    pub content_id: u64,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct CommentCmd {
    /// Content id
    #[arg(required = true)]
    pub content_id: u64,

    /// Comment text
    #[arg(required = true)]
    pub text: String,

    /// Reply to this comment id
    #[arg(long, short = 'r')]
    pub reply_to: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCmd {
    /// List favorites
    List(PageArgs),
    /// Add content to favorites
    Add(IdArg),
    /// Remove content from favorites
    #[command(visible_alias = "rm")]
    Remove(IdArg),
    /// Check whether content is a favorite
    Check(IdArg),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Print the resolved base URL and file locations
    Show,
    /// Save the API base URL to the config file
    SetUrl(UrlArg),
}

#[derive(Args, Debug)]
pub struct UrlArg {
    /// Base URL including the /api prefix
    #[arg(required = true)]
    pub url: String,
}

#[derive(Args, Debug)]
pub struct ProgressCmd {
    /// Content id
    #[arg(required = true)]
    pub content_id: u64,

    /// Seconds watched
    #[arg(required = true)]
    pub watch_time: u32,

    /// Total seconds
    #[arg(required = true)]
    pub total_time: u32,

    /// Episode id (series only)
    #[arg(long, short = 'e')]
    pub episode: Option<u64>,
}

#[derive(Args, Debug)]
pub struct NotificationsCmd {
    /// Only unread notifications
    #[arg(long, short = 'u')]
    pub unread: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

// =============================================================================
// Admin Commands
// =============================================================================

/// Active/inactive filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for StatusFilter {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Active => StatusFilter::Active,
            StatusArg::Inactive => StatusFilter::Inactive,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCmd {
    /// Dashboard statistics
    Stats,
    /// List users
    Users(AdminUsersCmd),
    /// User detail with activity counters
    User(IdArg),
    /// Activate or deactivate a user
    ToggleUser(IdArg),
    /// Promote a user to admin
    Promote(IdArg),
    /// List all content, including inactive
    Content(AdminContentCmd),
    /// Activate or deactivate content
    ToggleContent(IdArg),
    /// Feature or unfeature content
    Feature(IdArg),
    /// Delete content
    DeleteContent(IdArg),
    /// Create a genre
    Genre(GenreCmd),
}

#[derive(Args, Debug)]
pub struct AdminUsersCmd {
    /// Username or email filter
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct AdminContentCmd {
    #[arg(long = "type", short = 't', value_enum)]
    pub content_type: Option<TypeFilter>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    #[arg(long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct GenreCmd {
    #[arg(required = true)]
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

// =============================================================================
// Output
// =============================================================================

/// Envelope printed in JSON mode: `{"data": ...}` or `{"error": ..., "exit_code": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status of a rejected API call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default)]
    pub exit_code: i32,
}

impl<T> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: None,
            exit_code: ExitCode::Success.into(),
        }
    }

    pub fn failure(msg: impl Into<String>, code: ExitCode, status: Option<u16>) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            status,
            exit_code: code.into(),
        }
    }
}

/// Acknowledgement for commands with nothing else to report (logout)
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOk {
    pub status: String,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Where command results go: pretty JSON on stdout, errors and progress on stderr
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print a result, wrapped in the envelope in JSON mode
    pub fn print<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        let text = if self.json {
            serde_json::to_string_pretty(&JsonOutput::success(data))?
        } else {
            serde_json::to_string_pretty(data)?
        };
        println!("{}", text);
        Ok(())
    }

    /// Report a failure and hand back its exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        self.report(msg.into(), code, None)
    }

    /// Report a failed API call as `<context>: <message>`
    pub fn api_error(&self, context: &str, err: &ApiError) -> ExitCode {
        let code = ExitCode::from_api_error(err);
        self.report(format!("{}: {}", context, err), code, err.status())
    }

    fn report(&self, msg: String, code: ExitCode, status: Option<u16>) -> ExitCode {
        if self.json {
            let envelope = JsonOutput::<()>::failure(msg, code, status);
            match serde_json::to_string_pretty(&envelope) {
                Ok(text) => eprintln!("{}", text),
                Err(e) => tracing::error!(error = %e, "could not encode error envelope"),
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Progress note on stderr; silent in quiet or JSON mode
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Unauthorized), 4);
        assert_eq!(i32::from(ExitCode::NotFound), 5);
    }

    #[test]
    fn test_exit_code_from_api_error() {
        let unauthorized = ApiError::Http {
            status: 401,
            message: "Token is missing".into(),
        };
        assert_eq!(ExitCode::from_api_error(&unauthorized), ExitCode::Unauthorized);

        let missing = ApiError::Http {
            status: 404,
            message: "Content not found".into(),
        };
        assert_eq!(ExitCode::from_api_error(&missing), ExitCode::NotFound);

        let server = ApiError::Http {
            status: 500,
            message: "API request failed".into(),
        };
        assert_eq!(ExitCode::from_api_error(&server), ExitCode::NetworkError);

        let storage = ApiError::Storage("read-only".into());
        assert_eq!(ExitCode::from_api_error(&storage), ExitCode::Error);
    }

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2, 3], "exit_code": 0}));
    }

    #[test]
    fn test_json_output_failure() {
        let output = JsonOutput::<()>::failure("Info failed: Not found", ExitCode::NotFound, Some(404));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Info failed: Not found", "status": 404, "exit_code": 5})
        );
    }

    #[test]
    fn test_api_error_reports_mapped_code() {
        let output = Output {
            json: false,
            quiet: true,
        };
        let err = ApiError::Http {
            status: 403,
            message: "Admin access required".into(),
        };
        assert_eq!(output.api_error("Stats fetch failed", &err), ExitCode::Unauthorized);
    }

    #[test]
    fn test_browse_order() {
        let cli = Cli::parse_from(["streamhub", "browse", "--asc"]);
        match cli.command {
            Command::Browse(cmd) => assert_eq!(cmd.order(), Some(SortOrder::Asc)),
            _ => panic!("Expected Browse command"),
        }
    }
}
