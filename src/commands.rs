//! CLI Command Handlers
//!
//! Each API handler makes one call and prints the result through [`Output`].
//! `config` works on the local config file and never touches the network.
//! Handlers return an [`ExitCode`]; they never panic on API failures.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::api::ApiClient;
use crate::cli::{
    AdminCmd, AdminContentCmd, AdminUsersCmd, BrowseCmd, Cli, Command, CommentCmd, CommentsCmd,
    ConfigCmd, EpisodesCmd, ExitCode, FavoritesCmd, GenreCmd, LoginCmd, NotificationsCmd, Output,
    PageArgs, ProgressCmd, RateCmd, RegisterCmd, SearchCmd, StatusOk,
};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AdminContentQuery, AuthResponse, ContentQuery, GenreDraft, LoginRequest, NotificationQuery,
    PageQuery, RegisterRequest, User, UserQuery, WatchProgress,
};
use crate::session::FileTokenStore;

/// Session summary printed after login/registration (the token itself is not echoed)
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: User,
}

/// Settings the CLI would use right now
#[derive(Debug, Serialize)]
pub struct ConfigInfo {
    pub config_file: Option<PathBuf>,
    pub base_url: String,
    pub token_file: PathBuf,
}

impl From<PageArgs> for PageQuery {
    fn from(p: PageArgs) -> Self {
        PageQuery {
            page: p.page,
            per_page: p.per_page,
        }
    }
}

/// Build the client for a CLI invocation: `--base-url` beats env and config
pub fn client_for(cli: &Cli) -> ApiClient {
    let config = load_config(cli.config.as_deref());
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.resolve_base_url());
    ApiClient::with_store(base_url, FileTokenStore::new(config.resolve_token_path()))
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print a result or report its error
fn emit<T: Serialize>(output: &Output, result: Result<T>, context: &str) -> ExitCode {
    match result {
        Ok(data) => {
            if let Err(e) = output.print(&data) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.api_error(context, &e),
    }
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    if let Command::Config(cmd) = cli.command {
        return config_cmd(cmd, cli.config.as_deref(), &output);
    }
    let client = client_for(&cli);
    execute(cli.command, &client, &output).await
}

/// Run one command against an existing client
pub async fn execute(command: Command, client: &ApiClient, output: &Output) -> ExitCode {
    match command {
        Command::Login(cmd) => login_cmd(cmd, client, output).await,
        Command::Register(cmd) => register_cmd(cmd, client, output).await,
        Command::Logout => logout_cmd(client, output),
        Command::Whoami => emit(output, client.get_profile().await, "Profile fetch failed"),

        Command::Browse(cmd) => browse_cmd(cmd, client, output).await,
        Command::Info(arg) => emit(
            output,
            client.get_content_detail(arg.id).await,
            "Content fetch failed",
        ),
        Command::Episodes(cmd) => episodes_cmd(cmd, client, output).await,
        Command::Search(cmd) => search_cmd(cmd, client, output).await,
        Command::Genres => emit(output, client.get_genres().await, "Genre fetch failed"),
        Command::Recommendations => emit(
            output,
            client.get_recommendations().await,
            "Recommendations failed",
        ),

        Command::Rate(cmd) => rate_cmd(cmd, client, output).await,
        Command::Comments(cmd) => comments_cmd(cmd, client, output).await,
        Command::Comment(cmd) => comment_cmd(cmd, client, output).await,
        Command::Favorites(cmd) => favorites_cmd(cmd, client, output).await,
        Command::History(page) => emit(
            output,
            client.get_watch_history(&page.into()).await,
            "History fetch failed",
        ),
        Command::Progress(cmd) => progress_cmd(cmd, client, output).await,
        Command::Notifications(cmd) => notifications_cmd(cmd, client, output).await,
        Command::Read(arg) => emit(
            output,
            client.mark_notification_read(arg.id).await,
            "Mark read failed",
        ),

        Command::Admin(cmd) => admin_cmd(cmd, client, output).await,
        Command::Config(cmd) => config_cmd(cmd, None, output),
    }
}

// =============================================================================
// Auth Commands
// =============================================================================

/// Store the token from a successful login/registration and print the user
fn start_session(
    client: &ApiClient,
    output: &Output,
    result: Result<AuthResponse>,
    context: &str,
) -> ExitCode {
    let auth = match result {
        Ok(auth) => auth,
        Err(e) => return output.api_error(context, &e),
    };

    if let Err(e) = client.set_token(Some(&auth.token)) {
        return output.api_error("Could not save session", &e);
    }

    let info = SessionInfo {
        message: auth.message,
        user: auth.user,
    };
    emit(output, Ok(info), context)
}

pub async fn login_cmd(cmd: LoginCmd, client: &ApiClient, output: &Output) -> ExitCode {
    output.info(format!("Logging in as {}...", cmd.username));
    let credentials = LoginRequest {
        username: cmd.username,
        password: cmd.password,
    };
    let result = client.login(&credentials).await;
    start_session(client, output, result, "Login failed")
}

pub async fn register_cmd(cmd: RegisterCmd, client: &ApiClient, output: &Output) -> ExitCode {
    let request = RegisterRequest {
        username: cmd.username,
        email: cmd.email,
        password: cmd.password,
    };
    let result = client.register(&request).await;
    start_session(client, output, result, "Registration failed")
}

pub fn logout_cmd(client: &ApiClient, output: &Output) -> ExitCode {
    match client.logout() {
        Ok(()) => emit(output, Ok(StatusOk::default()), "Logout failed"),
        Err(e) => output.api_error("Logout failed", &e),
    }
}

// =============================================================================
// Catalog Commands
// =============================================================================

pub async fn browse_cmd(cmd: BrowseCmd, client: &ApiClient, output: &Output) -> ExitCode {
    let query = ContentQuery {
        content_type: cmd.content_type.map(Into::into),
        genre_id: cmd.genre,
        search: cmd.search.clone(),
        sort_by: cmd.sort.map(Into::into),
        order: cmd.order(),
        featured: cmd.featured.then_some(true),
        page: cmd.page.page,
        per_page: cmd.page.per_page,
    };
    emit(output, client.get_content(&query).await, "Browse failed")
}

pub async fn episodes_cmd(cmd: EpisodesCmd, client: &ApiClient, output: &Output) -> ExitCode {
    emit(
        output,
        client.get_episodes(cmd.series_id, cmd.season).await,
        "Episode fetch failed",
    )
}

pub async fn search_cmd(cmd: SearchCmd, client: &ApiClient, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query is required", ExitCode::InvalidArgs);
    }
    output.info(format!("Searching for: {}", cmd.query));

    let result = client.search_content(&cmd.query).await.map(|mut results| {
        results.truncate(cmd.limit);
        results
    });
    emit(output, result, "Search failed")
}

// =============================================================================
// Interaction Commands
// =============================================================================

pub async fn rate_cmd(cmd: RateCmd, client: &ApiClient, output: &Output) -> ExitCode {
    emit(
        output,
        client.rate_content(cmd.content_id, cmd.score).await,
        "Rating failed",
    )
}

pub async fn comments_cmd(cmd: CommentsCmd, client: &ApiClient, output: &Output) -> ExitCode {
    emit(
        output,
        client.get_comments(cmd.content_id, &cmd.page.into()).await,
        "Comment fetch failed",
    )
}

pub async fn comment_cmd(cmd: CommentCmd, client: &ApiClient, output: &Output) -> ExitCode {
    if cmd.text.trim().is_empty() {
        return output.error("Comment cannot be empty", ExitCode::InvalidArgs);
    }
    emit(
        output,
        client
            .add_comment(cmd.content_id, &cmd.text, cmd.reply_to)
            .await,
        "Comment failed",
    )
}

pub async fn favorites_cmd(cmd: FavoritesCmd, client: &ApiClient, output: &Output) -> ExitCode {
    match cmd {
        FavoritesCmd::List(page) => emit(
            output,
            client.get_favorites(&page.into()).await,
            "Favorites fetch failed",
        ),
        FavoritesCmd::Add(arg) => emit(
            output,
            client.add_to_favorites(arg.id).await,
            "Add favorite failed",
        ),
        FavoritesCmd::Remove(arg) => emit(
            output,
            client.remove_from_favorites(arg.id).await,
            "Remove favorite failed",
        ),
        FavoritesCmd::Check(arg) => emit(
            output,
            client.check_favorite(arg.id).await,
            "Favorite check failed",
        ),
    }
}

pub async fn progress_cmd(cmd: ProgressCmd, client: &ApiClient, output: &Output) -> ExitCode {
    if cmd.total_time == 0 {
        return output.error("total_time must be positive", ExitCode::InvalidArgs);
    }
    let progress = WatchProgress {
        content_id: cmd.content_id,
        episode_id: cmd.episode,
        watch_time: cmd.watch_time,
        total_time: cmd.total_time,
    };
    emit(
        output,
        client.update_watch_history(&progress).await,
        "Progress update failed",
    )
}

pub async fn notifications_cmd(
    cmd: NotificationsCmd,
    client: &ApiClient,
    output: &Output,
) -> ExitCode {
    let query = NotificationQuery {
        page: cmd.page.page,
        per_page: cmd.page.per_page,
        unread_only: cmd.unread.then_some(true),
    };
    emit(
        output,
        client.get_notifications(&query).await,
        "Notification fetch failed",
    )
}

// =============================================================================
// Admin Commands
// =============================================================================

pub async fn admin_cmd(cmd: AdminCmd, client: &ApiClient, output: &Output) -> ExitCode {
    match cmd {
        AdminCmd::Stats => emit(
            output,
            client.get_dashboard_stats().await,
            "Stats fetch failed",
        ),
        AdminCmd::Users(cmd) => admin_users_cmd(cmd, client, output).await,
        AdminCmd::User(arg) => emit(
            output,
            client.get_user_detail(arg.id).await,
            "User fetch failed",
        ),
        AdminCmd::ToggleUser(arg) => emit(
            output,
            client.toggle_user_status(arg.id).await,
            "User status toggle failed",
        ),
        AdminCmd::Promote(arg) => emit(
            output,
            client.make_user_admin(arg.id).await,
            "Promotion failed",
        ),
        AdminCmd::Content(cmd) => admin_content_cmd(cmd, client, output).await,
        AdminCmd::ToggleContent(arg) => emit(
            output,
            client.toggle_content_status(arg.id).await,
            "Content status toggle failed",
        ),
        AdminCmd::Feature(arg) => emit(
            output,
            client.toggle_content_featured(arg.id).await,
            "Feature toggle failed",
        ),
        AdminCmd::DeleteContent(arg) => emit(
            output,
            client.delete_content(arg.id).await,
            "Delete failed",
        ),
        AdminCmd::Genre(cmd) => genre_cmd(cmd, client, output).await,
    }
}

async fn admin_users_cmd(cmd: AdminUsersCmd, client: &ApiClient, output: &Output) -> ExitCode {
    let query = UserQuery {
        page: cmd.page.page,
        per_page: cmd.page.per_page,
        search: cmd.search,
        status: cmd.status.map(Into::into),
    };
    emit(output, client.get_users(&query).await, "User list failed")
}

async fn admin_content_cmd(cmd: AdminContentCmd, client: &ApiClient, output: &Output) -> ExitCode {
    let query = AdminContentQuery {
        page: cmd.page.page,
        per_page: cmd.page.per_page,
        content_type: cmd.content_type.map(Into::into),
        status: cmd.status.map(Into::into),
        search: cmd.search,
    };
    emit(
        output,
        client.get_all_content(&query).await,
        "Content list failed",
    )
}

async fn genre_cmd(cmd: GenreCmd, client: &ApiClient, output: &Output) -> ExitCode {
    let draft = GenreDraft {
        name: cmd.name,
        description: cmd.description,
    };
    emit(output, client.create_genre(&draft).await, "Genre create failed")
}

// =============================================================================
// Config Commands
// =============================================================================

/// Show or update the config file at `path` (default location when `None`)
pub fn config_cmd(cmd: ConfigCmd, path: Option<&Path>, output: &Output) -> ExitCode {
    let mut config = load_config(path);
    match cmd {
        ConfigCmd::Show => {
            let info = ConfigInfo {
                config_file: path.map(Path::to_path_buf).or_else(Config::path),
                base_url: config.resolve_base_url(),
                token_file: config.resolve_token_path(),
            };
            emit(output, Ok(info), "Config failed")
        }
        ConfigCmd::SetUrl(arg) => {
            let url = arg.url.trim();
            if url.is_empty() {
                return output.error("Base URL cannot be empty", ExitCode::InvalidArgs);
            }
            config.base_url = Some(url.to_string());

            let saved = match path {
                Some(path) => config.save_to(path),
                None => config.save(),
            };
            match saved {
                Ok(()) => emit(output, Ok(StatusOk::default()), "Config failed"),
                Err(e) => output.error(format!("Could not save config: {:#}", e), ExitCode::Error),
            }
        }
    }
}
