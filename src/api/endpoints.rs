//! Endpoint table
//!
//! Every remote operation the client knows about, as data: method, path
//! template, whether it carries a JSON body, and who may call it. The
//! catalog methods on [`ApiClient`](super::ApiClient) are one-line bindings
//! over these entries.

use std::fmt;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Who the server accepts on an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Public,
    User,
    Admin,
}

/// One remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL; `{...}` segments are filled by [`Endpoint::render`]
    pub path: &'static str,
    pub body: bool,
    pub auth: Auth,
}

impl Endpoint {
    const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        body: bool,
        auth: Auth,
    ) -> Self {
        Self {
            name,
            method,
            path,
            body,
            auth,
        }
    }

    /// Number of `{...}` placeholders in the path
    pub fn arity(&self) -> usize {
        self.path.matches('{').count()
    }

    pub fn requires_auth(&self) -> bool {
        self.auth != Auth::Public
    }

    /// Fill path placeholders with ids, in order.
    ///
    /// Placeholders without a matching id are left as-is.
    pub fn render(&self, ids: &[u64]) -> String {
        debug_assert_eq!(ids.len(), self.arity(), "wrong id count for {}", self.name);

        let mut out = String::with_capacity(self.path.len() + ids.len() * 4);
        let mut ids = ids.iter();
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&rest[..start]);
            match ids.next() {
                Some(id) => out.push_str(&id.to_string()),
                None => out.push_str(&rest[start..=start + len]),
            }
            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);
        out
    }
}

use Auth::{Admin, Public, User};
use HttpMethod::{Delete, Get, Post, Put};

// =============================================================================
// Auth
// =============================================================================

pub const REGISTER: Endpoint = Endpoint::new("register", Post, "/auth/register", true, Public);
pub const LOGIN: Endpoint = Endpoint::new("login", Post, "/auth/login", true, Public);
pub const GET_PROFILE: Endpoint = Endpoint::new("get_profile", Get, "/auth/profile", false, User);
pub const UPDATE_PROFILE: Endpoint =
    Endpoint::new("update_profile", Put, "/auth/profile", true, User);
pub const CHANGE_PASSWORD: Endpoint =
    Endpoint::new("change_password", Post, "/auth/change-password", true, User);
pub const VERIFY_TOKEN: Endpoint =
    Endpoint::new("verify_token", Post, "/auth/verify-token", true, Public);

// =============================================================================
// Content
// =============================================================================

pub const LIST_CONTENT: Endpoint = Endpoint::new("get_content", Get, "/content", false, Public);
pub const CONTENT_DETAIL: Endpoint =
    Endpoint::new("get_content_detail", Get, "/content/{id}", false, Public);
pub const LIST_EPISODES: Endpoint =
    Endpoint::new("get_episodes", Get, "/content/{id}/episodes", false, Public);
pub const SEARCH: Endpoint = Endpoint::new("search_content", Get, "/search", false, Public);
pub const RECOMMENDATIONS: Endpoint =
    Endpoint::new("get_recommendations", Get, "/recommendations", false, User);
pub const LIST_GENRES: Endpoint = Endpoint::new("get_genres", Get, "/genres", false, Public);

// =============================================================================
// Interactions
// =============================================================================

pub const RATE_CONTENT: Endpoint =
    Endpoint::new("rate_content", Post, "/content/{id}/rating", true, User);
pub const USER_RATING: Endpoint =
    Endpoint::new("get_user_rating", Get, "/content/{id}/rating", false, User);
pub const CONTENT_RATINGS: Endpoint =
    Endpoint::new("get_content_ratings", Get, "/content/{id}/ratings", false, Public);
pub const ADD_COMMENT: Endpoint =
    Endpoint::new("add_comment", Post, "/content/{id}/comments", true, User);
pub const LIST_COMMENTS: Endpoint =
    Endpoint::new("get_comments", Get, "/content/{id}/comments", false, Public);
pub const UPDATE_COMMENT: Endpoint =
    Endpoint::new("update_comment", Put, "/comments/{id}", true, User);
pub const DELETE_COMMENT: Endpoint =
    Endpoint::new("delete_comment", Delete, "/comments/{id}", false, User);
pub const UPDATE_WATCH_HISTORY: Endpoint =
    Endpoint::new("update_watch_history", Post, "/watch-history", true, User);
pub const WATCH_HISTORY: Endpoint =
    Endpoint::new("get_watch_history", Get, "/watch-history", false, User);
pub const ADD_FAVORITE: Endpoint =
    Endpoint::new("add_to_favorites", Post, "/favorites", true, User);
pub const REMOVE_FAVORITE: Endpoint =
    Endpoint::new("remove_from_favorites", Delete, "/favorites/{id}", false, User);
pub const LIST_FAVORITES: Endpoint =
    Endpoint::new("get_favorites", Get, "/favorites", false, User);
pub const CHECK_FAVORITE: Endpoint =
    Endpoint::new("check_favorite", Get, "/favorites/{id}/check", false, User);
pub const LIST_NOTIFICATIONS: Endpoint =
    Endpoint::new("get_notifications", Get, "/notifications", false, User);
pub const MARK_NOTIFICATION_READ: Endpoint = Endpoint::new(
    "mark_notification_read",
    Post,
    "/notifications/{id}/read",
    false,
    User,
);

// =============================================================================
// Admin
// =============================================================================

// Older route name; current servers only answer /admin/dashboard/stats
pub const ADMIN_STATS: Endpoint = Endpoint::new("get_admin_stats", Get, "/admin/stats", false, Admin);
pub const DASHBOARD_STATS: Endpoint =
    Endpoint::new("get_dashboard_stats", Get, "/admin/dashboard/stats", false, Admin);
pub const LIST_USERS: Endpoint = Endpoint::new("get_users", Get, "/admin/users", false, Admin);
pub const USER_DETAIL: Endpoint =
    Endpoint::new("get_user_detail", Get, "/admin/users/{id}", false, Admin);
pub const TOGGLE_USER_STATUS: Endpoint = Endpoint::new(
    "toggle_user_status",
    Post,
    "/admin/users/{id}/toggle-status",
    false,
    Admin,
);
pub const MAKE_USER_ADMIN: Endpoint =
    Endpoint::new("make_user_admin", Post, "/admin/users/{id}/make-admin", false, Admin);
pub const LIST_ALL_CONTENT: Endpoint =
    Endpoint::new("get_all_content", Get, "/admin/content/all", false, Admin);
pub const CREATE_CONTENT: Endpoint =
    Endpoint::new("create_content", Post, "/content", true, Admin);
pub const UPDATE_CONTENT: Endpoint =
    Endpoint::new("update_content", Put, "/content/{id}", true, Admin);
pub const DELETE_CONTENT: Endpoint =
    Endpoint::new("delete_content", Delete, "/content/{id}", false, Admin);
pub const TOGGLE_CONTENT_STATUS: Endpoint = Endpoint::new(
    "toggle_content_status",
    Post,
    "/admin/content/{id}/toggle-status",
    false,
    Admin,
);
pub const TOGGLE_CONTENT_FEATURED: Endpoint = Endpoint::new(
    "toggle_content_featured",
    Post,
    "/admin/content/{id}/toggle-featured",
    false,
    Admin,
);
pub const CREATE_EPISODE: Endpoint =
    Endpoint::new("create_episode", Post, "/content/{id}/episodes", true, Admin);
pub const CREATE_GENRE: Endpoint = Endpoint::new("create_genre", Post, "/genres", true, Admin);
pub const ADMIN_COMMENTS: Endpoint =
    Endpoint::new("get_admin_comments", Get, "/admin/comments", false, Admin);
pub const TOGGLE_COMMENT_STATUS: Endpoint = Endpoint::new(
    "toggle_comment_status",
    Post,
    "/admin/comments/{id}/toggle-status",
    false,
    Admin,
);
pub const CONTENT_VIEWS: Endpoint = Endpoint::new(
    "get_content_views",
    Get,
    "/admin/analytics/content-views",
    false,
    Admin,
);
pub const BULK_UPDATE_CONTENT: Endpoint = Endpoint::new(
    "bulk_update_content",
    Post,
    "/admin/content/bulk-update",
    true,
    Admin,
);

/// Full catalog
pub const ALL: &[Endpoint] = &[
    REGISTER,
    LOGIN,
    GET_PROFILE,
    UPDATE_PROFILE,
    CHANGE_PASSWORD,
    VERIFY_TOKEN,
    LIST_CONTENT,
    CONTENT_DETAIL,
    LIST_EPISODES,
    SEARCH,
    RECOMMENDATIONS,
    LIST_GENRES,
    RATE_CONTENT,
    USER_RATING,
    CONTENT_RATINGS,
    ADD_COMMENT,
    LIST_COMMENTS,
    UPDATE_COMMENT,
    DELETE_COMMENT,
    UPDATE_WATCH_HISTORY,
    WATCH_HISTORY,
    ADD_FAVORITE,
    REMOVE_FAVORITE,
    LIST_FAVORITES,
    CHECK_FAVORITE,
    LIST_NOTIFICATIONS,
    MARK_NOTIFICATION_READ,
    ADMIN_STATS,
    DASHBOARD_STATS,
    LIST_USERS,
    USER_DETAIL,
    TOGGLE_USER_STATUS,
    MAKE_USER_ADMIN,
    LIST_ALL_CONTENT,
    CREATE_CONTENT,
    UPDATE_CONTENT,
    DELETE_CONTENT,
    TOGGLE_CONTENT_STATUS,
    TOGGLE_CONTENT_FEATURED,
    CREATE_EPISODE,
    CREATE_GENRE,
    ADMIN_COMMENTS,
    TOGGLE_COMMENT_STATUS,
    CONTENT_VIEWS,
    BULK_UPDATE_CONTENT,
];

/// Look up an endpoint by operation name
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|e| e.name == name)
}
