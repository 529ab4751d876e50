//! Data structures for the StreamHub API
//!
//! Organized by endpoint family:
//! - **Users & auth**: accounts, login/registration responses
//! - **Content**: movies, series, episodes, genres
//! - **Interactions**: ratings, comments, watch history, favorites, notifications
//! - **Admin**: dashboard statistics and analytics
//! - **Requests**: JSON bodies and query parameter sets sent to the server
//!
//! Anything the server may omit or null is an `Option`, so partially
//! populated objects still decode. Catalog columns use [`Nullable`] so that
//! an explicit `null` survives re-encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::rust::double_option;
use std::fmt;

use crate::error::{ApiError, Result};

// =============================================================================
// Users & Auth
// =============================================================================

/// Account as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub subscription_expires: Option<String>,
}

fn default_true() -> bool {
    true
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)?;
        if self.is_admin {
            write!(f, " [admin]")?;
        }
        if !self.is_active {
            write!(f, " [inactive]")?;
        }
        Ok(())
    }
}

/// Per-user activity counters (admin user detail)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    #[serde(default)]
    pub watch_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

/// Admin view of a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub statistics: UserStatistics,
}

/// Result of a successful login or registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: User,
}

/// Result of verifying a token with the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenVerification {
    pub valid: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Bare `{"message": ...}` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Profile update acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

// =============================================================================
// Content
// =============================================================================

/// Catalog item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Movie => write!(f, "Movie"),
            ContentType::Series => write!(f, "Series"),
        }
    }
}

/// Column the server may send as `null`.
///
/// The outer `Option` records whether the key was present at all, so a
/// missing key and an explicit `null` re-encode the way they arrived.
pub type Nullable<T> = Option<Option<T>>;

/// Genre tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
}

/// Catalog item (movie or series).
///
/// Absent fields stay absent, `null` fields stay `null`, and unknown fields
/// are kept in `extra`, so a decoded item encodes back to the object the
/// server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: u64,
    pub title: String,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cover_image: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub trailer_url: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub release_year: Nullable<u16>,
    /// Minutes (movies only)
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub duration: Nullable<u32>,
    /// Average user score, 1-10
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub rating: Nullable<f64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Nullable<f64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub language: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub country: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub director: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cast: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub is_active: Nullable<bool>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub is_featured: Nullable<bool>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub view_count: Nullable<u64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub video_url: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    /// Present on series detail responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<Episode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Content {
    pub fn is_series(&self) -> bool {
        self.content_type == Some(ContentType::Series)
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres
            .iter()
            .flatten()
            .map(|g| g.name.as_str())
            .collect()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Option::as_deref)
    }

    pub fn release_year(&self) -> Option<u16> {
        self.release_year.flatten()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating.flatten()
    }

    pub fn view_count(&self) -> Option<u64> {
        self.view_count.flatten()
    }

    /// Missing or `null` counts as not featured
    pub fn is_featured(&self) -> bool {
        self.is_featured.flatten().unwrap_or(false)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(year) = self.release_year() {
            write!(f, " ({})", year)?;
        }
        if let Some(kind) = self.content_type {
            write!(f, " [{}]", kind)?;
        }
        Ok(())
    }
}

/// Series episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub series_id: u64,
    pub title: String,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    pub episode_number: u32,
    pub season_number: u32,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub duration: Nullable<u32>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub video_url: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Nullable<String>,
    /// ISO date
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub air_date: Nullable<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub is_active: Nullable<bool>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub view_count: Nullable<u64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Nullable<String>,
}

impl Episode {
    pub fn duration(&self) -> Option<u32> {
        self.duration.flatten()
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{:02}E{:02} - {}",
            self.season_number, self.episode_number, self.title
        )
    }
}

/// Page metadata attached to every list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl Pagination {
    /// `has_next` when the server sent it, otherwise derived from `pages`
    pub fn has_more(&self) -> bool {
        self.has_next.unwrap_or(self.page < self.pages)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPage {
    pub content: Vec<Content>,
    pub pagination: Pagination,
}

/// `{message, content}` returned by content create/update/toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub episode: Episode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub genre: Genre,
}

// =============================================================================
// Interactions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    pub score: u8,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPage {
    pub ratings: Vec<Rating>,
    pub pagination: Pagination,
}

/// Comment, with active replies when fetched as part of a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    pub text: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Number of comments in this thread, including this one
    pub fn thread_len(&self) -> usize {
        1 + self.replies.iter().map(Comment::thread_len).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub comment: Comment,
}

/// Playback progress for one user and one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    #[serde(default)]
    pub episode_id: Option<u64>,
    /// Seconds watched
    #[serde(default)]
    pub watch_time: u32,
    /// Total seconds
    #[serde(default)]
    pub total_time: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub last_watched: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryPage {
    pub watch_history: Vec<WatchHistoryEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub watch_history: WatchHistoryEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: u64,
    pub user_id: u64,
    pub content_id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePage {
    pub favorites: Vec<Favorite>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMutation {
    #[serde(default)]
    pub message: Option<String>,
    pub favorite: Favorite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub message: String,
    /// new_episode, new_season, recommendation
    #[serde(default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub content_id: Option<u64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub pagination: Pagination,
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub new_users_week: u64,
    #[serde(default)]
    pub total_content: u64,
    #[serde(default)]
    pub total_movies: u64,
    #[serde(default)]
    pub total_series: u64,
    #[serde(default)]
    pub total_episodes: u64,
    #[serde(default)]
    pub total_views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub stats: StatsSummary,
    #[serde(default)]
    pub top_content: Vec<Content>,
    #[serde(default)]
    pub recent_comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCount {
    pub title: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub content_type: Option<ContentType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u64,
}

/// View analytics for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentViews {
    #[serde(default)]
    pub top_content: Vec<ViewCount>,
    #[serde(default)]
    pub content_by_type: Vec<TypeCount>,
    #[serde(default)]
    pub content_by_genre: Vec<GenreCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateResult {
    #[serde(default)]
    pub message: Option<String>,
    pub updated_count: u64,
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `username` may also be an email address
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingRequest {
    pub score: u8,
}

/// New comment; `parent_id` is sent as `null` for top-level comments
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub text: String,
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEdit {
    pub text: String,
}

/// Playback progress report, times in seconds
#[derive(Debug, Clone, Serialize)]
pub struct WatchProgress {
    pub content_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<u64>,
    pub watch_time: u32,
    pub total_time: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FavoriteRequest {
    pub content_id: u64,
}

/// Fields for creating or updating content; unset fields are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EpisodeDraft {
    pub title: String,
    pub episode_number: u32,
    pub season_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Feature,
    Unfeature,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdate {
    pub content_ids: Vec<u64>,
    pub action: BulkAction,
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Sort key for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    CreatedAt,
    Rating,
    ViewCount,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Active/inactive filter used by admin listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
}

/// Catalog listing filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminContentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AdminCommentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
}

/// Flatten a serializable parameter set into `key=value` query pairs.
///
/// Nulls are dropped, strings are sent verbatim, and numbers and booleans use
/// their JSON spelling. Anything that is not a flat object is rejected.
pub fn to_query<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ApiError::InvalidRequest(format!(
                "query parameters must be an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            nested => {
                return Err(ApiError::InvalidRequest(format!(
                    "query parameter {} is not a scalar: {}",
                    key, nested
                )))
            }
        };
        pairs.push((key, value));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_content_roundtrips_unmodified() {
        let body = json!({"id": 1, "title": "X"});
        let content: Content = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(content.id, 1);
        assert_eq!(content.title, "X");
        assert_eq!(serde_json::to_value(&content).unwrap(), body);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let body = json!({
            "id": 7,
            "title": "Dune",
            "content_type": "movie",
            "rating": 8.2,
            "age_rating": "PG-13"
        });
        let content: Content = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(content.content_type, Some(ContentType::Movie));
        assert_eq!(content.extra.get("age_rating"), Some(&json!("PG-13")));
        assert_eq!(serde_json::to_value(&content).unwrap(), body);
    }

    #[test]
    fn test_series_detail_with_episodes() {
        let body = json!({
            "id": 3,
            "title": "Dark",
            "content_type": "series",
            "genres": [{"id": 1, "name": "Sci-Fi", "description": null}],
            "episodes": [{
                "id": 10, "series_id": 3, "title": "Secrets",
                "episode_number": 1, "season_number": 1
            }]
        });
        let content: Content = serde_json::from_value(body).unwrap();
        assert!(content.is_series());
        assert_eq!(content.genre_names(), vec!["Sci-Fi"]);
        let episodes = content.episodes.unwrap();
        assert_eq!(episodes[0].to_string(), "S01E01 - Secrets");
    }

    fn full_movie() -> Value {
        json!({
            "id": 12,
            "title": "Stalker",
            "description": null,
            "content_type": "movie",
            "cover_image": null,
            "trailer_url": null,
            "release_year": 1979,
            "duration": 162,
            "rating": 0.0,
            "imdb_rating": null,
            "language": null,
            "country": null,
            "director": null,
            "cast": null,
            "is_active": true,
            "is_featured": false,
            "view_count": 0,
            "created_at": "2024-03-01T10:00:00",
            "updated_at": null,
            "video_url": null,
            "genres": [{"id": 2, "name": "Drama", "description": null}]
        })
    }

    #[test]
    fn test_null_columns_roundtrip_unmodified() {
        let body = full_movie();
        let content: Content = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(content.description, Some(None));
        assert_eq!(content.description(), None);
        assert_eq!(content.imdb_rating, Some(None));
        assert_eq!(content.rating(), Some(0.0));
        assert!(!content.is_featured());
        assert_eq!(serde_json::to_value(&content).unwrap(), body);
    }

    #[test]
    fn test_absent_and_null_stay_distinct() {
        let absent: Content = serde_json::from_value(json!({"id": 1, "title": "X"})).unwrap();
        let null: Content =
            serde_json::from_value(json!({"id": 1, "title": "X", "director": null})).unwrap();

        assert_eq!(absent.director, None);
        assert_eq!(null.director, Some(None));
        assert_ne!(absent, null);
        assert!(serde_json::to_value(&absent).unwrap().get("director").is_none());
        assert_eq!(serde_json::to_value(&null).unwrap()["director"], Value::Null);
    }

    #[test]
    fn test_series_detail_null_episodes_roundtrip() {
        let mut body = full_movie();
        body["content_type"] = json!("series");
        body["duration"] = Value::Null;
        body["episodes"] = json!([
            {
                "id": 40, "series_id": 12, "title": "Pilot", "description": null,
                "episode_number": 1, "season_number": 1, "duration": 48,
                "video_url": null, "thumbnail": null, "air_date": "2024-01-05",
                "is_active": true, "view_count": 3, "created_at": "2024-01-01T00:00:00"
            },
            {
                "id": 41, "series_id": 12, "title": "Zone", "description": null,
                "episode_number": 2, "season_number": 1, "duration": null,
                "video_url": null, "thumbnail": null, "air_date": null,
                "is_active": null, "view_count": 0, "created_at": null
            }
        ]);

        let content: Content = serde_json::from_value(body.clone()).unwrap();
        let episodes = content.episodes.as_ref().unwrap();
        assert_eq!(episodes[0].duration(), Some(48));
        assert_eq!(episodes[1].air_date, Some(None));
        assert_eq!(serde_json::to_value(&content).unwrap(), body);
    }

    #[test]
    fn test_content_display() {
        let content: Content = serde_json::from_value(json!({
            "id": 1, "title": "Heat", "release_year": 1995, "content_type": "movie"
        }))
        .unwrap();
        assert_eq!(content.to_string(), "Heat (1995) [Movie]");
    }

    #[test]
    fn test_comment_thread_len() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1, "user_id": 1, "content_id": 1, "text": "top",
            "replies": [
                {"id": 2, "user_id": 2, "content_id": 1, "text": "a", "parent_id": 1},
                {"id": 3, "user_id": 3, "content_id": 1, "text": "b", "parent_id": 1}
            ]
        }))
        .unwrap();
        assert_eq!(comment.thread_len(), 3);
        assert_eq!(comment.replies[0].parent_id, Some(1));
    }

    #[test]
    fn test_comment_request_sends_null_parent() {
        let body = serde_json::to_value(CommentRequest {
            text: "Great".into(),
            parent_id: None,
        })
        .unwrap();
        assert_eq!(body, json!({"text": "Great", "parent_id": null}));
    }

    #[test]
    fn test_user_detail_flattens_statistics() {
        let detail: UserDetail = serde_json::from_value(json!({
            "id": 4, "username": "neo", "email": "neo@example.com",
            "is_admin": false, "is_active": true,
            "statistics": {"watch_count": 3, "favorite_count": 1, "rating_count": 0, "comment_count": 2}
        }))
        .unwrap();
        assert_eq!(detail.user.username, "neo");
        assert_eq!(detail.statistics.watch_count, 3);
    }

    #[test]
    fn test_pagination_has_more() {
        let p = Pagination {
            page: 1,
            per_page: 20,
            total: 45,
            pages: 3,
            has_next: None,
            has_prev: None,
        };
        assert!(p.has_more());
        let last = Pagination { page: 3, ..p.clone() };
        assert!(!last.has_more());
        let explicit = Pagination {
            has_next: Some(false),
            ..p
        };
        assert!(!explicit.has_more());
    }

    #[test]
    fn test_content_query_pairs() {
        let query = ContentQuery {
            content_type: Some(ContentType::Movie),
            per_page: Some(8),
            sort_by: Some(SortBy::ViewCount),
            featured: Some(true),
            ..Default::default()
        };
        let mut pairs = to_query(&query).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("featured".to_string(), "true".to_string()),
                ("per_page".to_string(), "8".to_string()),
                ("sort_by".to_string(), "view_count".to_string()),
                ("type".to_string(), "movie".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(to_query(&PageQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_nested_query_rejected() {
        let err = to_query(&json!({"ids": [1, 2]})).unwrap_err();
        assert!(err.to_string().contains("ids"));
    }
}
