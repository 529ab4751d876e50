//! Higher-level API methods
//!
//! One binding per remote endpoint. Each fixes the path, method and body
//! shape for a single [`ApiClient::call`] and returns the decoded result
//! unchanged: no validation, caching or combination of calls.

use super::client::ApiClient;
use super::endpoints as ep;
use crate::error::Result;
use crate::models::*;

impl ApiClient {
    // =========================================================================
    // Auth
    // =========================================================================

    /// Create an account. The returned token is not stored; see [`ApiClient::set_token`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.send(&ep::REGISTER, &[], request).await
    }

    /// Log in by username or email. The returned token is not stored.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.send(&ep::LOGIN, &[], credentials).await
    }

    pub async fn get_profile(&self) -> Result<User> {
        self.fetch(&ep::GET_PROFILE, &[]).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserMutation> {
        self.send(&ep::UPDATE_PROFILE, &[], update).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse> {
        self.send(&ep::CHANGE_PASSWORD, &[], change).await
    }

    /// Ask the server whether a token is still valid
    pub async fn verify_token(&self, token: &str) -> Result<TokenVerification> {
        self.send(&ep::VERIFY_TOKEN, &[], &serde_json::json!({ "token": token }))
            .await
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// List catalog content with filters, sorting and pagination
    pub async fn get_content(&self, query: &ContentQuery) -> Result<ContentPage> {
        self.fetch_with(&ep::LIST_CONTENT, &[], query).await
    }

    /// Content detail; series include their episodes
    pub async fn get_content_detail(&self, id: u64) -> Result<Content> {
        self.fetch(&ep::CONTENT_DETAIL, &[id]).await
    }

    /// Episodes of a series, optionally for one season. Season 0 means all.
    pub async fn get_episodes(&self, series_id: u64, season: Option<u32>) -> Result<Vec<Episode>> {
        let query: Vec<(String, String)> = season
            .filter(|s| *s > 0)
            .map(|s| vec![("season".to_string(), s.to_string())])
            .unwrap_or_default();
        self.call(&ep::LIST_EPISODES, &[series_id], query, None).await
    }

    pub async fn search_content(&self, query: &str) -> Result<Vec<Content>> {
        let query = vec![("q".to_string(), query.to_string())];
        self.call(&ep::SEARCH, &[], query, None).await
    }

    pub async fn get_recommendations(&self) -> Result<Vec<Content>> {
        self.fetch(&ep::RECOMMENDATIONS, &[]).await
    }

    pub async fn get_genres(&self) -> Result<Vec<Genre>> {
        self.fetch(&ep::LIST_GENRES, &[]).await
    }

    // =========================================================================
    // Ratings & Comments
    // =========================================================================

    /// Rate content 1-10; re-rating replaces the previous score
    pub async fn rate_content(&self, content_id: u64, score: u8) -> Result<MessageResponse> {
        self.send(&ep::RATE_CONTENT, &[content_id], &RatingRequest { score })
            .await
    }

    /// The current user's rating; fails with 404 "No rating found" if unrated
    pub async fn get_user_rating(&self, content_id: u64) -> Result<Rating> {
        self.fetch(&ep::USER_RATING, &[content_id]).await
    }

    pub async fn get_content_ratings(&self, content_id: u64, page: &PageQuery) -> Result<RatingPage> {
        self.fetch_with(&ep::CONTENT_RATINGS, &[content_id], page).await
    }

    pub async fn add_comment(
        &self,
        content_id: u64,
        text: &str,
        parent_id: Option<u64>,
    ) -> Result<CommentMutation> {
        let body = CommentRequest {
            text: text.to_string(),
            parent_id,
        };
        self.send(&ep::ADD_COMMENT, &[content_id], &body).await
    }

    /// Top-level comments with their active replies
    pub async fn get_comments(&self, content_id: u64, page: &PageQuery) -> Result<CommentPage> {
        self.fetch_with(&ep::LIST_COMMENTS, &[content_id], page).await
    }

    pub async fn update_comment(&self, comment_id: u64, text: &str) -> Result<CommentMutation> {
        let body = CommentEdit {
            text: text.to_string(),
        };
        self.send(&ep::UPDATE_COMMENT, &[comment_id], &body).await
    }

    pub async fn delete_comment(&self, comment_id: u64) -> Result<MessageResponse> {
        self.fetch(&ep::DELETE_COMMENT, &[comment_id]).await
    }

    // =========================================================================
    // Watch History & Favorites
    // =========================================================================

    pub async fn update_watch_history(&self, progress: &WatchProgress) -> Result<WatchHistoryMutation> {
        self.send(&ep::UPDATE_WATCH_HISTORY, &[], progress).await
    }

    pub async fn get_watch_history(&self, page: &PageQuery) -> Result<WatchHistoryPage> {
        self.fetch_with(&ep::WATCH_HISTORY, &[], page).await
    }

    pub async fn add_to_favorites(&self, content_id: u64) -> Result<FavoriteMutation> {
        self.send(&ep::ADD_FAVORITE, &[], &FavoriteRequest { content_id })
            .await
    }

    pub async fn remove_from_favorites(&self, content_id: u64) -> Result<MessageResponse> {
        self.fetch(&ep::REMOVE_FAVORITE, &[content_id]).await
    }

    pub async fn get_favorites(&self, page: &PageQuery) -> Result<FavoritePage> {
        self.fetch_with(&ep::LIST_FAVORITES, &[], page).await
    }

    pub async fn check_favorite(&self, content_id: u64) -> Result<FavoriteStatus> {
        self.fetch(&ep::CHECK_FAVORITE, &[content_id]).await
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub async fn get_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage> {
        self.fetch_with(&ep::LIST_NOTIFICATIONS, &[], query).await
    }

    pub async fn mark_notification_read(&self, notification_id: u64) -> Result<MessageResponse> {
        self.fetch(&ep::MARK_NOTIFICATION_READ, &[notification_id])
            .await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn get_admin_stats(&self) -> Result<DashboardStats> {
        self.fetch(&ep::ADMIN_STATS, &[]).await
    }

    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        self.fetch(&ep::DASHBOARD_STATS, &[]).await
    }

    pub async fn get_users(&self, query: &UserQuery) -> Result<UserPage> {
        self.fetch_with(&ep::LIST_USERS, &[], query).await
    }

    /// Same endpoint as [`ApiClient::get_users`]
    pub async fn get_all_users(&self, query: &UserQuery) -> Result<UserPage> {
        self.get_users(query).await
    }

    pub async fn get_user_detail(&self, user_id: u64) -> Result<UserDetail> {
        self.fetch(&ep::USER_DETAIL, &[user_id]).await
    }

    /// Activate or deactivate an account
    pub async fn toggle_user_status(&self, user_id: u64) -> Result<UserMutation> {
        self.fetch(&ep::TOGGLE_USER_STATUS, &[user_id]).await
    }

    pub async fn make_user_admin(&self, user_id: u64) -> Result<UserMutation> {
        self.fetch(&ep::MAKE_USER_ADMIN, &[user_id]).await
    }

    /// All content, including inactive items
    pub async fn get_all_content(&self, query: &AdminContentQuery) -> Result<ContentPage> {
        self.fetch_with(&ep::LIST_ALL_CONTENT, &[], query).await
    }

    pub async fn create_content(&self, draft: &ContentDraft) -> Result<ContentMutation> {
        self.send(&ep::CREATE_CONTENT, &[], draft).await
    }

    pub async fn update_content(&self, content_id: u64, draft: &ContentDraft) -> Result<ContentMutation> {
        self.send(&ep::UPDATE_CONTENT, &[content_id], draft).await
    }

    pub async fn delete_content(&self, content_id: u64) -> Result<MessageResponse> {
        self.fetch(&ep::DELETE_CONTENT, &[content_id]).await
    }

    pub async fn toggle_content_status(&self, content_id: u64) -> Result<ContentMutation> {
        self.fetch(&ep::TOGGLE_CONTENT_STATUS, &[content_id]).await
    }

    pub async fn toggle_content_featured(&self, content_id: u64) -> Result<ContentMutation> {
        self.fetch(&ep::TOGGLE_CONTENT_FEATURED, &[content_id]).await
    }

    pub async fn create_episode(&self, series_id: u64, draft: &EpisodeDraft) -> Result<EpisodeMutation> {
        self.send(&ep::CREATE_EPISODE, &[series_id], draft).await
    }

    pub async fn create_genre(&self, draft: &GenreDraft) -> Result<GenreMutation> {
        self.send(&ep::CREATE_GENRE, &[], draft).await
    }

    pub async fn get_admin_comments(&self, query: &AdminCommentQuery) -> Result<CommentPage> {
        self.fetch_with(&ep::ADMIN_COMMENTS, &[], query).await
    }

    /// Hide or restore a comment
    pub async fn toggle_comment_status(&self, comment_id: u64) -> Result<CommentMutation> {
        self.fetch(&ep::TOGGLE_COMMENT_STATUS, &[comment_id]).await
    }

    /// View analytics over the last `days` days (server default 30)
    pub async fn get_content_views(&self, days: Option<u32>) -> Result<ContentViews> {
        let query: Vec<(String, String)> = days
            .map(|d| vec![("days".to_string(), d.to_string())])
            .unwrap_or_default();
        self.call(&ep::CONTENT_VIEWS, &[], query, None).await
    }

    pub async fn bulk_update_content(&self, update: &BulkUpdate) -> Result<BulkUpdateResult> {
        self.send(&ep::BULK_UPDATE_CONTENT, &[], update).await
    }
}
