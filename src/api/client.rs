use std::time::Duration;

use reqwest::{blocking, redirect, StatusCode};
use serde::Deserialize;

use crate::domain::events::{ActionOutcome, FriendRequestOutcome};
use crate::domain::friend_list_state::{FriendRelation, FriendRow};
use crate::domain::group_list_state::GroupRow;
use crate::domain::ids::{ConversationId, GroupId, MessageId, NotificationId, UserId};
use crate::domain::member_panel_state::{GroupMember, ModerationAction};
use crate::domain::message::{ChatMessage, MessageContent};
use crate::domain::notification::Notification;

/// Header the service checks on cross-site-sensitive posts.
const ANTI_FORGERY_HEADER: &str = "RequestVerificationToken";

#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(reqwest::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(source) => write!(f, "request failed: {source}"),
            ApiError::Status(status) => write!(f, "unexpected status {status}"),
            ApiError::Decode(source) => write!(f, "response not decodable: {source}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Blocking client for the service's REST surface. Lives on the API
/// worker thread; the shell never calls it directly.
///
/// Redirects are not followed: the friend-request endpoint answers with
/// one on purpose and the worker wants to see it.
#[derive(Debug)]
pub struct ApiClient {
    http: blocking::Client,
    base_url: String,
    anti_forgery_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        anti_forgery_token: Option<String>,
    ) -> Result<Self, ApiError> {
        let http = blocking::Client::builder()
            .timeout(request_timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            anti_forgery_token,
        })
    }

    pub fn load_history(&self, conversation: ConversationId) -> Result<Vec<ChatMessage>, ApiError> {
        let url = match conversation {
            ConversationId::Friend(UserId(id)) => {
                format!("{}/api/conversations/friend/{}/messages", self.base_url, id)
            }
            ConversationId::Group(GroupId(id)) => {
                format!("{}/api/conversations/group/{}/messages", self.base_url, id)
            }
        };
        let records: Vec<MessageRecord> = self.get_json(&url)?;
        Ok(records.into_iter().map(MessageRecord::into_message).collect())
    }

    pub fn load_friends(&self) -> Result<Vec<FriendRow>, ApiError> {
        let url = format!("{}/api/friends", self.base_url);
        let records: Vec<FriendRecord> = self.get_json(&url)?;
        Ok(records.into_iter().map(FriendRecord::into_row).collect())
    }

    pub fn load_groups(&self) -> Result<Vec<GroupRow>, ApiError> {
        let url = format!("{}/api/groups", self.base_url);
        let records: Vec<GroupRecord> = self.get_json(&url)?;
        Ok(records.into_iter().map(GroupRecord::into_row).collect())
    }

    pub fn load_members(&self, group_id: GroupId) -> Result<Vec<GroupMember>, ApiError> {
        let url = format!("{}/api/groups/{}/members", self.base_url, group_id.0);
        let records: Vec<MemberRecord> = self.get_json(&url)?;
        Ok(records.into_iter().map(MemberRecord::into_member).collect())
    }

    pub fn create_group(&self, name: &str, description: &str) -> Result<ActionOutcome, ApiError> {
        let url = format!("{}/api/groups", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "name": name, "description": description }))
            .send()
            .map_err(ApiError::Transport)?;
        Self::decode_action(response)
    }

    pub fn moderate(
        &self,
        group_id: GroupId,
        target: UserId,
        action: ModerationAction,
    ) -> Result<ActionOutcome, ApiError> {
        let (verb, body) = match action {
            ModerationAction::Kick => ("kick", serde_json::json!({ "user_id": target.0 })),
            ModerationAction::Ban { days } => {
                ("ban", serde_json::json!({ "user_id": target.0, "days": days }))
            }
            ModerationAction::Unban => ("unban", serde_json::json!({ "user_id": target.0 })),
        };
        let url = format!("{}/api/groups/{}/{}", self.base_url, group_id.0, verb);
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .map_err(ApiError::Transport)?;
        Self::decode_action(response)
    }

    /// Posts the friend request the way the service's form does: form
    /// fields plus the anti-forgery header. A redirect answer is
    /// reported as such, not followed.
    pub fn send_friend_request(&self, target: UserId) -> Result<FriendRequestOutcome, ApiError> {
        let url = format!("{}/api/friends/requests", self.base_url);
        let mut request = self
            .http
            .post(url)
            .form(&[("user_id", target.0.to_string())]);
        if let Some(token) = &self.anti_forgery_token {
            request = request.header(ANTI_FORGERY_HEADER, token);
        }
        let response = request.send().map_err(ApiError::Transport)?;

        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("/")
                .to_owned();
            return Ok(FriendRequestOutcome::Redirected(location));
        }
        if response.status().is_success() {
            return Ok(FriendRequestOutcome::Pending);
        }
        Err(ApiError::Status(response.status()))
    }

    pub fn load_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let url = format!("{}/api/notifications", self.base_url);
        let records: Vec<NotificationRecord> = self.get_json(&url)?;
        Ok(records
            .into_iter()
            .map(NotificationRecord::into_notification)
            .collect())
    }

    pub fn mark_notification_read(&self, id: NotificationId) -> Result<(), ApiError> {
        let url = format!("{}/api/notifications/{}/read", self.base_url, id.0);
        self.post_unit(&url)
    }

    pub fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        let url = format!("{}/api/notifications/read-all", self.base_url);
        self.post_unit(&url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url).send().map_err(ApiError::Transport)?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        response.json().map_err(ApiError::Decode)
    }

    fn post_unit(&self, url: &str) -> Result<(), ApiError> {
        let response = self.http.post(url).send().map_err(ApiError::Transport)?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }

    /// Moderation-style endpoints answer 200 for handled requests and
    /// put the verdict in the body.
    fn decode_action(response: blocking::Response) -> Result<ActionOutcome, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let record: ActionRecord = response.json().map_err(ApiError::Decode)?;
        Ok(ActionOutcome {
            success: record.success,
            message: record.message,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessageRecord {
    id: i64,
    sender_id: i64,
    sender_name: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    sticker: Option<String>,
    sent_at: i64,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl MessageRecord {
    fn into_message(self) -> ChatMessage {
        let content = match self.sticker {
            Some(name) => MessageContent::Sticker(name),
            None => MessageContent::Text(self.content.unwrap_or_default()),
        };
        ChatMessage {
            id: MessageId(self.id),
            sender_id: UserId(self.sender_id),
            sender_name: self.sender_name,
            content,
            sent_at_unix_ms: self.sent_at,
            avatar_url: self.avatar_url,
            is_mine: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FriendRecord {
    user_id: i64,
    name: String,
    #[serde(default)]
    relation: String,
}

impl FriendRecord {
    fn into_row(self) -> FriendRow {
        let relation = match self.relation.as_str() {
            "pending" => FriendRelation::Pending,
            "friends" => FriendRelation::Friends,
            _ => FriendRelation::CanRequest,
        };
        FriendRow {
            user_id: UserId(self.user_id),
            name: self.name,
            relation,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroupRecord {
    group_id: i64,
    name: String,
    #[serde(default)]
    member_count: u32,
}

impl GroupRecord {
    fn into_row(self) -> GroupRow {
        GroupRow {
            group_id: GroupId(self.group_id),
            name: self.name,
            member_count: self.member_count,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    user_id: i64,
    name: String,
    #[serde(default)]
    banned: bool,
}

impl MemberRecord {
    fn into_member(self) -> GroupMember {
        GroupMember {
            user_id: UserId(self.user_id),
            name: self.name,
            banned: self.banned,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    id: i64,
    sender_name: String,
    content: String,
    created_at: i64,
    #[serde(default)]
    read: bool,
    #[serde(default)]
    redirect_url: Option<String>,
}

impl NotificationRecord {
    fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId(self.id),
            sender_name: self.sender_name,
            content: self.content,
            created_at_unix_ms: self.created_at,
            read: self.read,
            redirect_url: self.redirect_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActionRecord {
    success: bool,
    #[serde(default)]
    message: String,
}
