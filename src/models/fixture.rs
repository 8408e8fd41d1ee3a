use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle of a match record. Fixtures are never hard-deleted in the normal
/// flow; admins move them through these states instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FixtureStatus {
    Scheduled,
    Live,
    Ft,
    Postponed,
    Cancelled,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureStatus::Scheduled => "SCHEDULED",
            FixtureStatus::Live => "LIVE",
            FixtureStatus::Ft => "FT",
            FixtureStatus::Postponed => "POSTPONED",
            FixtureStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SCHEDULED" => Some(FixtureStatus::Scheduled),
            "LIVE" => Some(FixtureStatus::Live),
            "FT" => Some(FixtureStatus::Ft),
            "POSTPONED" => Some(FixtureStatus::Postponed),
            "CANCELLED" => Some(FixtureStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEventType {
    Goal,
    OwnGoal,
    Penalty,
    YellowCard,
    RedCard,
    Substitution,
    HalfTime,
    FullTime,
}

/// One embedded entry in a fixture's event list. Array order is display
/// order; the admin enters events chronologically and nothing re-sorts them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: String,
    pub event_type: TimelineEventType,
    pub team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Match date as an ISO "YYYY-MM-DD" string, kept as entered by the admin.
    pub date: String,

    /// Kick-off time string; recognized shapes are normalized at render time.
    pub time: String,

    pub venue: String,
    pub competition: String,
    pub competition_type: String,
    pub season: String,

    pub home_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_logo: Option<String>,
    pub away_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_logo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,

    pub status: FixtureStatus,

    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_image: Option<String>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFixture {
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "venue is required"))]
    pub venue: String,
    #[validate(length(min = 1, message = "competition is required"))]
    pub competition: String,
    #[validate(length(min = 1, message = "competition type is required"))]
    pub competition_type: String,
    #[validate(length(min = 1, message = "season is required"))]
    pub season: String,
    #[validate(length(min = 1, message = "home team is required"))]
    pub home_team: String,
    pub home_logo: Option<String>,
    #[validate(length(min = 1, message = "away team is required"))]
    pub away_team: String,
    pub away_logo: Option<String>,
    pub match_image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFixture {
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub competition: Option<String>,
    pub competition_type: Option<String>,
    pub season: Option<String>,
    pub home_team: Option<String>,
    pub home_logo: Option<String>,
    pub away_team: Option<String>,
    pub away_logo: Option<String>,
    pub match_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTimelineEvent {
    #[validate(length(min = 1, message = "time label is required"))]
    pub time: String,
    pub event_type: TimelineEventType,
    #[validate(length(min = 1, message = "team is required"))]
    pub team: String,
    pub player: Option<String>,
    pub assist: Option<String>,
    pub description: Option<String>,
}

impl CreateTimelineEvent {
    pub fn into_event(self) -> TimelineEvent {
        TimelineEvent {
            time: self.time,
            event_type: self.event_type,
            team: self.team,
            player: self.player,
            assist: self.assist,
            description: self.description,
        }
    }
}
