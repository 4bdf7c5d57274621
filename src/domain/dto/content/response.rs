use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::domain::entities::content::publication::Publication;
use crate::domain::entities::content::schedule::Schedule;
use crate::utils::id_utils::id_hex;
use crate::utils::time_utils::{to_utc, to_utc_opt};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicationResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    pub venue: Option<String>,
    pub co_authors: Vec<String>,
    pub published_on: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Publication> for PublicationResponse {
    fn from(publication: Publication) -> Self {
        Self {
            id: id_hex(&publication.id),
            author_id: publication.author_id.to_hex(),
            title: publication.title,
            abstract_text: publication.abstract_text,
            url: publication.url,
            venue: publication.venue,
            co_authors: publication.co_authors,
            published_on: to_utc_opt(publication.published_on),
            tags: publication.tags,
            created_at: to_utc(publication.created_at),
            updated_at: to_utc(publication.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: id_hex(&schedule.id),
            title: schedule.title,
            description: schedule.description,
            course_id: schedule.course_id.map(|id| id.to_hex()),
            start_time: to_utc(schedule.start_time),
            end_time: to_utc(schedule.end_time),
            location: schedule.location,
            created_at: to_utc(schedule.created_at),
            updated_at: to_utc(schedule.updated_at),
        }
    }
}
