//! 출판물(논문) 서비스

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::common::{PaginatedResponse, PaginationQuery};
use crate::domain::dto::content::{PublicationFilter, PublicationRequest, PublicationResponse};
use crate::domain::entities::content::publication::Publication;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::content::publication_repo::PublicationRepository;
use crate::repositories::users::user_repo::UserRepository;
use crate::services::access::ensure_owner_or_admin;
use crate::services::activity::ActivityService;
use crate::utils::id_utils::{parse_object_id, parse_optional_object_id, require_id};
use crate::utils::string_utils::clean_optional_string;
use crate::utils::time_utils::from_utc;

#[service(name = "publication")]
pub struct PublicationService {
    publication_repo: Arc<PublicationRepository>,
    user_repo: Arc<UserRepository>,
    activity_service: Arc<ActivityService>,
}

fn list_filter(filter: &PublicationFilter) -> Result<Document, AppError> {
    let mut query = doc! {};
    if let Some(author_id) = parse_optional_object_id(filter.author_id.as_deref(), "author_id")? {
        query.insert("author_id", author_id);
    }
    Ok(query)
}

fn apply_request(publication: &mut Publication, request: PublicationRequest) {
    publication.title = request.title.trim().to_string();
    publication.abstract_text = clean_optional_string(request.abstract_text);
    publication.url = clean_optional_string(request.url);
    publication.venue = clean_optional_string(request.venue);
    publication.co_authors = request.co_authors;
    publication.published_on = request.published_on.map(from_utc);
    publication.tags = request.tags;
}

impl PublicationService {
    pub async fn list(&self, filter: &PublicationFilter, page: &PaginationQuery) -> Result<PaginatedResponse<PublicationResponse>, AppError> {
        let publications = self.publication_repo.list(list_filter(filter)?, page).await?;
        Ok(publications.map(PublicationResponse::from))
    }

    pub async fn get(&self, publication_id: &str) -> Result<PublicationResponse, AppError> {
        let publication = self.publication_repo.get(&parse_object_id(publication_id, "publication_id")?).await?;
        Ok(PublicationResponse::from(publication))
    }

    pub async fn create(&self, auth: &AuthenticatedUser, request: PublicationRequest) -> Result<PublicationResponse, AppError> {
        let my_id = self.caller_id(auth).await?;

        let now = DateTime::now();
        let mut publication = Publication {
            id: None,
            author_id: my_id,
            title: String::new(),
            abstract_text: None,
            url: None,
            venue: None,
            co_authors: Vec::new(),
            published_on: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        apply_request(&mut publication, request);

        let created = self.publication_repo.create(publication).await?;
        self.activity_service.record(my_id, "publication.create", "publication", created.id).await;

        Ok(PublicationResponse::from(created))
    }

    pub async fn update(&self, auth: &AuthenticatedUser, publication_id: &str, request: PublicationRequest) -> Result<PublicationResponse, AppError> {
        let (mut publication, my_id) = self.load_for_write(auth, publication_id).await?;

        apply_request(&mut publication, request);
        publication.updated_at = DateTime::now();
        self.publication_repo.save(&publication).await?;

        self.activity_service.record(my_id, "publication.update", "publication", publication.id).await;
        Ok(PublicationResponse::from(publication))
    }

    pub async fn delete(&self, auth: &AuthenticatedUser, publication_id: &str) -> Result<(), AppError> {
        let (publication, my_id) = self.load_for_write(auth, publication_id).await?;
        let id = require_id(&publication.id)?;

        self.publication_repo.delete(&id).await?;
        self.activity_service.record(my_id, "publication.delete", "publication", Some(id)).await;
        Ok(())
    }

    async fn load_for_write(&self, auth: &AuthenticatedUser, publication_id: &str) -> Result<(Publication, ObjectId), AppError> {
        let publication = self.publication_repo.get(&parse_object_id(publication_id, "publication_id")?).await?;
        let my_id = self.caller_id(auth).await?;

        ensure_owner_or_admin(publication.author_id == my_id, auth, "출판물을 수정할 권한이 없습니다")?;
        Ok((publication, my_id))
    }

    async fn caller_id(&self, auth: &AuthenticatedUser) -> Result<ObjectId, AppError> {
        let me = self.user_repo.find_profile(&auth.user_id).await?;
        require_id(&me.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter() {
        assert!(list_filter(&PublicationFilter::default()).unwrap().is_empty());
        assert!(list_filter(&PublicationFilter { author_id: Some("bad".into()) }).is_err());
    }
}
