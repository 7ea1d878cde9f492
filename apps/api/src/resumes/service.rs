//! Resume lifecycle: create, read, list, update, delete. Ownership is enforced
//! here so every caller (HTTP handlers, the analyzer, the builder) gets it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumePatch};
use crate::resumes::images::{ImageHost, ImageUpload};
use crate::resumes::store::ResumeStore;

/// Identity details copied into a new resume's personal info.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewResume<'a> {
    pub user_id: Uuid,
    pub title: Option<&'a str>,
    pub full_name: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn ResumeStore>,
    images: Arc<dyn ImageHost>,
}

impl ResumeService {
    pub fn new(store: Arc<dyn ResumeStore>, images: Arc<dyn ImageHost>) -> Self {
        Self { store, images }
    }

    /// Creates a resume with schema defaults, prefilled from the owner's identity.
    pub async fn create(&self, params: NewResume<'_>) -> Result<Resume, AppError> {
        let mut resume = Resume::new(params.user_id, params.title);
        if let Some(name) = params.full_name {
            resume.personal_info.full_name = name.to_string();
        }
        if let Some(email) = params.email {
            resume.personal_info.email = email.to_string();
        }

        self.store.insert(&resume).await?;
        info!(resume_id = %resume.id, user_id = %resume.user_id, "Created resume");
        Ok(resume)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError> {
        Ok(self.store.list_for_owner(user_id).await?)
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Resume, AppError> {
        self.store
            .find_owned(user_id, id)
            .await?
            .ok_or_else(AppError::resume_not_found)
    }

    /// Unauthenticated read. Private resumes are reported as missing.
    pub async fn get_public(&self, id: Uuid) -> Result<Resume, AppError> {
        self.store
            .find_public(id)
            .await?
            .ok_or_else(AppError::resume_not_found)
    }

    /// Merges `patch` into the stored resume and persists the result.
    ///
    /// `image` is uploaded only once the merged document validates. On success
    /// its URL replaces the photo; on failure the update proceeds without it.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: ResumePatch,
        image: Option<ImageUpload>,
    ) -> Result<Resume, AppError> {
        let mut resume = self.get(user_id, id).await?;

        resume.apply_patch(patch);
        resume.validate().map_err(AppError::Validation)?;

        if let Some(upload) = image {
            match self.images.upload(&upload).await {
                Ok(url) => resume.personal_info.image = Some(url),
                Err(e) => {
                    warn!(resume_id = %id, error = %e, "Profile image upload failed, continuing without it");
                }
            }
        }
        resume.updated_at = Utc::now();

        if !self.store.replace_owned(&resume).await? {
            return Err(AppError::resume_not_found());
        }
        info!(resume_id = %id, user_id = %user_id, "Updated resume");
        Ok(resume)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_owned(user_id, id).await? {
            return Err(AppError::resume_not_found());
        }
        info!(resume_id = %id, user_id = %user_id, "Deleted resume");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, Template};
    use crate::test_support::{png_upload, service_with, InMemoryResumeStore, RecordingImageHost};
    use bytes::Bytes;
    use serde_json::json;

    fn owner() -> Uuid {
        Uuid::new_v4()
    }

    #[tokio::test]
    async fn test_create_prefills_identity() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let resume = service
            .create(NewResume {
                user_id: user,
                title: Some("Backend"),
                full_name: Some("Ada Lovelace"),
                email: Some("ada@example.com"),
            })
            .await
            .unwrap();

        assert_eq!(resume.title, "Backend");
        assert_eq!(resume.personal_info.full_name, "Ada Lovelace");
        assert_eq!(resume.personal_info.email, "ada@example.com");
        assert_eq!(service.get(user, resume.id).await.unwrap(), resume);
    }

    #[tokio::test]
    async fn test_foreign_resume_is_not_found() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let resume = service
            .create(NewResume {
                user_id: owner(),
                ..Default::default()
            })
            .await
            .unwrap();

        let stranger = owner();
        assert!(matches!(
            service.get(stranger, resume.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service
                .update(stranger, resume.id, ResumePatch::default(), None)
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(stranger, resume.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let first = service
            .create(NewResume {
                user_id: user,
                title: Some("First"),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = service
            .create(NewResume {
                user_id: user,
                title: Some("Second"),
                ..Default::default()
            })
            .await
            .unwrap();
        service
            .create(NewResume {
                user_id: owner(),
                ..Default::default()
            })
            .await
            .unwrap();

        let patch = ResumePatch {
            professional_summary: Some("touched".into()),
            ..Default::default()
        };
        service.update(user, first.id, patch, None).await.unwrap();

        let ids: Vec<Uuid> = service.list(user).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_public_read_requires_flag() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let resume = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(service.get_public(resume.id).await.is_err());

        let patch = ResumePatch {
            is_public: Some(true),
            ..Default::default()
        };
        service.update(user, resume.id, patch, None).await.unwrap();
        assert_eq!(service.get_public(resume.id).await.unwrap().id, resume.id);
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_timestamp() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                title: Some("Keep"),
                ..Default::default()
            })
            .await
            .unwrap();

        let patch: ResumePatch = serde_json::from_value(json!({ "template": "minimal" })).unwrap();
        let updated = service.update(user, created.id, patch, None).await.unwrap();

        assert_eq!(updated.title, "Keep");
        assert_eq!(updated.template, Template::Minimal);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_document() {
        let (service, store, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        let patch = ResumePatch {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(user, created.id, patch, None).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(store.get(created.id).unwrap().title, created.title);
    }

    #[tokio::test]
    async fn test_invalid_update_does_not_upload_image() {
        let (service, _, images) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        let patch = ResumePatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            service
                .update(user, created.id, patch, Some(png_upload(true)))
                .await,
            Err(AppError::Validation(_))
        ));
        assert!(images.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_update_stores_uploaded_image_url() {
        let (service, _, images) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                full_name: Some("Ada"),
                ..Default::default()
            })
            .await
            .unwrap();

        let patch = ResumePatch {
            personal_info: Some(PersonalInfo {
                full_name: "Ada L.".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let updated = service
            .update(user, created.id, patch, Some(png_upload(true)))
            .await
            .unwrap();

        let url = updated.personal_info.image.unwrap();
        assert!(url.starts_with("https://images.test/"));
        assert_eq!(updated.personal_info.full_name, "Ada L.");
        assert_eq!(images.uploads(), vec!["w-400,h-400,fo-face,z-2,bg-remove"]);
    }

    #[tokio::test]
    async fn test_image_without_personal_info_keeps_stored_fields() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                full_name: Some("Ada"),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = service
            .update(user, created.id, ResumePatch::default(), Some(png_upload(false)))
            .await
            .unwrap();

        assert_eq!(updated.personal_info.full_name, "Ada");
        assert!(updated.personal_info.image.is_some());
    }

    #[tokio::test]
    async fn test_failed_upload_does_not_fail_update() {
        let (service, _, _) = service_with(RecordingImageHost::failing());
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        let patch = ResumePatch {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        let upload = ImageUpload {
            file_name: "a.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: Bytes::from_static(b"jpg"),
            remove_background: false,
        };
        let updated = service
            .update(user, created.id, patch, Some(upload))
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(updated.personal_info.image.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_resume() {
        let store = Arc::new(InMemoryResumeStore::default());
        let service = ResumeService::new(store.clone(), Arc::new(RecordingImageHost::succeeding()));
        let user = owner();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        service.delete(user, created.id).await.unwrap();
        assert!(store.get(created.id).is_none());
        assert!(matches!(
            service.delete(user, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
