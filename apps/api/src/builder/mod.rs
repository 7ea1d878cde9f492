//! Editable working copy of one resume.
//!
//! Edits apply locally and mark the copy dirty; nothing is persisted until
//! [`ResumeBuilder::save`]. A failed save keeps every local edit.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Education, Experience, Project, Resume, ResumePatch, SkillLine};
use crate::resumes::images::ImageUpload;
use crate::resumes::service::ResumeService;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("index {index} is out of range for a list of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// The reorderable lists of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryList {
    Experience,
    Education,
    Projects,
    Skills,
}

fn check(index: usize, len: usize) -> Result<(), BuilderError> {
    if index < len {
        Ok(())
    } else {
        Err(BuilderError::OutOfRange { index, len })
    }
}

/// Moves the item at `from` so it ends up at `to`, shifting the rest.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), BuilderError> {
    check(from, items.len())?;
    check(to, items.len())?;
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

fn remove_item<T>(items: &mut Vec<T>, index: usize) -> Result<(), BuilderError> {
    check(index, items.len())?;
    items.remove(index);
    Ok(())
}

fn fresh_id(id: &mut String) -> String {
    if id.trim().is_empty() {
        *id = Uuid::new_v4().to_string();
    }
    id.clone()
}

#[derive(Debug, Clone)]
pub struct ResumeBuilder {
    resume: Resume,
    dirty: bool,
    pending_image: Option<ImageUpload>,
}

impl ResumeBuilder {
    pub fn load(resume: Resume) -> Self {
        Self {
            resume,
            dirty: false,
            pending_image: None,
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pending_image(&self) -> Option<&ImageUpload> {
        self.pending_image.as_ref()
    }

    /// Same top-level merge the server applies.
    pub fn edit(&mut self, patch: ResumePatch) {
        self.resume.apply_patch(patch);
        self.dirty = true;
    }

    /// Drag-and-drop reorder of `formatting.sectionOrder`.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        move_item(&mut self.resume.formatting.section_order, from, to)?;
        self.dirty = true;
        Ok(())
    }

    /// Appends an experience entry and returns its id. Blank ids are replaced.
    pub fn add_experience(&mut self, mut entry: Experience) -> String {
        let id = fresh_id(&mut entry.id);
        self.resume.experience.push(entry);
        self.dirty = true;
        id
    }

    pub fn add_education(&mut self, mut entry: Education) -> String {
        let id = fresh_id(&mut entry.id);
        self.resume.education.push(entry);
        self.dirty = true;
        id
    }

    pub fn add_project(&mut self, mut entry: Project) -> String {
        let id = fresh_id(&mut entry.id);
        self.resume.projects.push(entry);
        self.dirty = true;
        id
    }

    pub fn add_skill_line(&mut self, line: SkillLine) {
        self.resume.skills.push(line);
        self.dirty = true;
    }

    pub fn remove_entry(&mut self, list: EntryList, index: usize) -> Result<(), BuilderError> {
        match list {
            EntryList::Experience => remove_item(&mut self.resume.experience, index)?,
            EntryList::Education => remove_item(&mut self.resume.education, index)?,
            EntryList::Projects => remove_item(&mut self.resume.projects, index)?,
            EntryList::Skills => remove_item(&mut self.resume.skills, index)?,
        }
        self.dirty = true;
        Ok(())
    }

    pub fn move_entry(
        &mut self,
        list: EntryList,
        from: usize,
        to: usize,
    ) -> Result<(), BuilderError> {
        match list {
            EntryList::Experience => move_item(&mut self.resume.experience, from, to)?,
            EntryList::Education => move_item(&mut self.resume.education, from, to)?,
            EntryList::Projects => move_item(&mut self.resume.projects, from, to)?,
            EntryList::Skills => move_item(&mut self.resume.skills, from, to)?,
        }
        self.dirty = true;
        Ok(())
    }

    /// Queues a profile photo for the next save.
    pub fn attach_image(&mut self, upload: ImageUpload) {
        self.pending_image = Some(upload);
        self.dirty = true;
    }

    /// Sends the whole working copy, plus any queued photo, as one update.
    ///
    /// On success the working copy becomes the stored document and the dirty
    /// flag and queued photo are cleared.
    pub async fn save(
        &mut self,
        service: &ResumeService,
        user_id: Uuid,
    ) -> Result<&Resume, AppError> {
        let patch = ResumePatch::from_document(&self.resume);
        let saved = service
            .update(user_id, self.resume.id, patch, self.pending_image.clone())
            .await?;

        debug!("Saved resume {} from builder", saved.id);
        self.resume = saved;
        self.dirty = false;
        self.pending_image = None;
        Ok(&self.resume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionId;
    use crate::resumes::service::NewResume;
    use crate::test_support::{png_upload, service_with, RecordingImageHost};

    fn builder() -> ResumeBuilder {
        ResumeBuilder::load(Resume::new(Uuid::new_v4(), Some("Draft")))
    }

    #[test]
    fn test_load_is_clean() {
        let b = builder();
        assert!(!b.is_dirty());
        assert_eq!(b.resume().title, "Draft");
    }

    #[test]
    fn test_edit_marks_dirty() {
        let mut b = builder();
        b.edit(ResumePatch {
            professional_summary: Some("Hello".into()),
            ..Default::default()
        });
        assert!(b.is_dirty());
        assert_eq!(b.resume().professional_summary, "Hello");
        assert_eq!(b.resume().title, "Draft");
    }

    #[test]
    fn test_move_section() {
        let mut b = builder();
        b.move_section(4, 0).unwrap();
        assert_eq!(
            b.resume().formatting.section_order,
            vec![
                SectionId::Projects,
                SectionId::Summary,
                SectionId::Experience,
                SectionId::Education,
                SectionId::Skills,
            ]
        );
        assert_eq!(
            b.move_section(0, 9),
            Err(BuilderError::OutOfRange { index: 9, len: 5 })
        );
    }

    #[test]
    fn test_add_assigns_fresh_ids() {
        let mut b = builder();
        let first = b.add_experience(Experience::default());
        let second = b.add_experience(Experience::default());
        assert!(!first.is_empty());
        assert_ne!(first, second);

        let kept = b.add_project(Project {
            id: "p-1".into(),
            ..Default::default()
        });
        assert_eq!(kept, "p-1");
    }

    #[test]
    fn test_move_and_remove_entries() {
        let mut b = builder();
        let a = b.add_education(Education::default());
        let c = b.add_education(Education::default());
        b.move_entry(EntryList::Education, 1, 0).unwrap();
        assert_eq!(b.resume().education[0].id, c);

        b.remove_entry(EntryList::Education, 0).unwrap();
        assert_eq!(b.resume().education.len(), 1);
        assert_eq!(b.resume().education[0].id, a);

        assert!(b.remove_entry(EntryList::Skills, 0).is_err());
    }

    #[tokio::test]
    async fn test_save_persists_and_clears_dirty() {
        let (service, store, images) = service_with(RecordingImageHost::succeeding());
        let user = Uuid::new_v4();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        let mut b = ResumeBuilder::load(created.clone());
        b.edit(ResumePatch {
            title: Some("Final".into()),
            ..Default::default()
        });
        b.attach_image(png_upload(false));

        let saved = b.save(&service, user).await.unwrap().clone();
        assert_eq!(saved.title, "Final");
        assert!(saved.personal_info.image.is_some());
        assert!(!b.is_dirty());
        assert!(b.pending_image().is_none());
        assert_eq!(store.get(created.id).unwrap().title, "Final");
        assert_eq!(images.uploads().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_local_edits() {
        let (service, _, _) = service_with(RecordingImageHost::succeeding());
        let user = Uuid::new_v4();
        let created = service
            .create(NewResume {
                user_id: user,
                ..Default::default()
            })
            .await
            .unwrap();

        let mut b = ResumeBuilder::load(created);
        b.edit(ResumePatch {
            title: Some("Mine".into()),
            ..Default::default()
        });
        b.attach_image(png_upload(false));

        let stranger = Uuid::new_v4();
        assert!(matches!(
            b.save(&service, stranger).await,
            Err(AppError::NotFound(_))
        ));
        assert!(b.is_dirty());
        assert_eq!(b.resume().title, "Mine");
        assert!(b.pending_image().is_some());
    }
}
