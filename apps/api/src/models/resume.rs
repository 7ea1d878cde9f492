//! Resume document model: the stored aggregate, its schema defaults, and the
//! top-level merge-patch used by both the API and the builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled Resume";
pub const DEFAULT_ACCENT_COLOR: &str = "#10b981";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Missing keys and explicit `null` both fall back to the field's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `nullable` for flags whose schema default is `true`.
fn nullable_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Visual template chosen for a resume.
///
/// `MinimalImage` and `TechFocused` are accepted for storage but render with the
/// classic layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Minimal,
    MinimalImage,
    TechFocused,
}

/// Identifier of a reorderable resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Skills,
        SectionId::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

// ────────────────────────────────────────────────────────────────────────────
// Nested blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub profession: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    /// Hosted profile photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub links: Vec<Link>,
    #[serde(deserialize_with = "nullable_true")]
    pub show_icons: bool,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            profession: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            image: None,
            links: Vec::new(),
            show_icons: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthYear {
    #[serde(deserialize_with = "nullable")]
    pub month: String,
    #[serde(deserialize_with = "nullable")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub position: String,
    #[serde(deserialize_with = "nullable")]
    pub start_date: MonthYear,
    #[serde(deserialize_with = "nullable")]
    pub end_date: MonthYear,
    #[serde(deserialize_with = "nullable")]
    pub is_current: bool,
    /// Job description decomposed into bullets.
    #[serde(deserialize_with = "nullable")]
    pub description: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub achievements: Vec<String>,
}

/// Education dates are opaque strings, unlike the month/year pairs on
/// [`Experience`]. Clients already depend on both shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub institution: String,
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub field: String,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub tools: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One line of skills, optionally grouped under a heading ("Languages: Rust, Go").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<String>,
}

impl SkillLine {
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.heading().is_none() && self.items.iter().all(|i| i.trim().is_empty())
    }
}

/// Formatting block. `section_order` is the single source of truth for both the
/// builder's reorder UI and the single-column renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FormattingInput")]
pub struct Formatting {
    pub font_family: String,
    pub font_size: FontSize,
    pub line_height: f32,
    pub section_spacing: u32,
    pub item_spacing: u32,
    pub section_order: Vec<SectionId>,
    pub margins: u32,
    pub paper_size: PaperSize,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: FontSize::Medium,
            line_height: 1.5,
            section_spacing: 24,
            item_spacing: 12,
            section_order: SectionId::ALL.to_vec(),
            margins: 32,
            paper_size: PaperSize::A4,
        }
    }
}

/// Wire shape of [`Formatting`]: every key may be missing or `null`, and
/// either way takes the schema default.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FormattingInput {
    font_family: Option<String>,
    font_size: Option<FontSize>,
    line_height: Option<f32>,
    section_spacing: Option<u32>,
    item_spacing: Option<u32>,
    section_order: Option<Vec<SectionId>>,
    margins: Option<u32>,
    paper_size: Option<PaperSize>,
}

impl From<FormattingInput> for Formatting {
    fn from(input: FormattingInput) -> Self {
        let defaults = Formatting::default();
        Self {
            font_family: input.font_family.unwrap_or(defaults.font_family),
            font_size: input.font_size.unwrap_or(defaults.font_size),
            line_height: input.line_height.unwrap_or(defaults.line_height),
            section_spacing: input.section_spacing.unwrap_or(defaults.section_spacing),
            item_spacing: input.item_spacing.unwrap_or(defaults.item_spacing),
            section_order: input.section_order.unwrap_or(defaults.section_order),
            margins: input.margins.unwrap_or(defaults.margins),
            paper_size: input.paper_size.unwrap_or(defaults.paper_size),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub template: Template,
    pub accent_color: String,
    #[serde(deserialize_with = "nullable")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "nullable")]
    pub professional_summary: String,
    #[serde(deserialize_with = "nullable")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<SkillLine>,
    #[serde(deserialize_with = "nullable")]
    pub formatting: Formatting,
    #[serde(rename = "public", deserialize_with = "nullable")]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: DEFAULT_TITLE.to_string(),
            template: Template::default(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            personal_info: PersonalInfo::default(),
            professional_summary: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            formatting: Formatting::default(),
            is_public: false,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

impl Resume {
    /// A fresh document: identity, owner and title set, schema defaults elsewhere.
    pub fn new(user_id: Uuid, title: Option<&str>) -> Self {
        let now = Utc::now();
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        }
    }

    /// Top-level merge: present fields replace, absent fields are kept.
    /// Nested objects are replaced wholesale, never deep-merged.
    pub fn apply_patch(&mut self, patch: ResumePatch) {
        let ResumePatch {
            title,
            template,
            accent_color,
            personal_info,
            professional_summary,
            experience,
            education,
            projects,
            skills,
            formatting,
            is_public,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = template {
            self.template = v;
        }
        if let Some(v) = accent_color {
            self.accent_color = v;
        }
        if let Some(v) = personal_info {
            self.personal_info = v;
        }
        if let Some(v) = professional_summary {
            self.professional_summary = v;
        }
        if let Some(v) = experience {
            self.experience = v;
        }
        if let Some(v) = education {
            self.education = v;
        }
        if let Some(v) = projects {
            self.projects = v;
        }
        if let Some(v) = skills {
            self.skills = v;
        }
        if let Some(v) = formatting {
            self.formatting = v;
        }
        if let Some(v) = is_public {
            self.is_public = v;
        }
    }

    /// Checks the invariants a stored document must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }

        let line_height = self.formatting.line_height;
        if !line_height.is_finite() || line_height <= 0.0 {
            return Err(format!(
                "formatting.lineHeight must be a positive number, got {line_height}"
            ));
        }

        let order = &self.formatting.section_order;
        for (i, section) in order.iter().enumerate() {
            if order[..i].contains(section) {
                return Err(format!(
                    "formatting.sectionOrder lists '{}' more than once",
                    section.as_str()
                ));
            }
        }

        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Merge-patch
// ────────────────────────────────────────────────────────────────────────────

/// Partial update of a [`Resume`]. Keys for identity, ownership and timestamps
/// are not part of the patch and are ignored when present in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<Experience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<Formatting>,
    #[serde(rename = "public", skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl ResumePatch {
    /// A patch carrying every editable field of `resume`.
    pub fn from_document(resume: &Resume) -> Self {
        Self {
            title: Some(resume.title.clone()),
            template: Some(resume.template),
            accent_color: Some(resume.accent_color.clone()),
            personal_info: Some(resume.personal_info.clone()),
            professional_summary: Some(resume.professional_summary.clone()),
            experience: Some(resume.experience.clone()),
            education: Some(resume.education.clone()),
            projects: Some(resume.projects.clone()),
            skills: Some(resume.skills.clone()),
            formatting: Some(resume.formatting.clone()),
            is_public: Some(resume.is_public),
        }
    }
}
