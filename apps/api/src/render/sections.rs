//! Section builders shared by every layout. Each returns `None` when the
//! section has nothing to show, so callers can drop it.

use crate::models::resume::{Education, Experience, MonthYear, PersonalInfo, Resume, SectionId};
use crate::render::document::{Block, Contact, ContactKind, Entry, Icon, Section};

/// Trimmed copy of `s`, or `None` when blank.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_non_empty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn lines(items: &[String]) -> Vec<String> {
    items.iter().filter_map(|s| non_empty(s)).collect()
}

/// Link text: the link's name, else its URL without the scheme.
pub fn link_text(name: &str, url: &str) -> String {
    match non_empty(name) {
        Some(name) => name,
        None => {
            let url = url.trim();
            url.strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .unwrap_or(url)
                .to_string()
        }
    }
}

fn month_year(date: &MonthYear) -> String {
    join_non_empty(&[&date.month, &date.year], " ")
}

fn range(start: &str, end: &str) -> Option<String> {
    match (non_empty(start), non_empty(end)) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

/// "Jan 2020 - Present" for a current role, "Jan 2020 - Mar 2022" otherwise.
pub fn experience_dates(exp: &Experience) -> Option<String> {
    let end = if exp.is_current {
        "Present".to_string()
    } else {
        month_year(&exp.end_date)
    };
    range(&month_year(&exp.start_date), &end)
}

pub fn education_dates(edu: &Education) -> Option<String> {
    range(&edu.start_date, &edu.end_date)
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Contact items in display order. Blank values are skipped.
pub fn contacts(info: &PersonalInfo, with_icons: bool, labelled_links: bool) -> Vec<Contact> {
    let icon = |icon: Icon| with_icons.then_some(icon);
    let mut out = Vec::new();

    if let Some(email) = non_empty(&info.email) {
        out.push(Contact {
            kind: ContactKind::Email,
            label: None,
            href: Some(format!("mailto:{email}")),
            text: email,
            icon: icon(Icon::Mail),
        });
    }
    if let Some(phone) = non_empty(&info.phone) {
        out.push(Contact {
            kind: ContactKind::Phone,
            label: None,
            href: None,
            text: phone,
            icon: icon(Icon::Phone),
        });
    }
    if let Some(location) = non_empty(&info.location) {
        out.push(Contact {
            kind: ContactKind::Location,
            label: None,
            href: None,
            text: location,
            icon: icon(Icon::MapPin),
        });
    }
    for link in &info.links {
        let Some(url) = non_empty(&link.url) else {
            continue;
        };
        let label = if labelled_links { non_empty(&link.name) } else { None };
        out.push(Contact {
            kind: ContactKind::Link,
            label,
            text: link_text(&link.name, &url),
            href: Some(url),
            icon: icon(Icon::Link),
        });
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// How an education entry arranges degree, field and institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationStyle {
    /// "Degree in Field" over "Institution, Location".
    Combined,
    /// Degree over institution, with the field listed as a detail.
    Split,
}

fn section(id: SectionId, title: &str, icon: Option<Icon>, blocks: Vec<Block>) -> Option<Section> {
    (!blocks.is_empty()).then(|| Section {
        id,
        title: title.to_string(),
        icon,
        blocks,
    })
}

pub fn summary(resume: &Resume, title: &str, icon: Option<Icon>) -> Option<Section> {
    let blocks = non_empty(&resume.professional_summary)
        .map(|text| vec![Block::Paragraph { text }])
        .unwrap_or_default();
    section(SectionId::Summary, title, icon, blocks)
}

pub fn experience(resume: &Resume, title: &str, icon: Option<Icon>) -> Option<Section> {
    let blocks = resume
        .experience
        .iter()
        .map(|exp| {
            let mut bullets = lines(&exp.description);
            bullets.extend(lines(&exp.achievements));
            Block::Entry(Entry {
                title: exp.position.trim().to_string(),
                subtitle: non_empty(&exp.company),
                dates: experience_dates(exp),
                bullets,
                ..Entry::default()
            })
        })
        .collect();
    section(SectionId::Experience, title, icon, blocks)
}

pub fn education(
    resume: &Resume,
    title: &str,
    icon: Option<Icon>,
    style: EducationStyle,
) -> Option<Section> {
    let blocks = resume
        .education
        .iter()
        .map(|edu| {
            let mut entry = Entry {
                dates: education_dates(edu),
                bullets: lines(&edu.achievements),
                ..Entry::default()
            };
            match style {
                EducationStyle::Combined => {
                    entry.title = join_non_empty(&[&edu.degree, &edu.field], " in ");
                    entry.subtitle = non_empty(&join_non_empty(&[&edu.institution, &edu.location], ", "));
                }
                EducationStyle::Split => {
                    entry.title = edu.degree.trim().to_string();
                    entry.subtitle = non_empty(&edu.institution);
                    entry.location = non_empty(&edu.location);
                    entry.details.extend(non_empty(&edu.field));
                }
            }
            if let Some(gpa) = edu.gpa.as_deref().and_then(non_empty) {
                entry.details.push(format!("GPA: {gpa}"));
            }
            Block::Entry(entry)
        })
        .collect();
    section(SectionId::Education, title, icon, blocks)
}

pub fn projects(resume: &Resume, title: &str, icon: Option<Icon>) -> Option<Section> {
    let blocks = resume
        .projects
        .iter()
        .map(|project| {
            Block::Entry(Entry {
                title: project.name.trim().to_string(),
                link: project.link.as_deref().and_then(non_empty),
                dates: non_empty(&project.date),
                tags: lines(&project.tools),
                bullets: lines(&project.description),
                ..Entry::default()
            })
        })
        .collect();
    section(SectionId::Projects, title, icon, blocks)
}

pub fn skills(resume: &Resume, title: &str, icon: Option<Icon>) -> Option<Section> {
    let blocks = resume
        .skills
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| Block::SkillGroup {
            heading: line.heading().map(str::to_string),
            items: lines(&line.items),
        })
        .collect();
    section(SectionId::Skills, title, icon, blocks)
}
