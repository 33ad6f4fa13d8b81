use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::background::BackgroundConfig;

/// Target used for every outbound link.
pub const NEW_CONTEXT: &str = "_blank";

pub static GLOBAL_PROFILE_CACHE: LazyLock<DashMap<String, Arc<ProfileContent>>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "content"]
pub struct ProfileAssets;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse profile {name}: {reason}")]
    Parse { name: String, reason: String },
    #[error("Empty link for {0}")]
    EmptyLink(String),
    #[error("Invalid background: {0}")]
    InvalidBackground(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Github,
    Linkedin,
    Email,
    Phone,
    Website,
}

impl ContactKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Github => "devicon-github-plain",
            Self::Linkedin => "devicon-linkedin-plain",
            Self::Email => "extra-email",
            Self::Phone => "extra-phone",
            Self::Website => "extra-link",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub Profile",
            Self::Linkedin => "LinkedIn Profile",
            Self::Email => "Send Email",
            Self::Phone => "Call",
            Self::Website => "Website",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub kind: ContactKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub organization: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    pub period: String,
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl WorkExperience {
    /// Card heading. With a location the organization stands alone and the
    /// role moves to the subtitle.
    pub fn heading(&self) -> String {
        if self.location.is_some() {
            self.organization.clone()
        } else {
            format!("{} - {}", self.role, self.organization)
        }
    }

    pub fn subtitle(&self) -> Option<String> {
        self.location
            .as_ref()
            .map(|location| format!("{} | {}", self.role, location))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub demo: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Plain(&'a str),
    Strong(&'a str),
}

/// Splits `**bold**` markers out of a highlight. An unmatched marker is kept
/// as literal text.
pub fn emphasis(text: &str) -> Vec<Fragment<'_>> {
    let parts = text.split("**").collect::<Vec<_>>();
    let balanced = parts.len() % 2 == 1;
    let mut fragments = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        if !balanced && is_last && i > 0 {
            fragments.push(Fragment::Plain("**"));
            if !part.is_empty() {
                fragments.push(Fragment::Plain(part));
            }
            continue;
        }
        if part.is_empty() {
            continue;
        }
        if i % 2 == 1 {
            fragments.push(Fragment::Strong(part));
        } else {
            fragments.push(Fragment::Plain(part));
        }
    }
    fragments
}

/// Everything a portfolio page displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContent {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub bio: String,
    #[serde(default)]
    pub contacts: Vec<ContactLink>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub background: Option<BackgroundConfig>,
}

impl ProfileContent {
    /// Loads a bundled profile by name (`content/<name>.json`), caching the
    /// parsed result.
    pub fn load(name: &str) -> Result<Arc<Self>, ProfileError> {
        let cache = &*GLOBAL_PROFILE_CACHE;
        if let Some(profile) = cache.get(name) {
            return Ok(profile.clone());
        }
        let file = ProfileAssets::get(&format!("{name}.json"))
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        let text = std::str::from_utf8(&file.data).map_err(|e| ProfileError::Parse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let profile = Arc::new(Self::from_json(name, text)?);
        cache.insert(name.to_string(), profile.clone());
        Ok(profile)
    }

    pub fn from_json(name: &str, text: &str) -> Result<Self, ProfileError> {
        let profile = serde_json::from_str::<Self>(text).map_err(|e| ProfileError::Parse {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        profile.validated()
    }

    fn validated(mut self) -> Result<Self, ProfileError> {
        for contact in &self.contacts {
            check_link(contact.kind.label(), &contact.url)?;
        }
        for job in &self.experience {
            if let Some(url) = &job.certificate {
                check_link(&job.organization, url)?;
            }
        }
        for project in &self.projects {
            check_link(&project.title, &project.demo)?;
            check_link(&project.title, &project.source)?;
        }
        if let Some(background) = &self.background {
            background
                .validate()
                .map_err(ProfileError::InvalidBackground)?;
        }

        let mut seen = Vec::with_capacity(self.skills.len());
        self.skills.retain(|skill| {
            if seen.contains(skill) {
                false
            } else {
                seen.push(skill.clone());
                true
            }
        });
        Ok(self)
    }
}

fn check_link(label: &str, url: &str) -> Result<(), ProfileError> {
    if url.trim().is_empty() {
        Err(ProfileError::EmptyLink(label.to_string()))
    } else {
        Ok(())
    }
}

/// Opens a URL in a new viewing context. Fire-and-forget.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Handles one click on a link button: `url` is handed to `opener` exactly
/// once and unmodified.
pub fn activate(opener: &dyn LinkOpener, url: &str) {
    opener.open(url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    const MINIMAL: &str = r#"{
        "name": "Test Person",
        "bio": "Writes tests.",
        "contacts": [{ "kind": "email", "url": "mailto:test@example.com" }],
        "skills": ["Rust", "SQL", "Rust"]
    }"#;

    #[test]
    fn test_bundled_profiles_load() {
        let classic = ProfileContent::load("portfolio").expect("portfolio should load");
        assert_eq!(classic.name, "Ashish Bhagwan Patel");
        assert_eq!(classic.contacts.len(), 4);
        assert_eq!(classic.experience.len(), 2);
        assert_eq!(classic.projects.len(), 5);
        assert!(classic.background.is_none());

        let cosmic = ProfileContent::load("portfolio3d").expect("portfolio3d should load");
        assert_eq!(cosmic.name, "Md Danish");
        let background = cosmic.background.as_ref().expect("3d profile has a background");
        assert_eq!(background.point_count, 5000);
        assert_eq!(background.color, "#ffffff");
    }

    #[test]
    fn test_load_is_cached() {
        let first = ProfileContent::load("portfolio").expect("portfolio should load");
        let second = ProfileContent::load("portfolio").expect("portfolio should load");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_profile() {
        assert_eq!(
            ProfileContent::load("nope"),
            Err(ProfileError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_skills_collapse() {
        let profile = ProfileContent::from_json("minimal", MINIMAL).expect("should parse");
        assert_eq!(profile.skills, vec!["Rust".to_string(), "SQL".to_string()]);

        let classic = ProfileContent::load("portfolio").expect("portfolio should load");
        let typescript = classic.skills.iter().filter(|s| *s == "TypeScript").count();
        assert_eq!(typescript, 1);
        assert_eq!(classic.skills.first().map(String::as_str), Some("C++"));
    }

    #[test]
    fn test_malformed_profile() {
        let res = ProfileContent::from_json("broken", "{ \"name\": ");
        assert!(matches!(res, Err(ProfileError::Parse { name, .. }) if name == "broken"));
    }

    #[test]
    fn test_empty_link_rejected() {
        let text = r#"{
            "name": "Test Person",
            "bio": "",
            "contacts": [{ "kind": "github", "url": "  " }]
        }"#;
        assert_eq!(
            ProfileContent::from_json("empty", text),
            Err(ProfileError::EmptyLink("GitHub Profile".to_string()))
        );
    }

    #[test]
    fn test_invalid_background_rejected() {
        let text = r#"{ "name": "x", "bio": "", "background": { "point_count": 0 } }"#;
        assert!(matches!(
            ProfileContent::from_json("bg", text),
            Err(ProfileError::InvalidBackground(_))
        ));
    }

    #[test]
    fn test_experience_headings() {
        let classic = ProfileContent::load("portfolio").expect("portfolio should load");
        let drdo = &classic.experience[0];
        assert_eq!(
            drdo.heading(),
            "Defence Research and Development Organisation (DRDO)"
        );
        assert_eq!(
            drdo.subtitle().as_deref(),
            Some("Project Intern | RCI-Hyderabad")
        );

        let cosmic = ProfileContent::load("portfolio3d").expect("portfolio3d should load");
        let job = &cosmic.experience[0];
        assert_eq!(job.heading(), "Full Stack Developer - Data Vidhya");
        assert_eq!(job.subtitle(), None);
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            emphasis("using **UDP sockets** and **threads**."),
            vec![
                Fragment::Plain("using "),
                Fragment::Strong("UDP sockets"),
                Fragment::Plain(" and "),
                Fragment::Strong("threads"),
                Fragment::Plain("."),
            ]
        );
        assert_eq!(emphasis("plain"), vec![Fragment::Plain("plain")]);
        assert_eq!(emphasis("**all**"), vec![Fragment::Strong("all")]);
        assert_eq!(
            emphasis("a **dangling"),
            vec![
                Fragment::Plain("a "),
                Fragment::Plain("**"),
                Fragment::Plain("dangling")
            ]
        );
    }

    #[test]
    fn test_avatars_are_served_from_public() {
        let public = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public");
        for name in ["portfolio", "portfolio3d"] {
            let profile = ProfileContent::load(name).expect("bundled profile should load");
            let avatar = profile.avatar.as_deref().expect("bundled profiles have avatars");
            let path = avatar.split('?').next().unwrap_or(avatar);
            let file = public.join(path.trim_start_matches('/'));
            assert!(file.is_file(), "{name}: missing {}", file.display());
        }
        assert!(public.join("favicon.svg").is_file());
    }

    #[test]
    fn test_activate_opens_exact_url_once() {
        let classic = ProfileContent::load("portfolio").expect("portfolio should load");
        let phone = classic
            .contacts
            .iter()
            .find(|c| c.kind == ContactKind::Phone)
            .expect("portfolio has a phone contact");
        assert_eq!(phone.url, "tel:+91 8602717190");

        let urls = classic
            .contacts
            .iter()
            .map(|c| c.url.clone())
            .chain(classic.experience.iter().filter_map(|job| job.certificate.clone()))
            .chain(classic.projects.iter().flat_map(|p| [p.demo.clone(), p.source.clone()]));
        for url in urls {
            let opener = RecordingOpener::default();
            activate(&opener, &url);
            assert_eq!(*opener.opened.borrow(), vec![url]);
        }
    }
}
