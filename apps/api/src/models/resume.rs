use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

fn synthesize_id() -> String {
    Uuid::new_v4().to_string()
}

/// Accepts `null` where a string is expected; the editor sends `null` for cleared inputs.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` stands for the type's default (cleared toggles, missing objects).
fn nullable_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` list is empty and `null` items inside a list are skipped.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

/// Keeps a stored entry id, synthesizing one when it is `null` or blank.
fn entry_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(synthesize_id))
}

/// GPA arrives as either a string or a bare number from older clients.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => s,
        Some(Loose::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

/// Profile photo reference.
///
/// A string on the wire is a direct URL; an object is a local upload that has
/// not been persisted yet and is only displayable through its object URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageRef {
    Remote(String),
    LocalPending(PendingImage),
    #[default]
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingImage {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub object_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageWire {
    Url(String),
    Pending(PendingImage),
}

impl From<Option<ImageWire>> for ImageRef {
    fn from(wire: Option<ImageWire>) -> Self {
        match wire {
            Some(ImageWire::Url(url)) if !url.trim().is_empty() => ImageRef::Remote(url),
            Some(ImageWire::Pending(pending)) => ImageRef::LocalPending(pending),
            _ => ImageRef::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything unrecognised (numbers, arrays) is treated as no image.
        let raw = serde_json::Value::deserialize(deserializer)?;
        let wire = serde_json::from_value::<Option<ImageWire>>(raw).unwrap_or(None);
        Ok(ImageRef::from(wire))
    }
}

impl ImageRef {
    /// Returns the `src` a template may display, if any.
    ///
    /// Pending uploads are displayable only through a browser object URL or
    /// an inline image data URL.
    pub fn display_src(&self) -> Option<&str> {
        match self {
            ImageRef::Remote(url) => Some(url.trim()).filter(|u| !u.is_empty()),
            ImageRef::LocalPending(pending) => pending
                .object_url
                .as_deref()
                .map(str::trim)
                .filter(|u| u.starts_with("blob:") || u.starts_with("data:image/")),
            ImageRef::Absent => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, alias = "name", deserialize_with = "nullable_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, alias = "phone_number", deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub website: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub profession: String,
    #[serde(default)]
    pub image: ImageRef,
}

// ────────────────────────────────────────────────────────────────────────────
// Content entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default = "synthesize_id", alias = "_id", deserialize_with = "entry_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub position: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub end_date: String,
    #[serde(default, deserialize_with = "nullable_default")]
    pub is_current: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationEntry {
    #[serde(default = "synthesize_id", alias = "_id", deserialize_with = "entry_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub field: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub institution: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub graduation_date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub gpa: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    #[serde(default = "synthesize_id", alias = "_id", deserialize_with = "entry_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "nullable_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CertificationEntry {
    #[serde(default = "synthesize_id", alias = "_id", deserialize_with = "entry_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub organization: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub date: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of renderable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Projects,
    Certifications,
    Skills,
}

impl SectionId {
    /// Canonical fallback order used to fill gaps in a stored order.
    pub const CANONICAL: [SectionId; 6] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Certifications,
        SectionId::Skills,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "summary" => Some(SectionId::Summary),
            "experience" => Some(SectionId::Experience),
            "education" => Some(SectionId::Education),
            "projects" => Some(SectionId::Projects),
            "certifications" => Some(SectionId::Certifications),
            "skills" => Some(SectionId::Skills),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Projects => "projects",
            SectionId::Certifications => "certifications",
            SectionId::Skills => "skills",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Summary => "Professional Summary",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Projects => "Projects",
            SectionId::Certifications => "Certifications",
            SectionId::Skills => "Skills",
        }
    }
}

/// One entry of the user-controlled section order as stored by the editor.
///
/// The id is kept as a raw string: the editor also stores non-content tabs
/// (e.g. `personal`) which are ignored at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRef {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
}

impl SectionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            icon: None,
        }
    }
}

impl<'de> Deserialize<'de> for SectionRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Object {
            #[serde(default)]
            id: Option<String>,
            #[serde(default)]
            name: Option<String>,
            // Icons are component references client-side and may serialize as objects.
            #[serde(default)]
            icon: Option<serde_json::Value>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Id(String),
            Object(Object),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Id(id) => SectionRef::new(id),
            Wire::Object(obj) => SectionRef {
                id: obj.id.unwrap_or_default(),
                name: obj.name,
                icon: obj.icon.and_then(|v| v.as_str().map(str::to_string)),
            },
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page settings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    #[serde(alias = "letter")]
    Letter,
    #[serde(alias = "a4")]
    A4,
}

impl PageSize {
    pub fn css_name(&self) -> &'static str {
        match self {
            PageSize::Letter => "Letter",
            PageSize::A4 => "A4",
        }
    }

    /// Page dimensions in twips (1/1440 in).
    pub fn twips(&self) -> (u32, u32) {
        match self {
            PageSize::Letter => (12240, 15840),
            PageSize::A4 => (11906, 16838),
        }
    }
}

pub const DEFAULT_MARGIN: &str = "0.5in";

/// Print geometry chosen in the editor's formatting controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub size: PageSize,
    pub margin: String,
    /// `None` lets each template use its own default padding.
    pub padding: Option<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin: DEFAULT_MARGIN.to_string(),
            padding: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Résumé document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, alias = "_id", deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_default")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "nullable_string")]
    pub professional_summary: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub education: Vec<EducationEntry>,
    #[serde(default, alias = "projects", deserialize_with = "nullable_vec")]
    pub project: Vec<ProjectEntry>,
    #[serde(default, alias = "certification", deserialize_with = "nullable_vec")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub sections: Vec<SectionRef>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub template: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub accent_color: String,
    /// Sharing flag; carried for wire compatibility, rendering ignores it.
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "nullable_default")]
    pub public: bool,
}
