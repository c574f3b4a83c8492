//! Provider-neutral generation settings and response shape
//!
//! The field extraction client always sends the same settings: a plain-text
//! response and content-safety filtering switched off for the four standard
//! harm categories. Providers translate these into their own wire format.

/// Harm category a safety setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmCategory {
    /// Harassment
    Harassment,
    /// Hate speech
    HateSpeech,
    /// Sexually explicit content
    SexuallyExplicit,
    /// Dangerous content
    DangerousContent,
}

impl HarmCategory {
    /// The four standard categories
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];

    /// Wire name, e.g. `HARM_CATEGORY_HARASSMENT`
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
        }
    }
}

/// Blocking threshold for a harm category
///
/// Extraction always runs with filtering off, so only `BLOCK_NONE` is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmBlockThreshold {
    /// Never block
    BlockNone,
}

impl HarmBlockThreshold {
    /// Wire name, e.g. `BLOCK_NONE`
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmBlockThreshold::BlockNone => "BLOCK_NONE",
        }
    }
}

/// One safety setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetySetting {
    /// Category
    pub category: HarmCategory,
    /// Threshold
    pub threshold: HarmBlockThreshold,
}

/// Settings sent alongside a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Requested response MIME type
    pub response_mime_type: String,
    /// Safety settings, one per category
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerationConfig {
    /// Plain-text output with every harm category set to `BLOCK_NONE`
    pub fn plain_text_unfiltered() -> Self {
        Self {
            response_mime_type: "text/plain".to_string(),
            safety_settings: HarmCategory::ALL
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: HarmBlockThreshold::BlockNone,
                })
                .collect(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::plain_text_unfiltered()
    }
}

/// A text part of a candidate's content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    /// Text, absent for non-text parts
    pub text: Option<String>,
}

/// Content of a candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    /// Parts in order
    pub parts: Vec<Part>,
}

/// One candidate answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Content, absent when the candidate was cut off
    pub content: Option<Content>,
    /// Why generation stopped, as reported by the provider
    pub finish_reason: Option<String>,
}

/// Response from a generation call
///
/// `text` is the provider's primary text output. `candidates` is the raw
/// candidate list, used as a fallback when the primary text is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Primary text output
    pub text: Option<String>,
    /// Raw candidates
    pub candidates: Vec<Candidate>,
}

impl GenerationResponse {
    /// A response whose primary text is `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            candidates: Vec::new(),
        }
    }

    /// A response with no primary text, only candidates
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            text: None,
            candidates,
        }
    }

    /// Text of the first candidate's first content part
    pub fn first_part_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

impl Candidate {
    /// Candidate whose content is a single text part
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(Content {
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }),
            finish_reason: None,
        }
    }
}
