//! Append-only conversation log rendered by the front end.

pub type EntryId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Maps the backend's confidence string; anything unrecognised is `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => ConfidenceTier::High,
            "medium" => ConfidenceTier::Medium,
            _ => ConfidenceTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// A document citation attached to an assistant answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub label: String,
    pub file_type: String,
    /// Similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Non-empty source list together with its confidence tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Citations {
    sources: Vec<Source>,
    tier: ConfidenceTier,
}

impl Citations {
    /// Returns `None` for an empty source list so that an entry can never
    /// carry a tier without sources.
    pub fn new(sources: Vec<Source>, tier: ConfidenceTier) -> Option<Self> {
        if sources.is_empty() {
            return None;
        }
        let sources = sources
            .into_iter()
            .map(|source| Source {
                similarity: source.similarity.clamp(0.0, 1.0),
                ..source
            })
            .collect();
        Some(Self { sources, tier })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn tier(&self) -> ConfidenceTier {
        self.tier
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub role: Role,
    pub text: String,
    pub citations: Option<Citations>,
    pub pending: bool,
    pub is_error: bool,
}

impl TranscriptEntry {
    pub fn sources(&self) -> &[Source] {
        self.citations
            .as_ref()
            .map(Citations::sources)
            .unwrap_or(&[])
    }

    pub fn confidence_tier(&self) -> Option<ConfidenceTier> {
        self.citations.as_ref().map(Citations::tier)
    }
}

/// Entry contents before the transcript assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    role: Role,
    text: String,
    citations: Option<Citations>,
    pending: bool,
    is_error: bool,
}

impl NewEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Role::User, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::plain(Role::System, text)
    }

    pub fn assistant(text: impl Into<String>, citations: Option<Citations>) -> Self {
        Self {
            citations,
            ..Self::plain(Role::Assistant, text)
        }
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::plain(Role::Assistant, text)
        }
    }

    /// Transient "typing" placeholder shown while a request is in flight.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            pending: true,
            ..Self::plain(Role::Assistant, text)
        }
    }

    fn plain(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            citations: None,
            pending: false,
            is_error: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: EntryId,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: NewEntry) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            role: entry.role,
            text: entry.text,
            citations: entry.citations,
            pending: entry.pending,
            is_error: entry.is_error,
        });
        id
    }

    pub fn remove_by_id(&mut self, id: EntryId) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Drops every entry. Ids keep increasing so a stale id never matches a
    /// new entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.pending).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
