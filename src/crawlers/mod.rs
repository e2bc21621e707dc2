//! Crawler detection by User-Agent.
//!
//! Advisory only: decides whether a document request gets meta tags injected.
//! Never use this for access control.

/// User-Agent substrings of known search indexers and link unfurlers.
pub const DEFAULT_SIGNATURES: &[&str] = &[
    "googlebot",
    "yahoo! slurp",
    "bingbot",
    "yandex",
    "baiduspider",
    "facebookexternalhit",
    "twitterbot",
    "rogerbot",
    "linkedinbot",
    "embedly",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "pinterest/0.",
    "pinterestbot",
    "slackbot",
    "vkshare",
    "w3c_validator",
    "redditbot",
    "applebot",
    "whatsapp",
    "flipboard",
    "tumblr",
    "bitlybot",
    "skypeuripreview",
    "nuzzel",
    "discordbot",
    "google page speed",
    "qwantify",
];

/// Immutable set of lowercase crawler signatures.
#[derive(Debug, Clone)]
pub struct CrawlerSignatures {
    signatures: Vec<String>,
}

impl CrawlerSignatures {
    /// Build a signature set. Entries are lowercased; empty entries are dropped.
    pub fn new<I, S>(signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signatures = signatures
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self { signatures }
    }

    /// Number of signatures in the set.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Classify a User-Agent. Absent or empty agents are never bots.
    pub fn is_bot(&self, user_agent: Option<&str>) -> bool {
        let Some(agent) = user_agent.filter(|ua| !ua.is_empty()) else {
            return false;
        };

        let agent = agent.to_lowercase();
        self.signatures.iter().any(|sig| agent.contains(sig.as_str()))
    }
}

impl Default for CrawlerSignatures {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURES)
    }
}
