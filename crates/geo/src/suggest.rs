//! Address input assist.

/// Queries shorter than this return no suggestions.
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Substring search over a curated list of example addresses.
#[derive(Debug, Clone)]
pub struct AddressSuggestionIndex {
    entries: Vec<String>,
}

impl AddressSuggestionIndex {
    /// Builds an index over the given addresses, kept in order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Common Jakarta street addresses.
    pub fn jakarta() -> Self {
        Self::new(jakarta_addresses())
    }

    /// Case-insensitive substring matches in list order, at most
    /// [`MAX_SUGGESTIONS`].
    ///
    /// # Example
    /// ```
    /// use shopfusion_geo::AddressSuggestionIndex;
    ///
    /// let index = AddressSuggestionIndex::jakarta();
    /// assert!(index.suggest("th").is_empty());
    /// assert_eq!(index.suggest("tha"), vec!["Jl. Thamrin, Jakarta Pusat"]);
    /// ```
    pub fn suggest(&self, input: &str) -> Vec<&str> {
        if input.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let needle = input.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect()
    }

    /// All indexed addresses.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for AddressSuggestionIndex {
    fn default() -> Self {
        Self::jakarta()
    }
}

pub(crate) fn jakarta_addresses() -> Vec<String> {
    [
        "Jl. Thamrin, Jakarta Pusat",
        "Jl. Sudirman, Jakarta Selatan",
        "Jl. Gatot Subroto, Jakarta Selatan",
        "Jl. Kuningan, Jakarta Selatan",
        "Jl. Kemang, Jakarta Selatan",
        "Jl. Pondok Indah, Jakarta Selatan",
        "Jl. Kelapa Gading, Jakarta Utara",
        "Jl. Sunter, Jakarta Utara",
        "Jl. Puri Indah, Jakarta Barat",
        "Jl. Kebon Jeruk, Jakarta Barat",
        "Jl. Cakung, Jakarta Timur",
        "Jl. Rawamangun, Jakarta Timur",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
