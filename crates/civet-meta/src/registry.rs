//! Registries of known names for validation

/// Palette used when a display trait names no colour scheme.
pub const DEFAULT_PALETTE: &str = "default";

/// Registry of colour schemes a display trait may use
pub struct PaletteRegistry {
    known: Vec<&'static str>,
}

impl PaletteRegistry {
    /// The matplotlib colour maps the report renderer understands.
    pub fn with_builtins() -> Self {
        let known = vec![
            "viridis", "plasma", "inferno", "magma", "cividis", "Greys",
            "Purples", "Blues", "Greens", "Oranges", "Reds",
            "YlOrBr", "YlOrRd", "OrRd", "PuRd", "RdPu", "BuPu",
            "GnBu", "PuBu", "YlGnBu", "PuBuGn", "BuGn", "YlGn",
            "binary", "gist_yarg", "gist_gray", "gray", "bone", "pink",
            "spring", "summer", "autumn", "winter", "cool", "Wistia",
            "hot", "afmhot", "gist_heat", "copper",
            "PiYG", "PRGn", "BrBG", "PuOr", "RdGy", "RdBu",
            "RdYlBu", "RdYlGn", "Spectral", "coolwarm", "bwr", "seismic",
            "twilight", "twilight_shifted", "hsv",
            "Pastel1", "Pastel2", "Paired", "Accent",
            "Dark2", "Set1", "Set2", "Set3",
            "tab10", "tab20", "tab20b", "tab20c",
            "flag", "prism", "ocean", "gist_earth", "terrain", "gist_stern",
            "gnuplot", "gnuplot2", "CMRmap", "cubehelix", "brg",
            "gist_rainbow", "rainbow", "jet", "nipy_spectral", "gist_ncar",
        ];
        Self { known }
    }

    /// Palette names are case-sensitive (`Blues`, not `blues`).
    pub fn is_known(&self, name: &str) -> bool {
        name == DEFAULT_PALETTE || self.known.contains(&name)
    }

    pub fn list_known(&self) -> Vec<&'static str> {
        self.known.clone()
    }
}

/// Registry of sequencing centres with a report header image
pub struct SequencingCentreRegistry {
    known: Vec<&'static str>,
}

impl SequencingCentreRegistry {
    /// Header used when no centre is requested.
    pub const DEFAULT: &'static str = "DEFAULT";

    pub fn with_builtins() -> Self {
        let known = vec![
            "PHEC", "LIVE", "BIRM", "PHWC", "CAMB", "NORW", "GLAS", "EDIN", "SHEF",
            "EXET", "NOTT", "PORT", "OXON", "NORT", "NIRE", "GSTT", "LOND", "SANG",
        ];
        Self { known }
    }

    pub fn is_known(&self, code: &str) -> bool {
        code == Self::DEFAULT || self.known.contains(&code)
    }

    pub fn list_known(&self) -> Vec<&'static str> {
        self.known.clone()
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Default for SequencingCentreRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
