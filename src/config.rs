#[derive(Debug, Clone)]
pub struct AppConfig {
    pub zone_name: String,
    pub registry_txt: bool,
    pub txt_owner_id: String,
    pub txt_prefix: String, // "_external-dns.", unless overridden
}

impl AppConfig {
    /// Canonical zone name without trailing dot.
    pub fn zone_root(&self) -> &str {
        self.zone_name.trim_end_matches('.')
    }

    /// Absolute suffix used when trimming record names (e.g. ".example.com").
    pub fn zone_suffix(&self) -> String {
        format!(".{}", self.zone_root())
    }
}
