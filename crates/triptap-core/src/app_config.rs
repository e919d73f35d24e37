#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub google_api_key: String,
    pub places_base_url: String,
    pub maps_base_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub search_radius_meters: f64,
    pub min_rating: f64,
    pub min_rating_count: u32,
    pub max_concurrent_entries: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("google_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("maps_base_url", &self.maps_base_url)
            .field("geocoder_url", &self.geocoder_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("min_rating", &self.min_rating)
            .field("min_rating_count", &self.min_rating_count)
            .field("max_concurrent_entries", &self.max_concurrent_entries)
            .finish()
    }
}
