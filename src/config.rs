use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub scheduler_base_url: Option<String>,
    pub scheduler_username: Option<String>,
    pub scheduler_password: Option<String>,
    pub site_password: Option<String>,
    pub octopus_api_base: String,
    pub octopus_api_key: Option<String>,
    pub octopus_list_id: Option<String>,
}

impl Config {
    /// Reads configuration from the environment. Secrets are optional here:
    /// a handler that needs a missing secret answers 500 at call time instead
    /// of crashing the whole process at startup.
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            scheduler_base_url: env::var("LIBREBOOKING_API_BASE").ok(),
            scheduler_username: env::var("LIBREBOOKING_USERNAME").ok(),
            scheduler_password: env::var("LIBREBOOKING_PASSWORD").ok(),
            site_password: env::var("OWNER_PASS").ok(),
            octopus_api_base: env::var("OCTOPUS_API_BASE")
                .unwrap_or_else(|_| "https://api.emailoctopus.com".to_string()),
            octopus_api_key: env::var("OCTOPUS_KEY").ok(),
            octopus_list_id: env::var("OCTOPUS_LIST").ok(),
        }
    }

    /// Scheduler credentials as a unit, or `None` if any piece is missing.
    pub fn scheduler_credentials(&self) -> Option<SchedulerConfig> {
        Some(SchedulerConfig {
            base_url: self.scheduler_base_url.clone()?,
            username: self.scheduler_username.clone()?,
            password: self.scheduler_password.clone()?,
        })
    }
}

#[derive(Clone)]
pub struct SchedulerConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}
