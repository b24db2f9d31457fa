use reqwest::Client;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Where the API lives and how to talk to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The root of the REST API (e.g. `http://localhost:5000/api`).
    pub base_url: Url,
    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
    pub user_agent: String,
    /// Give up on requests which take longer than this.
    pub timeout: Option<Duration>,
}

impl Config {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api";
    pub const DEFAULT_TOKEN_FILE: &'static str = ".craftpanel/session.json";

    pub fn new(base_url: Url) -> Self {
        Config {
            base_url,
            token_file: PathBuf::from(Config::DEFAULT_TOKEN_FILE),
            user_agent: String::from(crate::DEFAULT_USER_AGENT),
            timeout: None,
        }
    }

    /// Create the HTTP client every request will be sent through.
    pub fn http_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder =
            Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}

impl Default for Config {
    fn default() -> Self {
        let base_url = Url::parse(Config::DEFAULT_BASE_URL)
            .expect("The default base URL is always valid");

        Config::new(base_url)
    }
}
