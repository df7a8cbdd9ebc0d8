use crate::config::ServiceConfig;
use crate::error::{Result, SpellerError};
use reqwest::header::REFERER;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// The remote side of both commands. Responses are raw HTML.
#[allow(async_fn_in_trait)]
pub trait SpellService {
    async fn check(&self, text: &str) -> Result<String>;
    async fn suggest(&self, word: &str) -> Result<String>;
}

/// Collapse every whitespace run into a single `+`
pub fn join_words(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("+")
}

/// `join_words`, with each token percent-encoded so a literal `+` survives
fn encode_doc(text: &str) -> String {
    text.split_whitespace()
        .map(|token| byte_serialize(token.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("+")
}

pub struct HttpSpellService {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl HttpSpellService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn check_url(&self, text: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.check_url)?;
        url.set_query(Some(&format!(
            "doc={}&out=T&suggest=yes",
            encode_doc(text)
        )));
        Ok(url)
    }

    pub fn suggest_url(&self, word: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.suggest_url)?;
        url.query_pairs_mut().clear().append_pair("word", word);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<String> {
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(REFERER, &self.config.referer)
            .send()
            .await
            .map_err(|e| SpellerError::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            // The body is still scraped; it just won't match anything
            log::warn!("{} answered with HTTP {}", url, status);
        } else {
            log::debug!("{} answered with HTTP {}", url, status);
        }

        response
            .text()
            .await
            .map_err(|e| SpellerError::transport(url.as_str(), e))
    }
}

impl SpellService for HttpSpellService {
    async fn check(&self, text: &str) -> Result<String> {
        let url = self.check_url(text)?;
        self.fetch(url).await
    }

    async fn suggest(&self, word: &str) -> Result<String> {
        let url = self.suggest_url(word)?;
        self.fetch(url).await
    }
}
