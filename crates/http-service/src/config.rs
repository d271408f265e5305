use std::fmt::Debug;

const DEFAULT_ASSISTANT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_DIAGNOSIS_BASE_URL: &str = "http://localhost:8005";

/// Builder for [`HttpServiceConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpServiceConfigBuilder {
    assistant_base_url: Option<String>,
    diagnosis_base_url: Option<String>,
}

impl HttpServiceConfigBuilder {
    /// Creates a builder with every option left to its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the assistant service.
    #[inline]
    pub fn with_assistant_base_url<S: Into<String>>(
        mut self,
        base_url: S,
    ) -> Self {
        self.assistant_base_url = Some(base_url.into());
        self
    }

    /// Sets the base URL of the diagnosis service.
    #[inline]
    pub fn with_diagnosis_base_url<S: Into<String>>(
        mut self,
        base_url: S,
    ) -> Self {
        self.diagnosis_base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpServiceConfig {
        HttpServiceConfig {
            assistant_base_url: normalize(
                self.assistant_base_url,
                DEFAULT_ASSISTANT_BASE_URL,
            ),
            diagnosis_base_url: normalize(
                self.diagnosis_base_url,
                DEFAULT_DIAGNOSIS_BASE_URL,
            ),
        }
    }
}

fn normalize(base_url: Option<String>, default: &str) -> String {
    let base_url = base_url.unwrap_or_else(|| default.to_owned());
    base_url.trim_end_matches('/').to_owned()
}

/// Configuration for the HTTP services.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpServiceConfig {
    pub(crate) assistant_base_url: String,
    pub(crate) diagnosis_base_url: String,
}

impl HttpServiceConfig {
    /// Returns the base URL of the assistant service.
    #[inline]
    pub fn assistant_base_url(&self) -> &str {
        &self.assistant_base_url
    }

    /// Returns the base URL of the diagnosis service.
    #[inline]
    pub fn diagnosis_base_url(&self) -> &str {
        &self.diagnosis_base_url
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat", self.assistant_base_url)
    }

    pub(crate) fn diagnose_url(&self) -> String {
        format!("{}/diagnose/", self.diagnosis_base_url)
    }

    pub(crate) fn download_url(&self) -> String {
        format!("{}/download/", self.diagnosis_base_url)
    }
}

impl Default for HttpServiceConfig {
    #[inline]
    fn default() -> Self {
        HttpServiceConfigBuilder::new().build()
    }
}
