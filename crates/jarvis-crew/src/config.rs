use jarvis_core::JarvisResult;
use jarvis_tools::{Credential, ToolSelection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const ENV_OPENAI_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_GOOGLE_KEY: &str = "GOOGLE_AI_API_KEY";
pub const ENV_SERPER_KEY: &str = "SERPER_API_KEY";
pub const ENV_FIRECRAWL_KEY: &str = "FIRECRAWL_API_KEY";
pub const ENV_MODEL_PROVIDER: &str = "CREWAI_MODEL_PROVIDER";
pub const ENV_MODEL_NAME: &str = "CREWAI_MODEL_NAME";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_WORKSPACE: &str = "JARVIS_WORKSPACE";
pub const ENV_CREW_ENDPOINT: &str = "JARVIS_CREW_ENDPOINT";
pub const ENV_CREW_TOKEN: &str = "JARVIS_CREW_TOKEN";

/// Provider credentials. Empty strings count as absent.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub openai: Option<String>,
    #[serde(default)]
    pub anthropic: Option<String>,
    #[serde(default)]
    pub google: Option<String>,
    #[serde(default)]
    pub serper: Option<String>,
    #[serde(default)]
    pub firecrawl: Option<String>,
}

impl ApiKeys {
    pub const PROVIDERS: [&'static str; 5] = ["openai", "anthropic", "google", "serper", "firecrawl"];

    /// Look a credential up by provider name.
    pub fn get(&self, provider: &str) -> Option<&str> {
        let slot = match provider {
            "openai" => &self.openai,
            "anthropic" => &self.anthropic,
            "google" => &self.google,
            "serper" => &self.serper,
            "firecrawl" => &self.firecrawl,
            _ => return None,
        };
        slot.as_deref().filter(|k| !k.is_empty())
    }

    pub fn has(&self, provider: &str) -> bool {
        self.get(provider).is_some()
    }

    /// Provider names with a usable credential.
    pub fn present(&self) -> Vec<&'static str> {
        Self::PROVIDERS
            .into_iter()
            .filter(|p| self.has(p))
            .collect()
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dbg = f.debug_struct("ApiKeys");
        for provider in Self::PROVIDERS {
            let shown = if self.has(provider) { "<redacted>" } else { "<unset>" };
            dbg.field(provider, &shown);
        }
        dbg.finish()
    }
}

/// LLM provider the crew's agents talk to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelProvider {
    #[default]
    OpenAi,
    Anthropic,
    Google,
    /// Any provider the runtime understands that Jarvis has no key slot for.
    Other(String),
}

impl From<String> for ModelProvider {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => ModelProvider::OpenAi,
            "anthropic" | "claude" => ModelProvider::Anthropic,
            "google" | "gemini" => ModelProvider::Google,
            _ => ModelProvider::Other(s.trim().to_string()),
        }
    }
}

impl From<ModelProvider> for String {
    fn from(p: ModelProvider) -> Self {
        p.to_string()
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProvider::OpenAi => write!(f, "openai"),
            ModelProvider::Anthropic => write!(f, "anthropic"),
            ModelProvider::Google => write!(f, "google"),
            ModelProvider::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Model settings shared by every agent in a crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ModelConfig {
    /// The API key for the configured provider, if one is set.
    pub fn credential<'a>(&self, keys: &'a ApiKeys) -> Option<&'a str> {
        match &self.provider {
            ModelProvider::OpenAi => keys.get("openai"),
            ModelProvider::Anthropic => keys.get("anthropic"),
            ModelProvider::Google => keys.get("google"),
            ModelProvider::Other(_) => None,
        }
    }

    /// `provider/model` identifier in the form crew runtimes expect.
    pub fn llm_id(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

/// Location of the Jarvis workspace and its roo-commander directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceLayout {
    #[serde(default = "default_workspace_root")]
    pub root: PathBuf,
}

fn default_workspace_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
        }
    }
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn roo_dir(&self) -> PathBuf {
        self.root.join(".roo")
    }

    pub fn ruru_dir(&self) -> PathBuf {
        self.root.join(".ruru")
    }
}

/// Where the crew runtime service lives.
#[derive(Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Everything the crew layer reads from the outside world.
///
/// Built once at start-up and passed by reference; nothing here is global.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JarvisConfig {
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub workspace: WorkspaceLayout,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl JarvisConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(lookup);
        config
    }

    pub fn from_toml_str(s: &str) -> JarvisResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read `path` if it exists, then layer `.env` and the process
    /// environment on top. A missing file is not an error.
    pub fn load(path: impl AsRef<Path>) -> JarvisResult<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            info!(path = %path.display(), "Loaded config file");
            Self::from_toml_str(&raw)?
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };
        load_dotenv();
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields with any non-empty variable returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let slots = [
            (ENV_OPENAI_KEY, &mut self.api_keys.openai),
            (ENV_ANTHROPIC_KEY, &mut self.api_keys.anthropic),
            (ENV_GOOGLE_KEY, &mut self.api_keys.google),
            (ENV_SERPER_KEY, &mut self.api_keys.serper),
            (ENV_FIRECRAWL_KEY, &mut self.api_keys.firecrawl),
            (ENV_DATABASE_URL, &mut self.database_url),
            (ENV_CREW_ENDPOINT, &mut self.runtime.endpoint),
            (ENV_CREW_TOKEN, &mut self.runtime.token),
        ];
        for (key, slot) in slots {
            if let Some(value) = var(key) {
                *slot = Some(value);
            }
        }

        if let Some(provider) = var(ENV_MODEL_PROVIDER) {
            self.model.provider = ModelProvider::from(provider);
        }
        if let Some(model) = var(ENV_MODEL_NAME) {
            self.model.model = model;
        }
        if let Some(root) = var(ENV_WORKSPACE) {
            self.workspace.root = PathBuf::from(root);
        }
    }

    /// Credentials and database settings that gate optional tools.
    pub fn tool_selection(&self) -> ToolSelection {
        let mut selection = ToolSelection::new();
        if self.api_keys.has("serper") {
            selection = selection.with_credential(Credential::Serper);
        }
        if self.api_keys.has("firecrawl") {
            selection = selection.with_credential(Credential::Firecrawl);
        }
        if let Some(url) = self.database_url.as_deref().filter(|u| !u.is_empty()) {
            selection = selection
                .with_credential(Credential::Database)
                .with_database_url(url);
        }
        selection
    }

    /// Log settings that are present but unusable. Never fails.
    pub fn warn_on_gaps(&self) {
        if self.model.credential(&self.api_keys).is_none() {
            warn!(
                provider = %self.model.provider,
                "No API key configured for the model provider"
            );
        }
        if !self.workspace.roo_dir().is_dir() {
            debug!(path = %self.workspace.roo_dir().display(), ".roo directory not found");
        }
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to parse .env"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = JarvisConfig::from_lookup(|_| None);
        assert_eq!(config.model.provider, ModelProvider::OpenAi);
        assert_eq!(config.model.model, "gpt-4");
        assert!((config.model.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.model.max_tokens, 4000);
        assert!(config.api_keys.present().is_empty());
        assert!(config.database_url.is_none());
        assert_eq!(config.runtime.timeout_secs, 600);
    }

    #[test]
    fn test_env_values() {
        let config = JarvisConfig::from_lookup(lookup(&[
            (ENV_OPENAI_KEY, "sk-test"),
            (ENV_SERPER_KEY, "serper"),
            (ENV_MODEL_PROVIDER, "Anthropic"),
            (ENV_MODEL_NAME, "claude-sonnet-4"),
            (ENV_WORKSPACE, "/srv/jarvis"),
        ]));
        assert_eq!(config.api_keys.get("openai"), Some("sk-test"));
        assert_eq!(config.api_keys.present(), vec!["openai", "serper"]);
        assert_eq!(config.model.provider, ModelProvider::Anthropic);
        assert_eq!(config.model.llm_id(), "anthropic/claude-sonnet-4");
        assert_eq!(config.workspace.roo_dir(), PathBuf::from("/srv/jarvis/.roo"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let config = JarvisConfig::from_lookup(lookup(&[
            (ENV_SERPER_KEY, ""),
            (ENV_MODEL_NAME, "  "),
        ]));
        assert!(!config.api_keys.has("serper"));
        assert_eq!(config.model.model, "gpt-4");
    }

    #[test]
    fn test_unknown_provider_kept() {
        let config = JarvisConfig::from_lookup(lookup(&[(ENV_MODEL_PROVIDER, "ollama")]));
        assert_eq!(config.model.provider, ModelProvider::Other("ollama".to_string()));
        assert_eq!(config.model.credential(&config.api_keys), None);
    }

    #[test]
    fn test_credential_follows_provider() {
        let config = JarvisConfig::from_lookup(lookup(&[
            (ENV_GOOGLE_KEY, "g-key"),
            (ENV_MODEL_PROVIDER, "gemini"),
        ]));
        assert_eq!(config.model.credential(&config.api_keys), Some("g-key"));
    }

    #[test]
    fn test_tool_selection() {
        let config = JarvisConfig::from_lookup(lookup(&[
            (ENV_FIRECRAWL_KEY, "fc"),
            (ENV_DATABASE_URL, "postgresql://db/jarvis"),
        ]));
        let selection = config.tool_selection();
        assert!(selection.has(Credential::Firecrawl));
        assert!(!selection.has(Credential::Serper));
        assert_eq!(selection.database_url.as_deref(), Some("postgresql://db/jarvis"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = JarvisConfig::from_lookup(lookup(&[
            (ENV_OPENAI_KEY, "sk-very-secret"),
            (ENV_CREW_TOKEN, "tok-very-secret"),
        ]));
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("very-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_toml_overlay() {
        let mut config = JarvisConfig::from_toml_str(
            r#"
            database_url = "mysql://db/jarvis"

            [model]
            provider = "google"
            model = "gemini-2.0-flash"
            temperature = 0.2

            [runtime]
            endpoint = "http://localhost:8000"
            "#,
        )
        .unwrap();
        assert_eq!(config.model.provider, ModelProvider::Google);
        assert_eq!(config.model.max_tokens, 4000);
        assert_eq!(config.runtime.endpoint.as_deref(), Some("http://localhost:8000"));

        config.apply_env(lookup(&[(ENV_MODEL_NAME, "gemini-2.5-pro")]));
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert!((config.model.temperature - 0.2).abs() < f32::EPSILON);
    }
}
