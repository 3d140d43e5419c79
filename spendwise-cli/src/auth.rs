//! Provider credentials in `~/.spendwise/auth.json`, with environment
//! variables filling any key the file leaves unset.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

use crate::llm::Provider;
use crate::state::ensure_spendwise_home;

pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_KEY_ENV: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthState {
    pub anthropic_token: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Provider {
    pub fn key_env(self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_KEY_ENV,
            Provider::Anthropic => ANTHROPIC_KEY_ENV,
        }
    }

    fn key_prefix(self) -> &'static str {
        match self {
            Provider::OpenAI => "sk-",
            Provider::Anthropic => "sk-ant-",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

impl AuthState {
    pub fn key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_token.as_deref(),
        }
    }

    fn slot_mut(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::OpenAI => &mut self.openai_api_key,
            Provider::Anthropic => &mut self.anthropic_token,
        }
    }

    /// Fill unset keys from the environment.
    pub fn with_env_fallback(self) -> Self {
        self.fill_from(|name| std::env::var(name).ok())
    }

    fn fill_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for provider in [Provider::OpenAI, Provider::Anthropic] {
            let slot = self.slot_mut(provider);
            if slot.is_none() {
                *slot = lookup(provider.key_env()).filter(|k| !k.trim().is_empty());
            }
        }
        self
    }
}

fn auth_path() -> Result<std::path::PathBuf> {
    Ok(ensure_spendwise_home()?.join("auth.json"))
}

pub fn load_auth() -> Result<AuthState> {
    let p = auth_path()?;
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn check_key(provider: Provider, pasted: &str) -> Result<String> {
    let key = pasted.trim();
    if !key.starts_with(provider.key_prefix()) {
        bail!(
            "key didn't look like an {} key (expected prefix {})",
            provider.display_name(),
            provider.key_prefix()
        );
    }
    Ok(key.to_string())
}

/// Prompt for a key on stdin and store it for `provider`.
pub fn paste_key(provider: Provider) -> Result<()> {
    print!("Paste {} API key (starts with {}): ", provider.display_name(), provider.key_prefix());
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let key = check_key(provider, &line)?;
    let mut auth = load_auth()?;
    *auth.slot_mut(provider) = Some(key);
    save_auth(&auth)?;
    println!("Saved {} key to ~/.spendwise/auth.json", provider.display_name());
    Ok(())
}
