//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider and role. Two roles are used by the pipeline:
//!
//! - **Completion** → text generation (expansion, intent, self-query, answers)
//! - **Embedding**  → dense vector generator (indexing, search, reranking)
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (`openai` default, or `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY`   = API key (mandatory)
//! - `OPENAI_MODEL`     = completion model (mandatory)
//! - `OPENAI_ENDPOINT`  = API base URL (optional, default `https://api.openai.com`)
//! - `EMBEDDING_MODEL`  = embedding model (mandatory)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = completion model (mandatory)
//! - `EMBEDDING_MODEL`             = embedding model (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_u32, must_env},
};

/// Resolves the provider kind from `LLM_KIND` (defaults to OpenAI).
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown kind string.
pub fn provider_kind() -> Result<LlmProvider, LlmError> {
    match std::env::var("LLM_KIND") {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "" | "openai" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        },
        Err(_) => Ok(LlmProvider::OpenAI),
    }
}

/// Constructs the **completion** config for the configured provider.
///
/// # Errors
/// Propagates missing/invalid environment variables.
pub fn config_completion() -> Result<LlmModelConfig, LlmError> {
    match provider_kind()? {
        LlmProvider::OpenAI => config_openai_completion(),
        LlmProvider::Ollama => config_ollama_completion(),
    }
}

/// Constructs the **embedding** config for the configured provider.
///
/// # Errors
/// Propagates missing/invalid environment variables.
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    match provider_kind()? {
        LlmProvider::OpenAI => config_openai_embedding(),
        LlmProvider::Ollama => config_ollama_embedding(),
    }
}

/// Resolves the OpenAI endpoint (default `https://api.openai.com`).
fn openai_endpoint() -> String {
    std::env::var("OPENAI_ENDPOINT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.openai.com".to_string())
}

/// Constructs a config for the **completion** OpenAI model.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic pipeline steps)
/// - `timeout_secs = Some(60)`
pub fn config_openai_completion() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let model = must_env("OPENAI_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint: openai_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **embedding** OpenAI model.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `timeout_secs = Some(30)`
pub fn config_openai_embedding() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint: openai_endpoint(),
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(30),
    })
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(LlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs a config for the **completion** Ollama model.
///
/// # Env
/// - `OLLAMA_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)`
/// - `timeout_secs = Some(120)`
pub fn config_ollama_completion() -> Result<LlmModelConfig, LlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs a config for the **embedding** Ollama model.
///
/// # Env
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, LlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
