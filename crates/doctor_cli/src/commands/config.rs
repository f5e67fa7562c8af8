//! `doctor config`: credential status and effective settings.

use std::env;

use anyhow::Result;
use doctor_core::DoctorSettings;
use doctor_llms::{OpenAIConfig, OpenAIProvider};

use crate::output;

pub fn handle() -> Result<()> {
    let settings = DoctorSettings::from_env()?;

    output::header("Integration doctor configuration");

    let key_status = match env::var(OpenAIProvider::API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => mask_key(key.trim()),
        _ => "(not set, rules-only mode)".to_string(),
    };
    output::kv(OpenAIProvider::API_KEY_ENV, &key_status);

    let base_url = env::var(OpenAIProvider::BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| OpenAIConfig::new("").with_base_url(v).base_url)
        .unwrap_or_else(|| format!("{} (default)", OpenAIConfig::DEFAULT_BASE_URL));
    output::kv(OpenAIProvider::BASE_URL_ENV, &base_url);

    output::kv("model", &settings.model);
    output::kv("temperature", &settings.temperature.to_string());
    output::kv("timeout", &format!("{}s", settings.timeout_secs));
    output::kv(
        "max_tokens",
        &settings
            .max_tokens
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(provider default)".to_string()),
    );

    if !output::is_json() {
        println!();
        output::dim("Set values in .env or ~/.doctor/env (OPENAI_API_KEY, DOCTOR_MODEL, ...).");
    }
    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
