use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Parser, Debug, Clone)]
#[command(name = "cards-service")]
#[command(about = "Card issuing service keyed by customer mobile number")]
#[command(version)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "9000")]
    pub port: u16,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://cards.db?mode=rwc")]
    pub database_url: String,

    /// Version string reported by /api/build-info
    #[arg(long, env = "BUILD_VERSION", default_value = "1.0")]
    pub build_version: String,

    /// Greeting returned by /api/contact-info
    #[arg(long, env = "CARDS_MESSAGE", default_value = "Welcome to the cards service")]
    pub message: String,

    /// Contact details as comma separated key=value pairs
    #[arg(long, env = "CARDS_CONTACT_DETAILS", value_delimiter = ',', value_parser = parse_key_val)]
    pub contact_details: Vec<(String, String)>,

    /// On-call support numbers, comma separated
    #[arg(long, env = "CARDS_ON_CALL_SUPPORT", value_delimiter = ',')]
    pub on_call_support: Vec<String>,
}

/// Support contacts published by the service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub message: String,
    pub contact_details: BTreeMap<String, String>,
    pub on_call_support: Vec<String>,
}

impl Config {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            message: self.message.clone(),
            contact_details: self.contact_details.iter().cloned().collect(),
            on_call_support: self.on_call_support.clone(),
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no `=` found in `{s}`"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
