use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOG_FILE: &str = "program.log";

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot start without.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl CredentialSet {
    /// Read and validate credentials through `lookup`.
    ///
    /// Every missing (or blank) name is collected into a single error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut read = |key: &str| match lookup(key).and_then(non_empty) {
            Some(v) => v,
            None => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(Error::Credential { missing });
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Typed configuration, built once at startup and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: CredentialSet,
    pub chat_id: ChatId,
    pub endpoint: String,
    pub retry_period: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Build from `lookup` (use [`env_var`] for the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = CredentialSet::from_lookup(&lookup)?;

        let chat_id = ChatId::parse(&credentials.telegram_chat_id);

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_period = match parse_secs(&lookup, "RETRY_PERIOD_SECS")? {
            Some(d) if d.is_zero() => {
                return Err(Error::Config(
                    "RETRY_PERIOD_SECS must be greater than zero".to_string(),
                ))
            }
            Some(d) => d,
            None => DEFAULT_RETRY_PERIOD,
        };
        let http_timeout = parse_secs(&lookup, "HTTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_HTTP_TIMEOUT);

        Ok(Self {
            credentials,
            chat_id,
            endpoint,
            retry_period,
            http_timeout,
        })
    }
}

/// Log file path: `HWBOT_LOG_FILE`, `program.log` when unset, none when set to empty.
pub fn log_file() -> Option<PathBuf> {
    match env_var("HWBOT_LOG_FILE") {
        Some(v) => non_empty(v).map(PathBuf::from),
        None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
    }
}

/// Load `KEY=VALUE` pairs from `path` into the environment.
///
/// Variables already set in the environment win.
pub fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    contents
        .lines()
        .filter_map(dotenv_entry)
        .filter(|(key, _)| env::var_os(key).is_none())
        .for_each(|(key, val)| env::set_var(key, val));
}

/// `[export ]KEY=VALUE`, value optionally quoted. Comments and malformed lines yield `None`.
fn dotenv_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let (key, val) = line
        .strip_prefix("export ")
        .unwrap_or(line)
        .split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(val.trim())))
}

fn unquote(val: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| val.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(val)
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|s| Some(Duration::from_secs(s)))
        .map_err(|_| Error::Config(format!("{key} must be a whole number of seconds, got {raw:?}")))
}

pub fn env_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
