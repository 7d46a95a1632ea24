//! Profile configuration.
//!
//! Each top-level table of `~/.config/orgcal/config.toml` is a profile:
//!
//! ```toml
//! [work]
//! tokenfile = "~/.config/orgcal/work-token.json"
//! orgfile = "~/org/work-calendar.org"
//! titlefilters = ["Standup"]
//!
//! Older files may carry a `tagname` key; it is accepted and ignored.
//!
//! [work.calendars]
//! main = "me@example.com"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use orgcal_core::CalendarSpec;
use serde::Deserialize;

/// Raw profile as written in the file. Validated into [`Profile`].
#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    tokenfile: Option<String>,
    orgfile: Option<String>,
    timezone: Option<String>,
    #[serde(default)]
    calendars: toml::Table,
    #[serde(default)]
    titlefilters: Vec<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
}

/// OAuth client credentials, only needed to refresh an expired token
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
}

/// A validated profile.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub token_file: PathBuf,
    /// Where the agenda goes; `None` or `-` means stdout
    pub org_file: Option<String>,
    /// Display timezone; the system timezone when unset
    pub timezone: Option<Tz>,
    /// Approved calendars in file order, tags upper-cased
    pub calendars: Vec<CalendarSpec>,
    pub title_filters: Vec<String>,
    pub oauth_client: Option<OAuthClient>,
}

/// The parsed config file.
#[derive(Debug)]
pub struct Config {
    profiles: toml::Table,
}

/// Get the config file path (~/.config/orgcal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("orgcal");
    Ok(config_dir.join("config.toml"))
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with one table per profile:\n\n\
            [work]\n\
            tokenfile = \"~/.config/orgcal/work-token.json\"\n\
            orgfile = \"~/org/work-calendar.org\"\n\n\
            [work.calendars]\n\
            main = \"me@example.com\"",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    Config::parse(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self> {
        let profiles: toml::Table = toml::from_str(contents)?;
        Ok(Config { profiles })
    }

    /// Profile names in file order.
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles
            .iter()
            .filter(|(_, v)| v.is_table())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Look up and validate the named profile.
    pub fn profile(&self, name: &str) -> Result<Profile> {
        let value = self
            .profiles
            .get(name)
            .filter(|v| v.is_table())
            .with_context(|| format!("No profile named '{}' in configuration", name))?;

        let raw: RawProfile = value
            .clone()
            .try_into()
            .with_context(|| format!("Invalid profile '{}'", name))?;

        Profile::from_raw(name, raw)
    }
}

impl Profile {
    fn from_raw(name: &str, raw: RawProfile) -> Result<Self> {
        let token_file = match raw.tokenfile.as_deref() {
            Some(t) if !t.is_empty() => expand_path(t),
            _ => anyhow::bail!("Profile '{}': tokenfile not specified", name),
        };

        let org_file = raw
            .orgfile
            .filter(|f| !f.is_empty())
            .map(|f| expand_path(&f).to_string_lossy().into_owned());

        let timezone = raw
            .timezone
            .as_deref()
            .map(|tz| {
                tz.parse::<Tz>().map_err(|e| {
                    anyhow::anyhow!("Profile '{}': unknown timezone '{}': {}", name, tz, e)
                })
            })
            .transpose()?;

        let mut calendars = Vec::new();
        for (tag, id) in &raw.calendars {
            let id = id.as_str().with_context(|| {
                format!("Profile '{}': calendar '{}' must be a string id", name, tag)
            })?;
            calendars.push(CalendarSpec::new(tag.to_uppercase(), id));
        }

        if calendars.is_empty() {
            anyhow::bail!("Profile '{}': no calendar is specified", name);
        }

        let oauth_client = match (raw.client_id, raw.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(OAuthClient {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Profile {
            name: name.to_string(),
            token_file,
            org_file,
            timezone,
            calendars,
            title_filters: raw.titlefilters,
            oauth_client,
        })
    }
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
