//! JSON file [`GuildConfigStore`].
//!
//! Two files live in the data directory:
//!
//! - `achievement_channels.json`: `{"<guild id>": <channel id>}`
//! - `categories.json`: a versioned [`CategoryDocument`]
//!
//! Every operation re-reads the file it needs, so hand edits take effect without a
//! restart, and every write goes to a temporary file that is renamed over the original.
//!
//! Older `categories.json` shapes are upgraded by [`upgrade`]:
//!
//! | version | shape |
//! |---|---|
//! | 0 | `[{"name", "emoji"}]` with no guild at all |
//! | 1 | `{"<guild id>": [{"name", "emoji"}]}` |
//! | 2 | `{"schema_version": 2, "next_id", "guilds", "unclaimed"}` |
//!
//! Version 0 entries have no owner. They are parked in `unclaimed` and handed to the
//! first guild that touches its categories.

use super::{CategoryUpsert, GuildConfigStore, TicketCategory, remove_from, upsert_into};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// File holding the guild → achievement channel map
pub const CHANNELS_FILE: &str = "achievement_channels.json";
/// File holding the category document
pub const CATEGORIES_FILE: &str = "categories.json";
/// Version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Category entry of the pre-versioned formats, which carried no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCategory {
    /// Category label
    pub name: String,
    /// Category emoji
    #[serde(default)]
    pub emoji: String,
}

/// Current on-disk shape of `categories.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDocument {
    /// Always [`CURRENT_SCHEMA_VERSION`] once upgraded
    pub schema_version: u32,
    /// Next identifier to hand out; only ever increases
    pub next_id: i64,
    /// Categories per guild, keyed by the decimal guild ID
    #[serde(default)]
    pub guilds: BTreeMap<String, Vec<TicketCategory>>,
    /// Version 0 entries not yet assigned to a guild
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unclaimed: Vec<LegacyCategory>,
}

impl Default for CategoryDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            next_id: 1,
            guilds: BTreeMap::new(),
            unclaimed: Vec::new(),
        }
    }
}

impl CategoryDocument {
    /// Moves unclaimed legacy entries into `guild_key`. Returns whether anything moved.
    fn claim_unclaimed(&mut self, guild_key: &str) -> bool {
        if self.unclaimed.is_empty() {
            return false;
        }
        let legacy = std::mem::take(&mut self.unclaimed);
        let list = self.guilds.entry(guild_key.to_string()).or_default();
        for entry in legacy {
            upsert_into(list, &mut self.next_id, &entry.name, &entry.emoji);
        }
        info!(
            "Assigned legacy categories to guild {} ({} total)",
            guild_key,
            list.len()
        );
        true
    }
}

/// Any shape `categories.json` has had over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StoredCategories {
    /// Version 2 and later
    Versioned(CategoryDocument),
    /// Version 1
    GuildMap(BTreeMap<String, Vec<LegacyCategory>>),
    /// Version 0
    Legacy(Vec<LegacyCategory>),
}

impl StoredCategories {
    /// Schema version of the parsed document.
    #[must_use]
    pub const fn version(&self) -> u32 {
        match self {
            Self::Versioned(doc) => doc.schema_version,
            Self::GuildMap(_) => 1,
            Self::Legacy(_) => 0,
        }
    }
}

/// Upgrades any stored shape to the current [`CategoryDocument`].
///
/// Identifiers are assigned in guild-key order, then list order, starting at 1.
pub fn upgrade(stored: StoredCategories) -> Result<CategoryDocument> {
    match stored {
        StoredCategories::Versioned(doc) if doc.schema_version > CURRENT_SCHEMA_VERSION => {
            Err(Error::UnsupportedSchema {
                version: doc.schema_version,
                file: CATEGORIES_FILE.to_string(),
            })
        }
        StoredCategories::Versioned(mut doc) => {
            doc.schema_version = CURRENT_SCHEMA_VERSION;
            Ok(doc)
        }
        StoredCategories::GuildMap(map) => {
            let mut doc = CategoryDocument::default();
            for (guild_key, entries) in map {
                let list = doc.guilds.entry(guild_key).or_default();
                for entry in entries {
                    upsert_into(list, &mut doc.next_id, &entry.name, &entry.emoji);
                }
            }
            Ok(doc)
        }
        StoredCategories::Legacy(entries) => Ok(CategoryDocument {
            unclaimed: entries,
            ..CategoryDocument::default()
        }),
    }
}

/// Stores guild configuration as pretty-printed JSON files.
#[derive(Debug)]
pub struct JsonStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles across both files
    lock: Mutex<()>,
}

impl JsonStore {
    /// Opens (creating if needed) `data_dir` and upgrades `categories.json` if it is
    /// in an older format.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await?;
        let store = Self {
            data_dir,
            lock: Mutex::new(()),
        };

        let path = store.categories_path();
        if let Some(stored) = read_json::<StoredCategories>(&path).await? {
            let from = stored.version();
            if from < CURRENT_SCHEMA_VERSION {
                let doc = upgrade(stored)?;
                write_json(&path, &doc).await?;
                info!(
                    "Upgraded {} from schema v{} to v{}",
                    CATEGORIES_FILE, from, CURRENT_SCHEMA_VERSION
                );
            } else if from > CURRENT_SCHEMA_VERSION {
                upgrade(stored)?;
            }
        }

        Ok(store)
    }

    fn channels_path(&self) -> PathBuf {
        self.data_dir.join(CHANNELS_FILE)
    }

    fn categories_path(&self) -> PathBuf {
        self.data_dir.join(CATEGORIES_FILE)
    }

    async fn load_channels(&self) -> Result<BTreeMap<String, u64>> {
        Ok(read_json(&self.channels_path()).await?.unwrap_or_default())
    }

    async fn load_categories(&self) -> Result<CategoryDocument> {
        match read_json::<StoredCategories>(&self.categories_path()).await? {
            Some(stored) => upgrade(stored),
            None => Ok(CategoryDocument::default()),
        }
    }
}

#[async_trait]
impl GuildConfigStore for JsonStore {
    async fn announcement_channel(&self, guild_id: u64) -> Result<Option<u64>> {
        let _guard = self.lock.lock().await;
        let channels = self.load_channels().await?;
        Ok(channels.get(&guild_id.to_string()).copied())
    }

    async fn set_announcement_channel(&self, guild_id: u64, channel_id: u64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut channels = self.load_channels().await?;
        channels.insert(guild_id.to_string(), channel_id);
        write_json(&self.channels_path(), &channels).await
    }

    async fn categories(&self, guild_id: u64) -> Result<Vec<TicketCategory>> {
        let _guard = self.lock.lock().await;
        let key = guild_id.to_string();
        let mut doc = self.load_categories().await?;
        if doc.claim_unclaimed(&key) {
            write_json(&self.categories_path(), &doc).await?;
        }
        Ok(doc.guilds.remove(&key).unwrap_or_default())
    }

    async fn upsert_category(
        &self,
        guild_id: u64,
        name: &str,
        emoji: &str,
    ) -> Result<CategoryUpsert> {
        let _guard = self.lock.lock().await;
        let key = guild_id.to_string();
        let mut doc = self.load_categories().await?;
        doc.claim_unclaimed(&key);

        let CategoryDocument {
            guilds, next_id, ..
        } = &mut doc;
        let outcome = upsert_into(guilds.entry(key).or_default(), next_id, name, emoji);
        write_json(&self.categories_path(), &doc).await?;
        Ok(outcome)
    }

    async fn delete_category(&self, guild_id: u64, name: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let key = guild_id.to_string();
        let mut doc = self.load_categories().await?;
        let claimed = doc.claim_unclaimed(&key);

        let removed = doc
            .guilds
            .get_mut(&key)
            .is_some_and(|list| remove_from(list, name));
        if removed || claimed {
            write_json(&self.categories_path(), &doc).await?;
        }
        Ok(removed)
    }
}

/// Reads and parses a JSON file.
///
/// A missing file yields `None`. A file that fails to parse is moved aside to
/// `<name>.corrupt` and also yields `None`, so the next write starts clean without
/// destroying the unreadable data.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let aside = path.with_extension("json.corrupt");
            warn!(
                "Could not parse {:?} ({}); moving it to {:?} and starting empty",
                path, e, aside
            );
            tokio::fs::rename(path, &aside).await?;
            Ok(None)
        }
    }
}

/// Serializes `value` as pretty JSON and atomically replaces `path`.
async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!("Wrote {:?}", path);
    Ok(())
}
