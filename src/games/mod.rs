use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameAssets {
    #[serde(default)]
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    #[serde(default)]
    pub favorite: bool,
    /// Stored as epoch seconds. Zero and absent both mean "never played".
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub last_played: Option<DateTime<Utc>>,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub players: u32,
    /// Fraction between 0.0 and 1.0.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub assets: GameAssets,
}

impl Game {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// True when the game carries a play timestamp after the epoch.
    pub fn has_been_played(&self) -> bool {
        self.last_played.is_some_and(|at| at.timestamp() > 0)
    }
}

/// Read-only, ordered view over games with indexed access.
///
/// `get` yields `None` for an empty slot; filter predicates treat a missing
/// game as non-matching.
pub trait GameList {
    fn count(&self) -> usize;
    fn get(&self, index: usize) -> Option<&Game>;
}

impl GameList for [Game] {
    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&Game> {
        <[Game]>::get(self, index)
    }
}

impl GameList for Vec<Game> {
    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&Game> {
        self.as_slice().get(index)
    }
}

impl GameList for [Option<Game>] {
    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<&Game> {
        <[Option<Game>]>::get(self, index).and_then(Option::as_ref)
    }
}

/// Walks a list in order, yielding each slot.
pub fn entries<'a, L>(list: &'a L) -> impl Iterator<Item = Option<&'a Game>> + 'a
where
    L: GameList + ?Sized,
{
    (0..list.count()).map(move |index| list.get(index))
}

/// Platform metadata shown next to a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub short_name: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub release_year: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameCollection {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl GameList for GameCollection {
    fn count(&self) -> usize {
        self.games.len()
    }

    fn get(&self, index: usize) -> Option<&Game> {
        self.games.as_slice().get(index)
    }
}

/// Everything the front end browses: systems and their collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub systems: Vec<SystemInfo>,
    #[serde(default)]
    pub collections: Vec<GameCollection>,
}

impl Library {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Library(format!(
                "Library file does not exist: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let library: Library = serde_json::from_str(&contents)?;

        log::debug!(
            "Loaded {} collection(s) with {} game(s) from {:?}",
            library.collections.len(),
            library.game_count(),
            path
        );

        Ok(library)
    }

    pub fn game_count(&self) -> usize {
        self.collections.iter().map(|c| c.games.len()).sum()
    }

    pub fn collection(&self, short_name: &str) -> Result<&GameCollection> {
        self.collections
            .iter()
            .find(|c| c.short_name == short_name)
            .ok_or_else(|| Error::CollectionNotFound(short_name.to_string()))
    }

    /// Every game of every collection, in collection order.
    pub fn all_games(&self) -> Vec<Game> {
        self.collections
            .iter()
            .flat_map(|c| c.games.iter().cloned())
            .collect()
    }

    /// First game titled `title`, with the collection holding it.
    pub fn find_game(&self, title: &str) -> Result<(&GameCollection, &Game)> {
        self.collections
            .iter()
            .flat_map(|c| c.games.iter().map(move |g| (c, g)))
            .find(|(_, g)| g.title == title)
            .ok_or_else(|| Error::GameNotFound(title.to_string()))
    }
}
