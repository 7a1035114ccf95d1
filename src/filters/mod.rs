//! Filter selection for the game list.
//!
//! The catalog is fixed and ordered: `All Games`, `Favorites`, `Last Played`.
//! Each filter carries a predicate and a sort rule. Free-form names coming
//! from the front end are parsed with [`GameFilter::from_name`]; every
//! operation here is total and falls back instead of failing.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::{entries, Game, GameList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameFilter {
    #[default]
    #[serde(rename = "All Games")]
    All,
    #[serde(rename = "Favorites")]
    Favorites,
    #[serde(rename = "Last Played")]
    LastPlayed,
}

impl GameFilter {
    /// Catalog order, also the cycling order of [`next_filter_name`].
    pub const ALL: [GameFilter; 3] = [GameFilter::All, GameFilter::Favorites, GameFilter::LastPlayed];

    pub fn name(self) -> &'static str {
        match self {
            GameFilter::All => "All Games",
            GameFilter::Favorites => "Favorites",
            GameFilter::LastPlayed => "Last Played",
        }
    }

    /// Exact, case-sensitive lookup of a catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.name() == name)
    }

    /// Predicate over a possibly missing game.
    pub fn matches(self, game: Option<&Game>) -> bool {
        match self {
            GameFilter::All => true,
            GameFilter::Favorites => game.is_some_and(|g| g.favorite),
            GameFilter::LastPlayed => game.is_some_and(Game::has_been_played),
        }
    }

    /// Orders an already filtered list in place. Sorting is stable.
    fn sort(self, games: &mut [&Game]) {
        match self {
            GameFilter::LastPlayed => {
                games.sort_by(|a, b| b.last_played.cmp(&a.last_played));
            }
            // Filtering preserves collection order, nothing else to do
            GameFilter::Favorites => {}
            GameFilter::All => {
                games.sort_by(|a, b| compare_titles(&a.title, &b.title));
            }
        }
    }
}

impl fmt::Display for GameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Title collation: case-insensitive first, lowercase before uppercase on ties.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

pub fn has_games_with_filter<L>(collection: &L, filter_name: &str) -> bool
where
    L: GameList + ?Sized,
{
    if filter_name == GameFilter::All.name() {
        return true;
    }

    let Some(filter) = GameFilter::from_name(filter_name) else {
        log::debug!("Unknown filter '{}', reporting no games", filter_name);
        return false;
    };

    entries(collection).any(|game| filter.matches(game))
}

/// Games matching `filter_name`, in display order.
///
/// Unknown names behave like `All Games`. The input is never reordered.
pub fn sorted_games<'a, L>(games: &'a L, filter_name: &str) -> Vec<&'a Game>
where
    L: GameList + ?Sized,
{
    let filter = GameFilter::from_name(filter_name).unwrap_or_else(|| {
        log::debug!("Unknown filter '{}', falling back to All Games", filter_name);
        GameFilter::All
    });

    let mut filtered: Vec<&Game> = entries(games)
        .filter(|game| filter.matches(*game))
        .flatten()
        .collect();

    filter.sort(&mut filtered);
    filtered
}

/// Filters that currently match at least one game, `All Games` always first.
pub fn available_filters<L>(collection: &L) -> Vec<GameFilter>
where
    L: GameList + ?Sized,
{
    let mut has_favorites = false;
    let mut has_last_played = false;

    for game in entries(collection).flatten() {
        if !has_favorites && game.favorite {
            has_favorites = true;
        }
        if !has_last_played && game.has_been_played() {
            has_last_played = true;
        }
        if has_favorites && has_last_played {
            break;
        }
    }

    let mut filters = vec![GameFilter::All];
    if has_favorites {
        filters.push(GameFilter::Favorites);
    }
    if has_last_played {
        filters.push(GameFilter::LastPlayed);
    }
    filters
}

/// Next entry of the full catalog. Unknown names restart at the first entry.
pub fn next_filter_name(current: &str) -> GameFilter {
    let position = GameFilter::ALL
        .iter()
        .position(|filter| filter.name() == current);

    GameFilter::ALL[wrap_next(position, GameFilter::ALL.len())]
}

/// Next entry of `available`, for cycling only through filters with matches.
///
/// An empty list yields `All Games`; an unknown `current` yields the first
/// entry of the list.
pub fn next_filter(current: &str, available: &[GameFilter]) -> GameFilter {
    if available.is_empty() {
        return GameFilter::All;
    }

    let position = available.iter().position(|filter| filter.name() == current);
    available[wrap_next(position, available.len())]
}

// A missing position counts as -1, so the successor is index 0.
fn wrap_next(position: Option<usize>, len: usize) -> usize {
    match position {
        Some(index) => (index + 1) % len,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn game(title: &str, favorite: bool, last_played: i64) -> Game {
        Game {
            title: title.to_string(),
            favorite,
            last_played: Some(Utc.timestamp_opt(last_played, 0).unwrap()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Game> {
        vec![
            game("Zelda", false, 0),
            game("Mario", true, 1_700_000_000),
            game("Tetris", true, 0),
        ]
    }

    fn titles(games: &[&Game]) -> Vec<String> {
        games.iter().map(|g| g.title.clone()).collect()
    }

    #[test]
    fn test_catalog_names_round_trip() {
        for filter in GameFilter::ALL {
            assert_eq!(GameFilter::from_name(filter.name()), Some(filter));
        }
        assert_eq!(GameFilter::from_name("Last played"), None);
        assert_eq!(GameFilter::ALL[0], GameFilter::All);
        assert_eq!(GameFilter::LastPlayed.to_string(), "Last Played");
    }

    #[test]
    fn test_predicates_guard_missing_game() {
        assert!(GameFilter::All.matches(None));
        assert!(!GameFilter::Favorites.matches(None));
        assert!(!GameFilter::LastPlayed.matches(None));

        let mut unplayed = Game::new("Pong");
        assert!(!GameFilter::LastPlayed.matches(Some(&unplayed)));
        unplayed.last_played = Some(Utc.timestamp_opt(0, 0).unwrap());
        assert!(!GameFilter::LastPlayed.matches(Some(&unplayed)));
    }

    #[test]
    fn test_has_games_with_filter() {
        let games = sample();
        assert!(has_games_with_filter(&games, "All Games"));
        assert!(has_games_with_filter(&games, "Favorites"));
        assert!(has_games_with_filter(&games, "Last Played"));
        assert!(!has_games_with_filter(&games, "Recently Added"));

        let empty: Vec<Game> = Vec::new();
        assert!(has_games_with_filter(&empty, "All Games"));
        assert!(!has_games_with_filter(&empty, "Favorites"));
    }

    #[test]
    fn test_sorted_games_example() {
        let games = sample();
        assert_eq!(
            titles(&sorted_games(&games, "Favorites")),
            vec!["Mario", "Tetris"]
        );
        assert_eq!(titles(&sorted_games(&games, "Last Played")), vec!["Mario"]);
        assert_eq!(
            titles(&sorted_games(&games, "All Games")),
            vec!["Mario", "Tetris", "Zelda"]
        );
    }

    #[test]
    fn test_unknown_filter_sorts_like_all_games() {
        let games = sample();
        assert_eq!(
            sorted_games(&games, "Nope"),
            sorted_games(&games, "All Games")
        );
    }

    #[test]
    fn test_last_played_most_recent_first() {
        let games = vec![
            game("Old", false, 100),
            game("Newest", false, 300),
            game("Middle", false, 200),
            game("Tie", false, 300),
        ];

        let sorted = sorted_games(&games, "Last Played");
        assert_eq!(titles(&sorted), vec!["Newest", "Tie", "Middle", "Old"]);
        assert!(sorted
            .windows(2)
            .all(|pair| pair[0].last_played >= pair[1].last_played));
    }

    #[test]
    fn test_favorites_keep_collection_order() {
        let games = vec![
            game("b", true, 0),
            game("a", false, 0),
            game("C", true, 0),
            game("A", true, 0),
        ];
        assert_eq!(
            titles(&sorted_games(&games, "Favorites")),
            vec!["b", "C", "A"]
        );
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let games = vec![
            game("banjo", false, 0),
            game("Actraiser", false, 0),
            game("Zombies", false, 0),
            game("actraiser", false, 0),
        ];
        assert_eq!(
            titles(&sorted_games(&games, "All Games")),
            vec!["actraiser", "Actraiser", "banjo", "Zombies"]
        );
    }

    #[test]
    fn test_compare_titles_is_antisymmetric() {
        let pairs = [
            ("\u{212A}ombat", "Kombat"),
            ("actraiser", "Actraiser"),
            ("Mario", "mario kart"),
            ("Zelda", "Zelda"),
        ];
        for (a, b) in pairs {
            assert_eq!(compare_titles(a, b), compare_titles(b, a).reverse(), "{a} vs {b}");
        }
        assert_ne!(compare_titles("\u{212A}ombat", "Kombat"), Ordering::Equal);
    }

    #[test]
    fn test_accented_titles_sort_after_plain_letters() {
        // Code point order after lowercasing puts accented letters after ASCII ones
        let games = vec![
            game("Pokémon Red", false, 0),
            game("Ōkami", false, 0),
            game("Pokemon Yellow", false, 0),
            game("Zelda", false, 0),
        ];
        assert_eq!(
            titles(&sorted_games(&games, "All Games")),
            vec!["Pokemon Yellow", "Pokémon Red", "Zelda", "Ōkami"]
        );
    }

    #[test]
    fn test_sorted_games_skips_missing_slots() {
        let slots = vec![None, Some(game("Mario", true, 5)), None];
        let list: &[Option<Game>] = &slots;
        assert_eq!(titles(&sorted_games(list, "All Games")), vec!["Mario"]);
        assert_eq!(titles(&sorted_games(list, "Favorites")), vec!["Mario"]);
    }

    #[test]
    fn test_sorted_games_is_repeatable() {
        let games = sample();
        let before = games.clone();
        assert_eq!(
            sorted_games(&games, "All Games"),
            sorted_games(&games, "All Games")
        );
        assert_eq!(games, before);
    }

    #[test]
    fn test_available_filters() {
        assert_eq!(
            available_filters(&sample()),
            vec![GameFilter::All, GameFilter::Favorites, GameFilter::LastPlayed]
        );

        // Played game discovered before any favorite, order stays fixed
        let games = vec![game("A", false, 10), game("B", true, 0)];
        assert_eq!(
            available_filters(&games),
            vec![GameFilter::All, GameFilter::Favorites, GameFilter::LastPlayed]
        );

        let played_only = vec![game("A", false, 10)];
        assert_eq!(
            available_filters(&played_only),
            vec![GameFilter::All, GameFilter::LastPlayed]
        );

        let empty: Vec<Game> = Vec::new();
        assert_eq!(available_filters(&empty), vec![GameFilter::All]);
    }

    #[test]
    fn test_next_filter_name_cycles_catalog() {
        assert_eq!(next_filter_name("All Games"), GameFilter::Favorites);
        assert_eq!(next_filter_name("Favorites"), GameFilter::LastPlayed);
        assert_eq!(next_filter_name("Last Played"), GameFilter::All);
        assert_eq!(next_filter_name("bogus"), GameFilter::All);
    }

    #[test]
    fn test_next_filter_over_available() {
        let available = [GameFilter::All, GameFilter::Favorites, GameFilter::LastPlayed];

        assert_eq!(next_filter("All Games", &[]), GameFilter::All);
        assert_eq!(next_filter("Favorites", &[]), GameFilter::All);
        assert_eq!(next_filter("All Games", &available), GameFilter::Favorites);
        assert_eq!(next_filter("Last Played", &available), GameFilter::All);
        assert_eq!(next_filter("bogus", &available), GameFilter::All);

        let partial = [GameFilter::All, GameFilter::LastPlayed];
        assert_eq!(next_filter("All Games", &partial), GameFilter::LastPlayed);
        // Favorites is not available here, so cycling restarts
        assert_eq!(next_filter("Favorites", &partial), GameFilter::All);
    }
}
