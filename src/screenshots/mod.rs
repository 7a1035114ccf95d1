use rand::seq::SliceRandom;
use rand::Rng;

use crate::games::{Game, GameCollection};

/// Every screenshot in the library exactly once, in shuffled order.
pub fn random_screenshots<'a, R>(collections: &'a [GameCollection], rng: &mut R) -> Vec<&'a str>
where
    R: Rng + ?Sized,
{
    let mut screenshots: Vec<&str> = collections
        .iter()
        .flat_map(|c| c.games.iter())
        .filter_map(|g| g.assets.screenshot.as_deref())
        .filter(|path| !path.is_empty())
        .collect();

    screenshots.shuffle(rng);
    screenshots
}

/// The first game whose screenshot is `screenshot`.
pub fn game_from_screenshot<'a>(collections: &'a [GameCollection], screenshot: &str) -> Option<&'a Game> {
    collections
        .iter()
        .flat_map(|c| c.games.iter())
        .find(|g| g.assets.screenshot.as_deref() == Some(screenshot))
}
