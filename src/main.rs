use chrono::Utc;
use clap::Parser;
use game_shelf::{
    cli::{Cli, Commands},
    config::Config,
    filters::{self, GameFilter},
    format,
    games::{Game, Library},
    screenshots, Result,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = Config::load()?;
    log::debug!("Configuration loaded");

    let library_path = cli.library.clone().unwrap_or_else(|| config.library_path.clone());
    let library = match Library::load(&library_path) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Failed to load library: {}", e);
            eprintln!("Pass --library <file> or set library_path in {:?}", Config::config_path()?);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            let filter = config.default_filter();
            print_games(&library.all_games(), filter.name(), &config);
        }

        Some(command) => match command {
            Commands::Filters { collection } => {
                let games = select_games(&library, collection.as_deref())?;

                println!("Available filters:");
                for filter in filters::available_filters(&games) {
                    let count = filters::sorted_games(&games, filter.name()).len();
                    println!("  {} ({})", filter, count);
                }
            }

            Commands::List { filter, collection } => {
                let games = select_games(&library, collection.as_deref())?;
                let filter_name = filter.unwrap_or_else(|| config.default_filter.clone());

                if GameFilter::from_name(&filter_name).is_none() {
                    log::warn!("Unknown filter '{}', showing all games", filter_name);
                }

                print_games(&games, &filter_name, &config);
            }

            Commands::Next {
                current,
                all_filters,
                collection,
            } => {
                let next = if all_filters || !config.cycle_available_only {
                    filters::next_filter_name(&current)
                } else {
                    let games = select_games(&library, collection.as_deref())?;
                    let available = filters::available_filters(&games);
                    filters::next_filter(&current, &available)
                };

                println!("{}", next);
            }

            Commands::Info { title } => {
                let (collection, game) = match library.find_game(&title) {
                    Ok(found) => found,
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                };

                let system_name = format::system_metadata(&library.systems, &collection.short_name)
                    .map(|s| s.name.as_str())
                    .unwrap_or(collection.name.as_str());

                println!("Game Information:");
                println!("================");
                println!("Title: {}", game.title);
                println!(
                    "System: {} [{}]",
                    system_name,
                    format::color_for_system(&config.colors, &collection.short_name)
                );
                println!("Developer: {}", format::format_developer(&game.developer));
                println!("Genre: {}", format::format_genre(&game.genre));
                println!("Released: {}", format::release_year_text(game.release_year));
                if let Some(badge) = format::players_badge(game.players) {
                    println!("Players: {} ({})", badge.count, badge.icon);
                }
                println!("Rating: {}", format::rating_display(game.rating));
                println!("Favorite: {}", if game.favorite { "Yes" } else { "No" });
                println!(
                    "Last played: {}",
                    format::format_last_played(game.last_played, Utc::now(), &config.date_format)
                );
                println!();
                println!("{}", format::format_description(&game.description));
            }

            Commands::Screenshots { limit } => {
                let mut rng = rand::thread_rng();
                let shots = screenshots::random_screenshots(&library.collections, &mut rng);

                if shots.is_empty() {
                    println!("No screenshots in library");
                }

                for shot in shots.iter().take(limit.unwrap_or(usize::MAX)) {
                    match screenshots::game_from_screenshot(&library.collections, shot) {
                        Some(game) => println!("  {} - {}", shot, game.title),
                        None => println!("  {}", shot),
                    }
                }
            }

            Commands::Status => {
                println!("Game Shelf Status");
                println!("=================");
                println!();
                println!("Version: {}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Configuration:");
                println!("  Library: {:?}", library_path);
                println!("  Log Level: {}", config.log_level);
                println!("  Default Filter: {}", config.default_filter());
                println!("  Cycle Available Only: {}", config.cycle_available_only);
                println!();

                if let Ok(config_path) = Config::config_path() {
                    println!("Config Path: {:?}", config_path);
                }

                println!();
                println!("Collections:");
                for collection in &library.collections {
                    println!(
                        "  {} ({}) - {} game(s) [{}]",
                        collection.name,
                        collection.short_name,
                        collection.games.len(),
                        format::color_for_system(&config.colors, &collection.short_name)
                    );
                }
                println!("Total: {} game(s)", library.game_count());
            }
        },
    }

    Ok(())
}

fn select_games(library: &Library, collection: Option<&str>) -> Result<Vec<Game>> {
    match collection {
        Some(short_name) => Ok(library.collection(short_name)?.games.clone()),
        None => Ok(library.all_games()),
    }
}

fn print_games(games: &[Game], filter_name: &str, config: &Config) {
    let known = GameFilter::from_name(filter_name).is_some();
    if known && !filters::has_games_with_filter(games, filter_name) {
        println!("No games match \"{}\"", filter_name);
        return;
    }

    let sorted = filters::sorted_games(games, filter_name);
    let now = Utc::now();

    println!("{} ({}):", filter_name, sorted.len());
    for game in sorted {
        println!(
            "  {}{} - {}",
            game.title,
            if game.favorite { " *" } else { "" },
            format::format_last_played(game.last_played, now, &config.date_format)
        );
    }
}
