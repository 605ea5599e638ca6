use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use pet_haven::components::pet::Species;
use pet_haven::core::action::Action;
use pet_haven::core::world::{Game, Snapshot};
use pet_haven::data::chores::{load_chore_catalog, ChoreCatalog};
use pet_haven::data::config::{load_config, GameConfig};
use pet_haven::simulation::economy::{ItemKind, Money};
use pet_haven::simulation::rooms::Destination;
use pet_haven::systems::notifications::Severity;
use pet_haven::world::{SaveDb, SaveRepository};

struct CliOptions {
    save_path: PathBuf,
    config_path: Option<PathBuf>,
    chores_path: Option<PathBuf>,
    pet_name: String,
    species: Species,
}

fn parse_options(args: Vec<String>) -> CliOptions {
    let mut options = CliOptions {
        save_path: PathBuf::from("./pet_haven.db"),
        config_path: None,
        chores_path: None,
        pet_name: "Buddy".to_string(),
        species: Species::Dog,
    };
    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--save" => {
                if let Some(value) = iter.next() {
                    options.save_path = PathBuf::from(value);
                }
            }
            "--config" => {
                if let Some(value) = iter.next() {
                    options.config_path = Some(PathBuf::from(value));
                }
            }
            "--chores" => {
                if let Some(value) = iter.next() {
                    options.chores_path = Some(PathBuf::from(value));
                }
            }
            "--name" => {
                if let Some(value) = iter.next() {
                    options.pet_name = value;
                }
            }
            "--species" => {
                if let Some(value) = iter.next() {
                    if let Some(species) = Species::from_str(&value) {
                        options.species = species;
                    } else {
                        eprintln!("Unknown species {}, keeping dog", value);
                    }
                }
            }
            other => eprintln!("Ignoring unknown argument {}", other),
        }
    }
    options
}

fn load_config_or_default(path: Option<&PathBuf>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            GameConfig::default()
        }
    }
}

fn load_catalog_or_default(path: Option<&PathBuf>) -> ChoreCatalog {
    let path = path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("./assets/data/chores.json"));
    match load_chore_catalog(&path) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load chores from {}: {}", path.display(), err);
            ChoreCatalog::default()
        }
    }
}

fn main() {
    println!("Pet Haven (logic core debug shell)");
    let options = parse_options(env::args().collect());

    let config = load_config_or_default(options.config_path.as_ref());
    let catalog = load_catalog_or_default(options.chores_path.as_ref());

    let mut save_db: Option<SaveDb> = match SaveDb::open(&options.save_path) {
        Ok(db) => Some(db),
        Err(err) => {
            eprintln!("Failed to open save db: {}", err);
            None
        }
    };

    let mut game = match save_db.as_mut().map(|db| db.load_or_init()) {
        Some(Ok(state)) => Game::from_save(state, config, catalog),
        Some(Err(err)) => {
            eprintln!("Failed to load save state: {}", err);
            Game::with_setup(options.pet_name, options.species, config, catalog)
        }
        None => Game::with_setup(options.pet_name, options.species, config, catalog),
    };

    print_status(&game.snapshot());
    println!(
        "Commands: status | tasks | pending | go <room|work> | chore <index> | sleep | bath | play | buy <kibble|ball> | eat | deposit <dollars> | tick [n] | token <raw> | reset | save | help | quit"
    );

    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "quit" | "exit" => break,
            "help" => {
                println!(
                    "status | tasks | pending | go <room|work> | chore <index> | sleep | bath | play | buy <kibble|ball> | eat | deposit <dollars> | tick [n] | token <raw> | reset | save | quit"
                );
            }
            "status" => print_status(&game.snapshot()),
            "tasks" => print_tasks(&game.snapshot()),
            "pending" => print_pending(&game.snapshot()),
            "go" => match parts.next().and_then(Destination::parse) {
                Some(destination) => {
                    report(&game.submit(Action::ChangeRoom { destination }));
                }
                None => println!("Usage: go <livingroom|kitchen|bedroom|bathroom|work>"),
            },
            "chore" => {
                let index: Option<usize> = parts.next().and_then(|raw| raw.parse().ok());
                match index {
                    Some(index) => {
                        let pending = game.snapshot().pending;
                        match pending.get(index) {
                            Some(target) => {
                                let snapshot = game.submit(Action::DoChore {
                                    chore: target.chore.clone(),
                                    instance: target.instance.clone(),
                                    sub_unit: target.sub_unit,
                                });
                                report(&snapshot);
                            }
                            None => println!("No pending chore at index {}", index),
                        }
                    }
                    None => println!("Usage: chore <index> (see `pending`)"),
                }
            }
            "sleep" => report(&game.submit(Action::Sleep)),
            "bath" => report(&game.submit(Action::CleanPet)),
            "play" => report(&game.submit(Action::PlayWithToy)),
            "buy" => match parts.next().and_then(ItemKind::from_str) {
                Some(item) => report(&game.submit(Action::Buy { item })),
                None => println!("Usage: buy <kibble|ball>"),
            },
            "eat" => report(&game.submit(Action::Consume)),
            "deposit" => match parts.next().and_then(|raw| raw.parse::<i64>().ok()) {
                Some(dollars) => {
                    let before = game.snapshot().savings;
                    let snapshot = game.submit(Action::Deposit {
                        amount: Money::from_dollars(dollars),
                    });
                    if snapshot.savings == before {
                        println!("Deposit rejected.");
                    }
                    report(&snapshot);
                }
                None => println!("Usage: deposit <dollars>"),
            },
            "tick" => {
                let count: u64 = parts
                    .next()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(1);
                let mut snapshot = game.snapshot();
                for _ in 0..count {
                    snapshot = game.tick();
                    for note in &snapshot.notifications {
                        print_notification(note.severity, &note.message);
                    }
                }
                print_status(&snapshot);
            }
            "token" => match parts.next() {
                Some(raw) => report(&game.submit_token(raw)),
                None => println!("Usage: token <raw-action-token>"),
            },
            "reset" => {
                report(&game.reset_progress());
                println!("Chore progress cleared.");
            }
            "save" => match save_db.as_mut() {
                Some(db) => match SaveRepository::save_state(db, &game.save_state()) {
                    Ok(()) => println!("Saved to {}", options.save_path.display()),
                    Err(err) => eprintln!("Save failed: {}", err),
                },
                None => eprintln!("No save db available."),
            },
            other => println!("Unknown command {} (try `help`)", other),
        }
    }

    if let Some(db) = save_db.as_mut() {
        if let Err(err) = SaveRepository::save_state(db, &game.save_state()) {
            eprintln!("Final save failed: {}", err);
        }
    }
    println!("Bye.");
}

fn report(snapshot: &Snapshot) {
    for note in &snapshot.notifications {
        print_notification(note.severity, &note.message);
    }
}

fn print_notification(severity: Severity, message: &str) {
    let tag = match severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "err",
    };
    println!("[{}] {}", tag, message);
}

fn print_status(snapshot: &Snapshot) {
    println!(
        "{} the {} | room: {} | mood: {}",
        snapshot.pet_name,
        snapshot.species.as_str(),
        snapshot.room.as_str(),
        snapshot.mood.label()
    );
    println!(
        "hunger {:.0} | energy {:.0} | hygiene {:.0} | happiness {:.0}",
        snapshot.vitals.hunger,
        snapshot.vitals.energy,
        snapshot.vitals.hygiene,
        snapshot.vitals.happiness
    );
    println!(
        "money {} | savings {}{} | food x{} | toys {} | tick {}",
        snapshot.money,
        snapshot.savings,
        if snapshot.hat_unlocked { " (hat!)" } else { "" },
        snapshot.food_stock,
        snapshot.toys.len(),
        snapshot.tick
    );
}

fn print_tasks(snapshot: &Snapshot) {
    if snapshot.tasks.iter().all(|task| task.done) {
        println!("All chores done!");
        return;
    }
    for task in &snapshot.tasks {
        let here = if task.in_active_room { "*" } else { " " };
        let mark = if task.done { "done" } else { "" };
        println!(
            "{} {} {}/{} {}",
            here, task.label, task.completed, task.total, mark
        );
    }
}

fn print_pending(snapshot: &Snapshot) {
    if snapshot.pending.is_empty() {
        println!("Nothing to do in this room.");
        return;
    }
    for (index, target) in snapshot.pending.iter().enumerate() {
        println!(
            "{}: {} ({} #{})",
            index,
            target.action_label,
            target.instance,
            target.sub_unit
        );
    }
}
