use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::components::pet::Species;
use crate::core::serialization::SaveState;
use crate::simulation::economy::Money;
use crate::simulation::inventory::ToyKind;
use crate::simulation::rooms::RoomId;
use crate::simulation::stats::Vitals;

const SAVE_SCHEMA_VERSION: i64 = 1;
const SAVE_VERSION: i64 = 1;

const SAVE_DB_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS save_meta (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  schema_version INTEGER NOT NULL,
  save_version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS pet (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  name TEXT NOT NULL,
  species TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vitals (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  hunger REAL NOT NULL,
  energy REAL NOT NULL,
  hygiene REAL NOT NULL,
  happiness REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS wallet (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  money_cents INTEGER NOT NULL,
  savings_cents INTEGER NOT NULL,
  hat_unlocked INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS inventory (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  food INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS toys (
  toy TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS chore_progress (
  instance_id TEXT NOT NULL,
  sub_unit INTEGER NOT NULL,
  PRIMARY KEY (instance_id, sub_unit)
);

CREATE TABLE IF NOT EXISTS session (
  id INTEGER PRIMARY KEY CHECK (id = 1),
  room TEXT NOT NULL,
  tick INTEGER NOT NULL
);
"#;

#[derive(Debug)]
pub enum SaveDbError {
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl std::fmt::Display for SaveDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveDbError::Sqlite(err) => write!(f, "sqlite error: {}", err),
            SaveDbError::InvalidData(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for SaveDbError {}

impl From<rusqlite::Error> for SaveDbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

fn species_from_str(value: &str) -> Result<Species, SaveDbError> {
    Species::from_str(value)
        .ok_or_else(|| SaveDbError::InvalidData(format!("unknown species {}", value)))
}

fn room_from_str(value: &str) -> Result<RoomId, SaveDbError> {
    RoomId::from_str(value)
        .ok_or_else(|| SaveDbError::InvalidData(format!("unknown room {}", value)))
}

fn toy_from_str(value: &str) -> Result<ToyKind, SaveDbError> {
    ToyKind::from_str(value)
        .ok_or_else(|| SaveDbError::InvalidData(format!("unknown toy {}", value)))
}

pub struct SaveDb {
    conn: Connection,
}

impl SaveDb {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SaveDbError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SaveDbError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, SaveDbError> {
        let mut db = Self { conn };
        db.conn.execute_batch(SAVE_DB_SCHEMA)?;
        db.ensure_save_meta()?;
        Ok(db)
    }

    pub fn load_or_init(&mut self) -> Result<SaveState, SaveDbError> {
        if let Some(state) = self.load_state()? {
            Ok(state)
        } else {
            let state = SaveState::default();
            self.save_state(&state)?;
            Ok(state)
        }
    }

    pub fn load_state(&self) -> Result<Option<SaveState>, SaveDbError> {
        let pet = self
            .conn
            .query_row("SELECT name, species FROM pet WHERE id = 1", [], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .optional()?;
        let Some((pet_name, species)) = pet else {
            return Ok(None);
        };
        let species = species_from_str(&species)?;

        let vitals = self
            .conn
            .query_row(
                "SELECT hunger, energy, hygiene, happiness FROM vitals WHERE id = 1",
                [],
                |row| {
                    Ok(Vitals {
                        hunger: row.get::<_, f64>(0)? as f32,
                        energy: row.get::<_, f64>(1)? as f32,
                        hygiene: row.get::<_, f64>(2)? as f32,
                        happiness: row.get::<_, f64>(3)? as f32,
                    })
                },
            )
            .optional()?
            .unwrap_or_default();

        let (money, savings, hat_unlocked) = self
            .conn
            .query_row(
                "SELECT money_cents, savings_cents, hat_unlocked FROM wallet WHERE id = 1",
                [],
                |row| {
                    Ok((
                        Money::from_cents(row.get::<_, i64>(0)?),
                        Money::from_cents(row.get::<_, i64>(1)?),
                        row.get::<_, i64>(2)? != 0,
                    ))
                },
            )
            .optional()?
            .unwrap_or((Money::from_dollars(200), Money::zero(), false));

        let food = self
            .conn
            .query_row("SELECT food FROM inventory WHERE id = 1", [], |row| {
                Ok(row.get::<_, i64>(0)? as u32)
            })
            .optional()?
            .unwrap_or(0);

        let mut toys = std::collections::BTreeSet::new();
        let mut stmt = self.conn.prepare("SELECT toy FROM toys")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for row in rows {
            toys.insert(toy_from_str(&row?)?);
        }

        let mut progress: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        let mut stmt = self.conn.prepare(
            "SELECT instance_id, sub_unit FROM chore_progress ORDER BY instance_id, sub_unit",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u32))
        })?;
        for row in rows {
            let (instance, sub_unit) = row?;
            progress.entry(instance).or_default().push(sub_unit);
        }

        let (room, tick) = self
            .conn
            .query_row("SELECT room, tick FROM session WHERE id = 1", [], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })
            .optional()?
            .map(|(room, tick)| Ok::<_, SaveDbError>((room_from_str(&room)?, tick)))
            .transpose()?
            .unwrap_or((RoomId::LivingRoom, 0));

        Ok(Some(SaveState {
            version: SAVE_VERSION as u32,
            pet_name,
            species,
            room,
            tick,
            vitals,
            money,
            savings,
            hat_unlocked,
            food,
            toys,
            progress,
        }))
    }

    pub fn save_state(&mut self, state: &SaveState) -> Result<(), SaveDbError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM pet", [])?;
        tx.execute(
            "INSERT INTO pet (id, name, species) VALUES (1, ?1, ?2)",
            params![state.pet_name, state.species.as_str()],
        )?;

        tx.execute("DELETE FROM vitals", [])?;
        tx.execute(
            "INSERT INTO vitals (id, hunger, energy, hygiene, happiness) VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                state.vitals.hunger as f64,
                state.vitals.energy as f64,
                state.vitals.hygiene as f64,
                state.vitals.happiness as f64
            ],
        )?;

        tx.execute("DELETE FROM wallet", [])?;
        tx.execute(
            "INSERT INTO wallet (id, money_cents, savings_cents, hat_unlocked) VALUES (1, ?1, ?2, ?3)",
            params![
                state.money.as_cents(),
                state.savings.as_cents(),
                if state.hat_unlocked { 1 } else { 0 }
            ],
        )?;

        tx.execute("DELETE FROM inventory", [])?;
        tx.execute(
            "INSERT INTO inventory (id, food) VALUES (1, ?1)",
            params![state.food as i64],
        )?;

        tx.execute("DELETE FROM toys", [])?;
        for toy in &state.toys {
            tx.execute("INSERT INTO toys (toy) VALUES (?1)", params![toy.as_str()])?;
        }

        tx.execute("DELETE FROM chore_progress", [])?;
        for (instance, sub_units) in &state.progress {
            for sub_unit in sub_units {
                tx.execute(
                    "INSERT INTO chore_progress (instance_id, sub_unit) VALUES (?1, ?2)",
                    params![instance, *sub_unit as i64],
                )?;
            }
        }

        tx.execute("DELETE FROM session", [])?;
        tx.execute(
            "INSERT INTO session (id, room, tick) VALUES (1, ?1, ?2)",
            params![state.room.as_str(), state.tick as i64],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn ensure_save_meta(&mut self) -> Result<(), SaveDbError> {
        let meta = self
            .conn
            .query_row(
                "SELECT schema_version, save_version FROM save_meta WHERE id = 1",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match meta {
            Some((schema_version, save_version)) => {
                if schema_version == SAVE_SCHEMA_VERSION && save_version == SAVE_VERSION {
                    Ok(())
                } else {
                    Err(SaveDbError::InvalidData(format!(
                        "save_meta version mismatch (schema {}, save {}, expected {}, {})",
                        schema_version, save_version, SAVE_SCHEMA_VERSION, SAVE_VERSION
                    )))
                }
            }
            None => {
                self.conn.execute(
                    "INSERT INTO save_meta (id, schema_version, save_version) VALUES (1, ?1, ?2)",
                    params![SAVE_SCHEMA_VERSION, SAVE_VERSION],
                )?;
                Ok(())
            }
        }
    }
}

impl crate::world::repository::SaveRepository for SaveDb {
    fn load_or_init(&mut self) -> Result<SaveState, Box<dyn std::error::Error>> {
        Ok(SaveDb::load_or_init(self)?)
    }

    fn save_state(&mut self, state: &SaveState) -> Result<(), Box<dyn std::error::Error>> {
        Ok(SaveDb::save_state(self, state)?)
    }
}
