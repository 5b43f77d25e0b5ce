//! Data model of the game code database.
//!
//! Each record keeps the JSON object it was loaded from, so that a
//! load/save cycle writes back every field, in its original order, with its
//! original value. Derived fields (`codeCount`, `totalCodes`, `lastUpdated`)
//! are overwritten in place. The nested lists (`games`, `codes`) are held as
//! typed values, and written back at the position of their key.

use std::path::Path;

use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};

use crate::{error::Result, util::json};

/// Default location of the database file.
pub const DEFAULT_FILE: &str = "GameCodeBase.json";

const GAMES: &str = "games";
const TOTAL_CODES: &str = "totalCodes";
const LAST_UPDATED: &str = "lastUpdated";
const GAME_NAME: &str = "gameName";
const CODES: &str = "codes";
const CODE_COUNT: &str = "codeCount";
const CODE: &str = "code";

/// Top-level record of the database file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    /// All fields, `games` being a placeholder when present.
    fields: Map<String, Value>,

    /// List of games, if the `games` field exists.
    games: Option<Vec<Game>>,
}

/// A game and its codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    /// All fields, `codes` being a placeholder when present.
    fields: Map<String, Value>,

    /// List of codes, if the `codes` field exists.
    codes: Option<Vec<CodeEntry>>,
}

/// A single code of a game.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CodeEntry(Map<String, Value>);

impl Database {
    /// Load a database from a JSON file.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        json::read_file(path)
    }

    /// Write the database to a JSON file, replacing its content.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        json::write_file(path, self)
    }

    /// Return the number of games, `0` if there is no `games` field.
    pub fn game_count(&self) -> usize {
        self.games.as_ref().map_or(0, Vec::len)
    }

    /// Iterate over all games.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().flatten()
    }

    /// Return the list of games, if the `games` field exists.
    pub fn games_mut(&mut self) -> Option<&mut Vec<Game>> {
        self.games.as_mut()
    }

    /// Sum the number of codes of all games.
    pub fn count_codes(&self) -> u64 {
        self.games().map(|game| game.codes().len() as u64).sum()
    }

    /// Return the `totalCodes` field as stored in the file.
    pub fn total_codes(&self) -> Option<&Value> {
        self.fields.get(TOTAL_CODES)
    }

    /// Set the `totalCodes` field.
    pub fn set_total_codes(&mut self, total: u64) {
        self.fields.insert(TOTAL_CODES.into(), total.into());
    }

    /// Return the `lastUpdated` field if it is a string.
    pub fn last_updated(&self) -> Option<&str> {
        self.fields.get(LAST_UPDATED).and_then(Value::as_str)
    }

    /// Set the `lastUpdated` field.
    pub fn set_last_updated(&mut self, time: String) {
        self.fields.insert(LAST_UPDATED.into(), time.into());
    }

    /// Return a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Game {
    /// Return the name of the game, or `Unknown`.
    pub fn name(&self) -> String {
        match self.fields.get(GAME_NAME) {
            Some(Value::String(name)) => name.clone(),
            Some(value) => value.to_string(),
            None => "Unknown".into(),
        }
    }

    /// Return the codes, empty if there is no `codes` field.
    pub fn codes(&self) -> &[CodeEntry] {
        self.codes.as_deref().unwrap_or_default()
    }

    /// Return the codes, adding an empty `codes` field if missing.
    pub fn codes_mut(&mut self) -> &mut Vec<CodeEntry> {
        self.fields.entry(CODES).or_insert(Value::Null);
        self.codes.get_or_insert_with(Vec::new)
    }

    /// Return the `codeCount` field as stored in the file.
    pub fn code_count(&self) -> Option<&Value> {
        self.fields.get(CODE_COUNT)
    }

    /// Set the `codeCount` field.
    pub fn set_code_count(&mut self, count: u64) {
        self.fields.insert(CODE_COUNT.into(), count.into());
    }

    /// Return a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl CodeEntry {
    /// Return the `code` field as stored in the file.
    pub fn code(&self) -> Option<&Value> {
        self.0.get(CODE)
    }

    /// Return a key identifying the code, if it can be compared with others.
    ///
    /// Missing, `null`, `false`, `0` and empty codes have no key. Other codes
    /// are keyed by their JSON text, so `"1"` and `1` are different codes.
    pub fn key(&self) -> Option<String> {
        let code = self.code()?;

        let empty = match code {
            Value::Null => true,
            Value::Bool(value) => !value,
            Value::Number(value) => value.as_f64() == Some(0.0),
            Value::String(value) => value.is_empty(),
            Value::Array(value) => value.is_empty(),
            Value::Object(value) => value.is_empty(),
        };

        (!empty).then(|| code.to_string())
    }

    /// Return a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Map<String, Value>> for CodeEntry {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<'de> Deserialize<'de> for Database {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::deserialize(deserializer)?;
        let games = take_list(&mut fields, GAMES)?;
        Ok(Self { fields, games })
    }
}

impl Serialize for Database {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_fields(serializer, &self.fields, GAMES, self.games.as_deref())
    }
}

impl<'de> Deserialize<'de> for Game {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::deserialize(deserializer)?;
        let codes = take_list(&mut fields, CODES)?;
        Ok(Self { fields, codes })
    }
}

impl Serialize for Game {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_fields(serializer, &self.fields, CODES, self.codes.as_deref())
    }
}

/// Value of a field when serializing a record.
#[derive(Serialize)]
#[serde(untagged)]
enum Slot<'a, T> {
    Value(&'a Value),
    List(&'a [T]),
}

/// Move the list stored under `key` out of `fields`, leaving a placeholder.
fn take_list<T, E>(fields: &mut Map<String, Value>, key: &str) -> Result<Option<Vec<T>>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    fields
        .get_mut(key)
        .map(|value| {
            Vec::<T>::deserialize(value.take())
                .map_err(|error| E::custom(format!("`{}`: {}", key, error)))
        })
        .transpose()
}

/// Serialize `fields` in order, writing `list` in place of `key`.
fn serialize_fields<S, T>(
    serializer: S,
    fields: &Map<String, Value>,
    key: &str,
    list: Option<&[T]>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_map(fields.iter().map(|(name, value)| {
        let slot = match list {
            Some(items) if name == key => Slot::List(items),
            _ => Slot::Value(value),
        };
        (name, slot)
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CodeEntry, Database, Game};
    use crate::util::json::{read_str, write_str};

    #[test]
    fn preserve_fields() {
        let input = json!({
            "version": 3,
            "games": [{
                "gameName": "A",
                "codeCount": 1,
                "codes": [{
                    "code": "X1",
                    "rewardDescription": "100 gems",
                    "status": "active",
                    "expireDate": null
                }],
                "platform": "mobile"
            }]
        });

        let database: Database = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(database.field("version"), Some(&json!(3)));

        let game = database.games().next().unwrap();

        assert_eq!(game.name(), "A");
        assert_eq!(game.field("platform"), Some(&json!("mobile")));
        assert_eq!(game.codes()[0].field("status"), Some(&json!("active")));
        assert_eq!(serde_json::to_value(&database).unwrap(), input);
    }

    #[test]
    fn preserve_key_order() {
        let input = concat!(
            r#"{"version":1,"games":[{"codes":[{"reward":"x","code":"X"},{"code":null}],"#,
            r#""gameName":"A"}],"totalCodes":"3"}"#
        );

        let database: Database = read_str(input).unwrap();
        let output = serde_json::to_string(&database).unwrap();

        assert_eq!(output, input);
    }

    #[test]
    fn update_in_place() {
        let mut database: Database = read_str(
            r#"{"totalCodes":"3","games":[{"codeCount":null,"gameName":"A","codes":[]}]}"#,
        )
        .unwrap();

        database.set_total_codes(0);
        database.set_last_updated("now".into());
        database.games_mut().unwrap()[0].set_code_count(0);

        assert_eq!(
            serde_json::to_string(&database).unwrap(),
            r#"{"totalCodes":0,"games":[{"codeCount":0,"gameName":"A","codes":[]}],"lastUpdated":"now"}"#
        );
    }

    #[test]
    fn missing_codes() {
        let mut game: Game = read_str(r#"{ "gameName": "A" }"#).unwrap();

        assert!(game.codes().is_empty());

        game.codes_mut().clear();
        game.set_code_count(0);

        assert_eq!(
            serde_json::to_string(&game).unwrap(),
            r#"{"gameName":"A","codes":[],"codeCount":0}"#
        );
    }

    #[test]
    fn missing_fields() {
        let database: Database = read_str(r#"{ "games": [{}] }"#).unwrap();

        let game = database.games().next().unwrap();

        assert_eq!(game.name(), "Unknown");
        assert!(game.codes().is_empty());
        assert_eq!(database.game_count(), 1);
        assert_eq!(database.total_codes(), None);
    }

    #[test]
    fn loose_types() {
        let database: Database = read_str(
            r#"{ "totalCodes": "4", "games": [{ "gameName": 7, "codeCount": null }] }"#,
        )
        .unwrap();

        assert_eq!(database.game_count(), 1);
        assert_eq!(database.games().next().unwrap().name(), "7");
        assert_eq!(database.count_codes(), 0);
    }

    #[test]
    fn code_keys() {
        let key = |input: &str| read_str::<CodeEntry, _>(input).unwrap().key();

        assert_eq!(key(r#"{ "code": "" }"#), None);
        assert_eq!(key(r#"{ "code": null }"#), None);
        assert_eq!(key(r#"{ "code": 0 }"#), None);
        assert_eq!(key(r#"{ "reward": "gold" }"#), None);
        assert_eq!(key(r#"{ "code": "X" }"#), Some(r#""X""#.into()));
        assert_eq!(key(r#"{ "code": 12345 }"#), Some("12345".into()));
        assert_ne!(key(r#"{ "code": "1" }"#), key(r#"{ "code": 1 }"#));
    }

    #[test]
    fn reject_non_object() {
        assert!(read_str::<Database, _>("[1, 2, 3]").is_err());
        assert!(read_str::<Database, _>(r#"{ "games": null }"#).is_err());
        assert!(read_str::<Database, _>(r#"{ "games": [{ "codes": [1] }] }"#).is_err());
    }

    #[test]
    fn write_null_code() {
        let entry: CodeEntry = read_str(r#"{"code":null,"reward":"r"}"#).unwrap();

        assert!(write_str(&entry).unwrap().contains("\"code\": null"));
    }
}
