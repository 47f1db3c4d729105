use serde::{Deserialize, Deserializer, Serialize};

/// A scheduled task as stored in the `scheduler` table and exchanged over HTTP.
///
/// `date` is a `YYYYMMDD` string and `repeat` an optional recurrence rule
/// (empty when the task does not repeat).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(
        default,
        deserialize_with = "id_from_string_or_number",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    #[cfg(test)]
    pub fn new(date: String, title: String, comment: String, repeat: String) -> Self {
        Self {
            id: String::new(),
            date,
            title,
            comment,
            repeat,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.trim().is_empty()
    }
}

// clients send the id either as "42" or 42
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
        Null(()),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
        RawId::Null(()) => String::new(),
    })
}
