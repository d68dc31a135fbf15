use alloc::string::String;
use core::fmt::{self, Formatter};
use serde::{
    de::{Error, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// A named grouping of questions. These are seeded once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: i32,
    /// Display label such as `Science` or `History`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Category references are stored loosely by clients, so both `1` and `"1"` are accepted.
struct LooseIdVisitor;

impl<'de> Visitor<'de> for LooseIdVisitor {
    type Value = i32;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string holding one")
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        i32::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        i32::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        value.trim().parse().map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

struct OptionalLooseIdVisitor;

impl<'de> Visitor<'de> for OptionalLooseIdVisitor {
    type Value = Option<i32>;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("an optional integer or a string holding one")
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseIdVisitor).map(Some)
    }
}

pub fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LooseIdVisitor)
}

pub fn deserialize_optional_loose_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalLooseIdVisitor)
}
