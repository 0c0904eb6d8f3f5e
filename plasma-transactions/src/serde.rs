use plasma_amount::{parse_amount, Amount, AmountInput};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<RawAmount> for AmountInput {
    fn from(raw: RawAmount) -> Self {
        match raw {
            RawAmount::Text(text) => AmountInput::Text(text),
            RawAmount::Unsigned(value) => AmountInput::from(value),
            RawAmount::Signed(value) => AmountInput::from(value),
            RawAmount::Float(value) => AmountInput::Number(value),
        }
    }
}

pub fn serialize_amount<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    parse_amount(raw).map_err(serde::de::Error::custom)
}
