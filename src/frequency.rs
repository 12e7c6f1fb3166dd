use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A distinct value observed in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Number(f64),
    Text(String),
}

impl ItemValue {
    /// Key used in value→frequency maps. Numbers use the shortest decimal
    /// rendering that round-trips, so `25.0` is keyed as `"25"`.
    pub fn key(&self) -> String {
        match self {
            ItemValue::Number(n) => n.to_string(),
            ItemValue::Text(s) => s.clone(),
        }
    }
}

/// Distinct values of one column with their frequencies, ascending by value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    items: Vec<ItemValue>,
    counts: Vec<usize>,
}

impl FrequencyTable {
    pub fn unique_count(&self) -> usize {
        self.items.len()
    }

    pub fn to_map(&self) -> BTreeMap<String, usize> {
        self.items
            .iter()
            .map(ItemValue::key)
            .zip(self.counts.iter().copied())
            .collect()
    }

    pub fn into_parts(self) -> (Vec<ItemValue>, Vec<usize>) {
        (self.items, self.counts)
    }
}

/// Counts runs of equal values in an ascending slice.
pub fn count_numeric(sorted: &[f64]) -> FrequencyTable {
    let (counts, items) = sorted
        .iter()
        .dedup_with_count()
        .map(|(count, value)| (count, ItemValue::Number(*value)))
        .unzip();
    FrequencyTable { items, counts }
}

/// Counts string values; the frequency of `""` is reported as the missing count.
pub fn count_strings<'a, I>(values: I) -> (FrequencyTable, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counter: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counter.entry(value).or_insert(0) += 1;
    }
    let missing = counter.get("").copied().unwrap_or(0);
    let (counts, items) = counter
        .into_iter()
        .map(|(value, count)| (count, ItemValue::Text(value.to_string())))
        .unzip();
    (FrequencyTable { items, counts }, missing)
}
