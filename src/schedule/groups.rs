// Group aggregation
// Unions the top-level keys of both parity documents

use std::collections::BTreeSet;

use serde_json::Value;

use super::loader::ScheduleStore;
use super::parity::WeekParity;

impl ScheduleStore {
    /// Sorted, deduplicated group names across both week parities
    ///
    /// A missing or broken document only shrinks the result; with neither
    /// document available the list is empty.
    pub async fn group_names(&self) -> Vec<String> {
        let (numerator, denominator) = tokio::join!(
            self.load_parity(WeekParity::Numerator),
            self.load_parity(WeekParity::Denominator),
        );

        merge_group_names(numerator.iter().chain(denominator.iter()))
    }
}

/// Merge the top-level keys of `documents`
///
/// Documents that are not JSON objects contribute nothing.
pub fn merge_group_names<'a, I>(documents: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Value>,
{
    let names: BTreeSet<&str> = documents
        .into_iter()
        .filter_map(Value::as_object)
        .flat_map(|groups| groups.keys().map(String::as_str))
        .collect();

    names.into_iter().map(str::to_owned).collect()
}
