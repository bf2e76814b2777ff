//! Latest-year world snapshot for the map view.

use crate::data::LongTable;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub country: String,
    pub country_code: String,
    pub region: String,
    pub value: f64,
}

/// One value per country code for a single year, with the value range used
/// to drive the color scale.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub year: i32,
    pub entries: Vec<SnapshotEntry>,
    pub min: f64,
    pub max: f64,
}

impl WorldSnapshot {
    /// Snapshot of the most recent year in the table.
    pub fn latest(table: &LongTable) -> Option<Self> {
        Self::for_year(table, table.latest_year()?)
    }

    /// Snapshot of `year`; duplicate rows per country code are averaged.
    pub fn for_year(table: &LongTable, year: i32) -> Option<Self> {
        let mut by_code: BTreeMap<&str, (SnapshotEntry, usize)> = BTreeMap::new();
        for r in table.records().iter().filter(|r| r.year == year) {
            by_code
                .entry(r.country_code.as_str())
                .and_modify(|(entry, n)| {
                    entry.value += r.life_expectancy;
                    *n += 1;
                })
                .or_insert_with(|| {
                    (
                        SnapshotEntry {
                            country: r.country.clone(),
                            country_code: r.country_code.clone(),
                            region: r.region.clone(),
                            value: r.life_expectancy,
                        },
                        1,
                    )
                });
        }
        if by_code.is_empty() {
            return None;
        }

        let entries: Vec<SnapshotEntry> = by_code
            .into_values()
            .map(|(mut entry, n)| {
                entry.value /= n as f64;
                entry
            })
            .collect();
        let (min, max) = entries.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e.value), hi.max(e.value))
        });

        Some(Self {
            year,
            entries,
            min,
            max,
        })
    }

    /// Position of `value` on the color scale, clamped to [0, 1].
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Entries grouped by region, regions sorted by name.
    pub fn by_region(&self) -> BTreeMap<&str, Vec<&SnapshotEntry>> {
        let mut regions: BTreeMap<&str, Vec<&SnapshotEntry>> = BTreeMap::new();
        for entry in &self.entries {
            regions.entry(entry.region.as_str()).or_default().push(entry);
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn latest_year_averages_duplicates() {
        let table = LongTable::new(vec![
            record("Chad", 2018, 53.0),
            record("Chad", 2019, 54.0),
            record("Chad", 2019, 56.0),
            record("Japan", 2019, 84.0),
        ]);

        let snapshot = WorldSnapshot::latest(&table).unwrap();
        assert_eq!(snapshot.year, 2019);
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.min, 55.0);
        assert_eq!(snapshot.max, 84.0);
        assert_eq!(snapshot.scale(55.0), 0.0);
        assert_eq!(snapshot.scale(84.0), 1.0);
        assert_eq!(snapshot.scale(100.0), 1.0);
        assert_eq!(snapshot.by_region()["Test"].len(), 2);
    }

    #[test]
    fn empty_table_has_no_snapshot() {
        assert!(WorldSnapshot::latest(&LongTable::default()).is_none());
    }
}
