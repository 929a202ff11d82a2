use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// One row of the frequency table: a distinct value and how many times it
/// occurred in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    pub value: f64,
    pub count: u32,
}

impl FrequencyEntry {
    /// The contribution of this entry to the grand total.
    pub fn subtotal(&self) -> f64 {
        self.value * f64::from(self.count)
    }
}

/// Aggregated view of one extraction: the frequency table sorted ascending
/// by value, the grand total, and the input length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueStats {
    pub entries: Vec<FrequencyEntry>,
    pub total_sum: f64,
    pub total_count: usize,
}

/// Tally occurrences and sum the input in a single pass, then order the
/// table ascending by numeric value. Grouping uses exact numeric equality,
/// so values that parsed from different spellings ("5", "5.0") land in the
/// same entry. An empty slice yields empty stats.
pub fn aggregate(values: &[f64]) -> ValueStats {
    let mut counts: HashMap<OrderedFloat<f64>, u32> = HashMap::new();
    let mut total_sum = 0.0;

    for &value in values {
        *counts.entry(OrderedFloat(value)).or_insert(0) += 1;
        total_sum += value;
    }

    let mut sorted: Vec<(OrderedFloat<f64>, u32)> = counts.into_iter().collect();
    sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    ValueStats {
        entries: sorted
            .into_iter()
            .map(|(value, count)| FrequencyEntry {
                value: value.into_inner(),
                count,
            })
            .collect(),
        total_sum,
        total_count: values.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_match_the_input() {
        let values = [1.0, 2.0, 2.0, 3.5];
        let stats = aggregate(&values);

        assert_eq!(stats.total_sum, 8.5);
        assert_eq!(stats.total_count, 4);
        let counted: u32 = stats.entries.iter().map(|e| e.count).sum();
        assert_eq!(counted as usize, values.len());
    }

    #[test]
    fn subtotals_sum_to_the_total() {
        let values = [5.5, 10.0, 10.0, 0.5, 0.5, 0.5];
        let stats = aggregate(&values);

        let from_subtotals: f64 = stats.entries.iter().map(FrequencyEntry::subtotal).sum();
        assert_eq!(from_subtotals, stats.total_sum);
    }

    #[test]
    fn table_is_strictly_ascending_with_no_duplicates() {
        let stats = aggregate(&[20.0, 0.5, 10.0, 0.5, 500.0, 10.0, 10.0]);

        for pair in stats.entries.windows(2) {
            assert!(pair[0].value < pair[1].value);
        }
    }

    #[test]
    fn equal_values_collapse_into_one_entry() {
        // 5 and 5.0 parse to the same f64 and must merge.
        let stats = aggregate(&["5".parse().unwrap(), "5.0".parse().unwrap()]);

        assert_eq!(
            stats.entries,
            vec![FrequencyEntry {
                value: 5.0,
                count: 2
            }]
        );
    }

    #[test]
    fn worked_example_from_mixed_text() {
        // The values "abc 10 xyz 10 5.5 ##" extracts to.
        let stats = aggregate(&[10.0, 10.0, 5.5]);

        assert_eq!(
            stats.entries,
            vec![
                FrequencyEntry {
                    value: 5.5,
                    count: 1
                },
                FrequencyEntry {
                    value: 10.0,
                    count: 2
                },
            ]
        );
        assert_eq!(stats.total_sum, 25.5);
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let stats = aggregate(&[]);

        assert!(stats.entries.is_empty());
        assert_eq!(stats.total_sum, 0.0);
        assert_eq!(stats.total_count, 0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let values = [3.0, 1.0, 2.0, 1.0, 3.0, 3.0];

        assert_eq!(aggregate(&values), aggregate(&values));
    }
}
