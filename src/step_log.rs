use crate::direction::LocalPattern;
use crate::rule::Rule;
use serde::Serialize;
use std::collections::HashSet;

/// One applied rule, recorded before the rule took effect
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// 0-based step number
    pub index: usize,
    /// Agent position when the rule was chosen
    pub position: (i32, i32),
    /// Agent state when the rule was chosen
    pub state: u32,
    /// Observed neighbourhood, e.g. `NxWS`
    #[serde(serialize_with = "serialize_display")]
    pub pattern: LocalPattern,
    /// The rule that fired, in canonical text form
    #[serde(serialize_with = "serialize_display")]
    pub rule: Rule,
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

/// Ordered history of a run
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    records: Vec<StepRecord>,
}

impl StepLog {
    pub fn new() -> Self {
        StepLog { records: Vec::new() }
    }

    /// Record a step; the index is assigned from the log length
    pub fn record(&mut self, position: (i32, i32), state: u32, pattern: LocalPattern, rule: &Rule) {
        self.records.push(StepRecord {
            index: self.records.len(),
            position,
            state,
            pattern,
            rule: rule.clone(),
        });
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty JSON array of all records
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Human-readable statistics
    pub fn summary(&self) -> String {
        let positions: HashSet<(i32, i32)> = self.records.iter().map(|r| r.position).collect();
        let mut states: Vec<u32> = self
            .records
            .iter()
            .map(|r| r.state)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        states.sort_unstable();
        let rules_used: HashSet<&Rule> = self.records.iter().map(|r| &r.rule).collect();

        format!(
            "Steps: {}\n\
             Distinct cells visited: {}\n\
             States visited: {:?}\n\
             Distinct rules fired: {}",
            self.records.len(),
            positions.len(),
            states,
            rules_used.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_assigns_indices() {
        let rule = Rule::parse("0 *x** -> E 0").unwrap();
        let mut log = StepLog::new();
        assert!(log.is_empty());
        log.record((0, 0), 0, LocalPattern::new(true, false, true, false), &rule);
        log.record((1, 0), 0, LocalPattern::new(true, false, false, false), &rule);
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[1].index, 1);
        assert_eq!(log.records()[1].position, (1, 0));
    }

    #[test]
    fn test_json_uses_text_forms() {
        let rule = Rule::parse("0 *x** -> E 0").unwrap();
        let mut log = StepLog::new();
        log.record((2, 3), 0, LocalPattern::new(false, false, false, false), &rule);

        let value: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["rule"], "0 *x** -> E 0");
        assert_eq!(value[0]["pattern"], "xxxx");
        assert_eq!(value[0]["position"], serde_json::json!([2, 3]));
        assert_eq!(value[0]["state"], 0);
    }

    #[test]
    fn test_summary() {
        let east = Rule::parse("0 *x** -> E 1").unwrap();
        let south = Rule::parse("1 ***x -> S 0").unwrap();
        let mut log = StepLog::new();
        let open = LocalPattern::default();
        log.record((0, 0), 0, open, &east);
        log.record((1, 0), 1, open, &south);
        log.record((1, 1), 0, open, &east);

        let summary = log.summary();
        assert!(summary.contains("Steps: 3"));
        assert!(summary.contains("Distinct cells visited: 3"));
        assert!(summary.contains("States visited: [0, 1]"));
        assert!(summary.contains("Distinct rules fired: 2"));
    }
}
