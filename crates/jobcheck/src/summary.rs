use crate::Call;
use std::collections::HashMap;

/// Number of calls per scheduler status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSummary {
  pub counts: HashMap<String, usize>,
}

impl StatusSummary {
  pub fn from_calls(calls: &[Call]) -> Self {
    let mut counts = HashMap::new();
    for call in calls {
      *counts.entry(call.status().to_string()).or_insert(0) += 1;
    }

    StatusSummary { counts }
  }

  pub fn get(&self, status: &str) -> usize {
    self.counts.get(status).copied().unwrap_or(0)
  }

  pub fn total(&self) -> usize {
    self.counts.values().sum()
  }
}

impl std::fmt::Display for StatusSummary {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut counts: Vec<(&String, &usize)> = self.counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let counts = counts
      .iter()
      .map(|(status, count)| format!("{}: {}", status, count))
      .collect::<Vec<_>>();

    write!(f, "{}", counts.join(", "))
  }
}
