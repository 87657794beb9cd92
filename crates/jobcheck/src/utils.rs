pub const DEFAULT_TAIL_LINES: usize = 20;

/// Returns the last `n` newline-separated lines of `text`.
pub fn tail(text: &str, n: usize) -> String {
  let lines: Vec<&str> = text.split('\n').collect();
  let start = lines.len().saturating_sub(n);

  lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tail() {
    assert_eq!(tail("a\nb\nc", 2), "b\nc");
    assert_eq!(tail("a\nb\nc", 3), "a\nb\nc");
  }

  #[test]
  fn test_tail_fewer_lines() {
    assert_eq!(tail("a\nb", 20), "a\nb");
    assert_eq!(tail("", 5), "");
  }

  #[test]
  fn test_tail_zero() {
    assert_eq!(tail("a\nb\nc", 0), "");
  }

  #[test]
  fn test_tail_trailing_newline() {
    // The empty segment after the final newline counts as a line.
    assert_eq!(tail("a\nb\nc\n", 2), "c\n");
  }

  #[test]
  fn test_tail_default() {
    let text: Vec<String> = (1..=30).map(|i| i.to_string()).collect();
    let text = text.join("\n");

    let lines: Vec<String> = tail(&text, DEFAULT_TAIL_LINES)
      .split('\n')
      .map(|s| s.to_string())
      .collect();
    assert_eq!(lines.len(), DEFAULT_TAIL_LINES);
    assert_eq!(lines.first().unwrap(), "11");
    assert_eq!(lines.last().unwrap(), "30");
  }
}
