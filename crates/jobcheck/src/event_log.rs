use crate::{Error, EventRecord, EventValue, Result};
use roxmltree::{Document, Node};

const SYNTHETIC_ROOT: &str = "events";

/// Parses a scheduler event log fragment.
///
/// The log is a run of sibling event elements without a common root, e.g.
///
/// ```text
/// <c>
///   <a n="MyType"><s>ExecuteEvent</s></a>
///   <a n="EventTime"><s>2016-05-03T10:12:13</s></a>
///   <a n="Cluster"><i>1234</i></a>
/// </c>
/// <c>...</c>
/// ```
///
/// Events are returned in the order they appear in the log.
pub fn parse_event_log(fragment: &str) -> Result<Vec<EventRecord>> {
  let wrapped = format!(
    "<{root}>{}</{root}>",
    strip_declaration(fragment),
    root = SYNTHETIC_ROOT
  );

  let document = Document::parse(&wrapped)
    .map_err(|err| Error::format_error(format!("Invalid event log: {}", err)))?;

  document
    .root_element()
    .children()
    .filter(|node| node.is_element())
    .map(parse_event)
    .collect()
}

fn parse_event(node: Node) -> Result<EventRecord> {
  let mut event = EventRecord::new();

  for attribute in node.children().filter(|n| n.is_element()) {
    let name = attribute.attribute("n").ok_or_else(|| {
      Error::format_error(format!(
        "Event attribute <{}> has no name",
        attribute.tag_name().name()
      ))
    })?;

    event.insert(name, parse_value(name, attribute)?);
  }

  Ok(event)
}

/// Each attribute carries exactly one typed leaf: `i`, `r`, `b` or `s`.
fn parse_value(name: &str, attribute: Node) -> Result<EventValue> {
  let leaf = attribute
    .children()
    .find(|n| n.is_element())
    .ok_or_else(|| Error::format_error(format!("Event attribute {} has no value", name)))?;

  // Comments split a leaf into several text nodes
  let text = leaf
    .children()
    .filter(|n| n.is_text())
    .filter_map(|n| n.text())
    .collect::<String>();

  let value = match leaf.tag_name().name() {
    "i" => text
      .trim()
      .parse::<i64>()
      .map(EventValue::Integer)
      .map_err(|err| {
        Error::format_error(format!("Invalid integer for {}: {:?} ({})", name, text, err))
      })?,
    "r" => text
      .trim()
      .parse::<f64>()
      .map(EventValue::Real)
      .map_err(|err| Error::format_error(format!("Invalid real for {}: {:?} ({})", name, text, err)))?,
    "b" => EventValue::Boolean(leaf.attribute("v") == Some("t")),
    "s" => EventValue::String(text),
    tag => return Err(Error::unknown_attribute_type(tag)),
  };

  Ok(value)
}

fn strip_declaration(fragment: &str) -> &str {
  let trimmed = fragment.trim_start();
  if trimmed.starts_with("<?xml") {
    if let Some(end) = trimmed.find("?>") {
      return &trimmed[end + 2..];
    }
  }

  fragment
}
