use crate::{JobIdRule, Result, StatusCodes, StatusSection};
use std::collections::HashMap;

/// Splits the scheduler's `condor_q -long` style dump into per-job sections.
///
/// Every `KEY = VALUE` line belongs to the current section, any other line closes it.
/// `JobStatus` codes are translated to names on the way in.
pub fn parse_status_text(text: &str, codes: &StatusCodes) -> Result<Vec<StatusSection>> {
  let mut sections = Vec::new();
  let mut section = StatusSection::new();

  for line in text.lines() {
    match split_line(line) {
      Some((key, value)) => {
        if key == "JobStatus" {
          section.insert(key, codes.name(value)?);
        } else {
          section.insert(key, value);
        }
      }
      None => {
        if !section.is_empty() {
          sections.push(std::mem::take(&mut section));
        }
      }
    }
  }

  if !section.is_empty() {
    sections.push(section);
  }

  log::trace!("Parsed {} scheduler sections", sections.len());

  Ok(sections)
}

/// Keys sections by the workflow job id found in their `Cmd`.
///
/// The queue lists every job on the cluster, so sections without a usable `Cmd` are
/// skipped rather than treated as errors.
pub fn index_by_job(
  sections: Vec<StatusSection>,
  rule: &JobIdRule,
) -> HashMap<String, StatusSection> {
  let mut by_job = HashMap::new();

  for section in sections {
    let job_id = section.cmd().and_then(|cmd| rule.extract(cmd));

    match job_id {
      Some(job_id) => {
        let job_id = job_id.to_string();
        if by_job.contains_key(&job_id) {
          log::warn!("Job {} appears more than once in the queue", job_id);
        }
        by_job.insert(job_id, section);
      }
      None => {
        log::warn!(
          "Skipping scheduler section without a job id in Cmd: {:?}",
          section.cmd()
        );
      }
    }
  }

  by_job
}

/// `KEY = VALUE`: the key ends one byte before `=`, the value starts two bytes after it.
fn split_line(line: &str) -> Option<(&str, &str)> {
  let i = line.find('=')?;

  let key = line.get(..i.saturating_sub(1)).unwrap_or(&line[..i]).trim();
  let value = line.get(i + 2..).unwrap_or_else(|| &line[i + 1..]);

  Some((key, value))
}
