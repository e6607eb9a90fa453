//! # Version Ordering
//!
//! Jira version names are loosely structured (`1.4`, `1.4.2.1`, `2.0rc1`,
//! `1.0-beta`). [`LooseVersion`] splits a name into numeric and textual
//! components and orders component-wise: numbers compare numerically, numbers
//! sort before text, and a version that is a prefix of another sorts first.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::models::ProjectVersion;

/// One piece of a version name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionComponent {
  Numeric(u64),
  Text(String),
}

/// A version name with a total, component-wise ordering
#[derive(Debug, Clone)]
pub struct LooseVersion {
  raw: String,
  components: Vec<VersionComponent>,
}

impl LooseVersion {
  pub fn parse(raw: &str) -> Self {
    let mut components = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&next) = chars.peek() {
      if next == '.' {
        chars.next();
      } else if next.is_ascii_digit() {
        let mut digits = String::new();
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
          digits.push(digit);
        }
        components.push(match digits.parse() {
          Ok(number) => VersionComponent::Numeric(number),
          Err(_) => VersionComponent::Text(digits),
        });
      } else {
        let mut text = String::new();
        while let Some(c) = chars.next_if(|c| *c != '.' && !c.is_ascii_digit()) {
          text.push(c);
        }
        components.push(VersionComponent::Text(text));
      }
    }

    Self {
      raw: raw.to_string(),
      components,
    }
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }

  pub fn components(&self) -> &[VersionComponent] {
    &self.components
  }
}

impl FromStr for LooseVersion {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::parse(s))
  }
}

impl fmt::Display for LooseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl PartialEq for LooseVersion {
  fn eq(&self, other: &Self) -> bool {
    self.components == other.components
  }
}

impl Eq for LooseVersion {}

impl PartialOrd for LooseVersion {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for LooseVersion {
  fn cmp(&self, other: &Self) -> Ordering {
    self.components.cmp(&other.components)
  }
}

/// Three-way comparison of two version names
pub fn compare_versions(a: &str, b: &str) -> Ordering {
  LooseVersion::parse(a).cmp(&LooseVersion::parse(b))
}

/// Versions whose name is `major` or starts with `major.`, in ascending order
fn versions_in_major<'a>(versions: &'a [ProjectVersion], major: &str) -> Vec<&'a ProjectVersion> {
  let Ok(pattern) = Regex::new(&format!(r"^{}(?:$|\.)", regex::escape(major))) else {
    return Vec::new();
  };

  let mut matching: Vec<&ProjectVersion> = versions
    .iter()
    .filter(|version| pattern.is_match(&version.name))
    .collect();
  matching.sort_by_cached_key(|version| LooseVersion::parse(&version.name));
  matching
}

/// Lowest version in the `major` line
pub fn first_release_version<'a>(versions: &'a [ProjectVersion], major: &str) -> Option<&'a ProjectVersion> {
  versions_in_major(versions, major).first().copied()
}

/// Highest version in the `major` line
pub fn last_release_version<'a>(versions: &'a [ProjectVersion], major: &str) -> Option<&'a ProjectVersion> {
  versions_in_major(versions, major).last().copied()
}

fn find_containing<'a>(versions: &'a [ProjectVersion], name: &str) -> Option<&'a ProjectVersion> {
  if name.is_empty() {
    return None;
  }
  versions.iter().find(|version| version.name.contains(name))
}

/// Release date of the first version whose name contains `name`
pub fn release_date<'a>(versions: &'a [ProjectVersion], name: &str) -> Option<&'a str> {
  find_containing(versions, name).and_then(|version| version.release_date.as_deref())
}

/// Start date of the first version whose name contains `name`
pub fn start_date<'a>(versions: &'a [ProjectVersion], name: &str) -> Option<&'a str> {
  find_containing(versions, name).and_then(|version| version.start_date.as_deref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  Ascending,
  #[default]
  Descending,
}

/// Sort `items` by a version-valued key, then split them into runs that share
/// the same group key
pub fn group_by_version<T, G, S, K>(mut items: Vec<T>, sort_key: S, group_key: K, order: SortOrder) -> Vec<Vec<T>>
where
  S: Fn(&T) -> &str,
  K: Fn(&T) -> G,
  G: PartialEq,
{
  items.sort_by_cached_key(|item| LooseVersion::parse(sort_key(item)));
  if order == SortOrder::Descending {
    items.reverse();
  }

  let mut groups: Vec<Vec<T>> = Vec::new();
  let mut current_key: Option<G> = None;
  for item in items {
    let key = group_key(&item);
    match groups.last_mut() {
      Some(group) if current_key.as_ref() == Some(&key) => group.push(item),
      _ => {
        groups.push(vec![item]);
        current_key = Some(key);
      }
    }
  }
  groups
}
