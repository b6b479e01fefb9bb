//! Domain models: the curated catalog (phase → subcategory → problems) and the solved set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::slug::extract_slug;

/// One catalog entry. Its identity is the slug derived from `url`, never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
  pub title: String,
  pub url: String,
}

impl Problem {
  pub fn slug(&self) -> &str {
    extract_slug(&self.url)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subcategory {
  pub name: String,
  pub problems: Vec<Problem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phase {
  pub name: String,
  pub subcategories: Vec<Subcategory>,
}

impl Phase {
  pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
    self.subcategories.iter().find(|s| s.name == name)
  }
}

/// Static catalog, in document order. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
  pub phases: Vec<Phase>,
}

impl Catalog {
  pub fn phase(&self, name: &str) -> Option<&Phase> {
    self.phases.iter().find(|p| p.name == name)
  }

  pub fn problem_count(&self) -> usize {
    self.phases
      .iter()
      .flat_map(|p| p.subcategories.iter())
      .map(|s| s.problems.len())
      .sum()
  }
}

/// Slugs reported as accepted for the tracked user. Replaced wholesale on refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolvedSet {
  slugs: HashSet<String>,
}

impl SolvedSet {
  pub fn contains(&self, slug: &str) -> bool {
    self.slugs.contains(slug)
  }

  pub fn is_solved(&self, problem: &Problem) -> bool {
    self.contains(problem.slug())
  }

  pub fn len(&self) -> usize {
    self.slugs.len()
  }
}

impl<S: Into<String>> FromIterator<S> for SolvedSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self { slugs: iter.into_iter().map(Into::into).collect() }
  }
}
