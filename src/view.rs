//! View state: immutable snapshots advanced by a pure reducer.
//!
//! Every network completion and user action becomes an `Event`; `reduce`
//! builds the next `Snapshot` from the previous one. Nothing here does I/O.

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;

use crate::domain::{Catalog, Problem, SolvedSet};

/// What a toggle addresses: a whole phase, or one subcategory inside a phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpansionKey {
    Phase(String),
    Subcategory(String, String),
}

impl ExpansionKey {
    pub fn new(phase: impl Into<String>, subcategory: Option<String>) -> Self {
        match subcategory {
            Some(sub) => Self::Subcategory(phase.into(), sub),
            None => Self::Phase(phase.into()),
        }
    }
}

/// Explicit per-key values over a configurable default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionState {
    default_expanded: bool,
    explicit: HashMap<ExpansionKey, bool>,
}

impl ExpansionState {
    pub fn new(default_expanded: bool) -> Self {
        Self { default_expanded, explicit: HashMap::new() }
    }

    pub fn is_expanded(&self, key: &ExpansionKey) -> bool {
        self.explicit.get(key).copied().unwrap_or(self.default_expanded)
    }

    pub fn toggled(&self, key: ExpansionKey) -> Self {
        let mut next = self.clone();
        let flipped = !self.is_expanded(&key);
        next.explicit.insert(key, flipped);
        next
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// `None` while the catalog is loading (or failed to load).
    pub catalog: Option<Arc<Catalog>>,
    /// `None` until the first successful solved-set fetch.
    pub solved: Option<Arc<SolvedSet>>,
    /// Sequence number of the refresh whose result is in `solved`.
    pub solved_seq: u64,
    pub expansion: ExpansionState,
}

#[derive(Debug)]
pub enum Event {
    CatalogLoaded(Catalog),
    SolvedLoaded { seq: u64, solved: SolvedSet },
    Toggle(ExpansionKey),
}

impl Snapshot {
    pub fn new(default_expanded: bool) -> Self {
        Self { expansion: ExpansionState::new(default_expanded), ..Default::default() }
    }
}

pub fn reduce(prev: &Snapshot, event: Event) -> Snapshot {
    match event {
        Event::CatalogLoaded(catalog) => Snapshot { catalog: Some(Arc::new(catalog)), ..prev.clone() },
        // Results of refreshes that started before the applied one are stale.
        Event::SolvedLoaded { seq, .. } if seq <= prev.solved_seq => prev.clone(),
        Event::SolvedLoaded { seq, solved } => Snapshot {
            solved: Some(Arc::new(solved)),
            solved_seq: seq,
            ..prev.clone()
        },
        Event::Toggle(key) => Snapshot { expansion: prev.expansion.toggled(key), ..prev.clone() },
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub solved: usize,
    pub total: usize,
}

impl std::ops::Add for Progress {
    type Output = Progress;
    fn add(self, rhs: Progress) -> Progress {
        Progress { solved: self.solved + rhs.solved, total: self.total + rhs.total }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.solved, self.total)
    }
}

pub fn progress<'a>(problems: impl IntoIterator<Item = &'a Problem>, solved: Option<&SolvedSet>) -> Progress {
    problems.into_iter().fold(Progress::default(), |acc, p| Progress {
        solved: acc.solved + usize::from(solved.is_some_and(|s| s.is_solved(p))),
        total: acc.total + 1,
    })
}

//
// Derived, serializable view of a snapshot
//

#[derive(Clone, Debug, Serialize)]
pub struct ProblemView {
    pub title: String,
    pub url: String,
    pub slug: String,
    pub solved: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubcategoryView {
    pub name: String,
    pub expanded: bool,
    pub progress: Progress,
    pub problems: Vec<ProblemView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PhaseView {
    pub name: String,
    pub expanded: bool,
    pub progress: Progress,
    pub subcategories: Vec<SubcategoryView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    /// True while the catalog is unset.
    pub loading: bool,
    pub solved_loaded: bool,
    pub progress: Progress,
    pub phases: Vec<PhaseView>,
}

impl Snapshot {
    pub fn dashboard(&self) -> DashboardView {
        let solved = self.solved.as_deref();
        let Some(catalog) = self.catalog.as_deref() else {
            return DashboardView {
                loading: true,
                solved_loaded: solved.is_some(),
                progress: Progress::default(),
                phases: Vec::new(),
            };
        };

        let phases: Vec<PhaseView> = catalog
            .phases
            .iter()
            .map(|phase| {
                let subcategories: Vec<SubcategoryView> = phase
                    .subcategories
                    .iter()
                    .map(|sub| SubcategoryView {
                        name: sub.name.clone(),
                        expanded: self
                            .expansion
                            .is_expanded(&ExpansionKey::Subcategory(phase.name.clone(), sub.name.clone())),
                        progress: progress(&sub.problems, solved),
                        problems: sub
                            .problems
                            .iter()
                            .map(|p| ProblemView {
                                title: p.title.clone(),
                                url: p.url.clone(),
                                slug: p.slug().to_string(),
                                solved: solved.is_some_and(|s| s.is_solved(p)),
                            })
                            .collect(),
                    })
                    .collect();
                PhaseView {
                    name: phase.name.clone(),
                    expanded: self.expansion.is_expanded(&ExpansionKey::Phase(phase.name.clone())),
                    progress: subcategories.iter().map(|s| s.progress).fold(Progress::default(), |a, b| a + b),
                    subcategories,
                }
            })
            .collect();

        DashboardView {
            loading: false,
            solved_loaded: solved.is_some(),
            progress: phases.iter().map(|p| p.progress).fold(Progress::default(), |a, b| a + b),
            phases,
        }
    }
}
