//! Precomputed reference ranges and their lookup.
//!
//! The dataset is owned by whoever loads it and never mutated afterwards;
//! lookups are plain reads. `LazyReferenceBook` defers loading to first use
//! behind a single initialisation barrier.

use std::collections::hash_map::{Entry, HashMap};
use std::path::Path;

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};

use crate::distribution::{normalize_labeled, ActionDistribution, DistributionConfig, RawHandEntry};
use crate::error::{GradeError, GradeResult};
use crate::scenario::{Position, PreviousAction, ScenarioContext, ScenarioKey, Street};
use crate::stack::StackConfig;

static STANDARD_RANGES_JSON: &str = include_str!("../data/reference_ranges.json");

pub const DEFAULT_SOLVER: &str = "TexasSolver";
pub const DEFAULT_SOLVER_VERSION: &str = "v1.0.1";

fn default_solver() -> String {
    DEFAULT_SOLVER.to_string()
}

fn default_solver_version() -> String {
    DEFAULT_SOLVER_VERSION.to_string()
}

/// Which solver produced a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverInfo {
    #[serde(default = "default_solver")]
    pub solver: String,
    #[serde(rename = "solverVersion", default = "default_solver_version")]
    pub solver_version: String,
}

impl Default for SolverInfo {
    fn default() -> Self {
        Self {
            solver: default_solver(),
            solver_version: default_solver_version(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ReferenceRecord {
    position: Position,
    #[serde(default)]
    street: Street,
    #[serde(default)]
    history: Vec<PreviousAction>,
    #[serde(rename = "effectiveStack")]
    effective_stack: f64,
    pot: f64,
    solver: Option<String>,
    #[serde(rename = "solverVersion")]
    solver_version: Option<String>,
    hands: Vec<RawHandEntry>,
}

#[derive(Deserialize, Debug)]
struct ReferenceFile {
    #[serde(flatten)]
    solver: SolverInfo,
    ranges: Vec<ReferenceRecord>,
}

/// Authoritative distribution for one scenario key.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceRange {
    pub key: ScenarioKey,
    pub distribution: ActionDistribution,
    pub source: SolverInfo,
}

/// Read-only index of reference ranges by scenario key.
#[derive(Debug, Clone)]
pub struct ReferenceBook {
    stack: StackConfig,
    ranges: HashMap<ScenarioKey, ReferenceRange>,
}

impl ReferenceBook {
    pub fn new(stack: StackConfig) -> ReferenceBook {
        ReferenceBook {
            stack,
            ranges: HashMap::new(),
        }
    }

    /// Keys are computed with the same `StackConfig` used for lookups, so the
    /// config must match the one the grader resolves with.
    pub fn stack_config(&self) -> &StackConfig {
        &self.stack
    }

    /// Add a range for `context`. A later range for the same key replaces the
    /// earlier one.
    pub fn insert(
        &mut self,
        context: &ScenarioContext,
        distribution: ActionDistribution,
        source: SolverInfo,
    ) -> GradeResult<&ReferenceRange> {
        let key = context.key(&self.stack)?;
        let range = ReferenceRange {
            key: key.clone(),
            distribution,
            source,
        };
        match self.ranges.entry(key) {
            Entry::Occupied(mut slot) => {
                log::warn!("replacing reference range for {}", slot.key());
                slot.insert(range);
                Ok(&*slot.into_mut())
            }
            Entry::Vacant(slot) => Ok(&*slot.insert(range)),
        }
    }

    pub fn get(&self, key: &ScenarioKey) -> GradeResult<&ReferenceRange> {
        self.ranges.get(key).ok_or_else(|| {
            log::debug!("no reference range for {}", key);
            GradeError::NoReferenceRange(key.clone())
        })
    }

    /// Resolve a scenario to exactly one reference range.
    pub fn resolve(&self, context: &ScenarioContext) -> GradeResult<&ReferenceRange> {
        let key = context.key(&self.stack)?;
        self.get(&key)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Keys in a stable order (position, then history length, then bucket).
    pub fn keys(&self) -> Vec<&ScenarioKey> {
        let mut keys: Vec<&ScenarioKey> = self.ranges.keys().collect();
        keys.sort_by(|a, b| {
            (a.position, a.history.len(), a.spr).cmp(&(b.position, b.history.len(), b.spr))
        });
        keys
    }

    pub fn ranges_for(&self, position: Position) -> Vec<&ReferenceRange> {
        self.keys()
            .into_iter()
            .filter(|k| k.position == position)
            .filter_map(|k| self.ranges.get(k))
            .collect()
    }

    pub fn from_json(json: &str, stack: StackConfig) -> GradeResult<ReferenceBook> {
        let file: ReferenceFile = serde_json::from_str(json)?;
        let distribution_config = DistributionConfig::default();
        let mut book = ReferenceBook::new(stack);

        for record in file.ranges {
            let context = ScenarioContext::new(
                record.position,
                record.history,
                record.effective_stack,
                record.pot,
            )?
            .with_street(record.street);
            let distribution = normalize_labeled(&record.hands, &distribution_config)?;
            let source = SolverInfo {
                solver: record.solver.unwrap_or_else(|| file.solver.solver.clone()),
                solver_version: record
                    .solver_version
                    .unwrap_or_else(|| file.solver.solver_version.clone()),
            };
            book.insert(&context, distribution, source)?;
        }

        log::info!("loaded {} reference ranges", book.len());
        Ok(book)
    }

    pub fn from_file(path: &Path, stack: StackConfig) -> GradeResult<ReferenceBook> {
        log::debug!("reading reference ranges from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        ReferenceBook::from_json(&json, stack)
    }
}

/// Parse the bundled ranges, keyed under `stack`.
pub fn load_standard(stack: StackConfig) -> GradeResult<ReferenceBook> {
    ReferenceBook::from_json(STANDARD_RANGES_JSON, stack)
}

static STANDARD_BOOK: Lazy<ReferenceBook> =
    Lazy::new(|| load_standard(StackConfig::default()).expect("Failed to parse standard reference ranges"));

/// The bundled 6-max 100bb opening and BB defence ranges, keyed with the
/// default `StackConfig`.
pub fn standard_book() -> &'static ReferenceBook {
    &STANDARD_BOOK
}

type Loader = Box<dyn Fn() -> GradeResult<ReferenceBook> + Send + Sync>;

/// A reference book loaded on first access. Concurrent first callers block on
/// one load; a failed load is not cached and the next call retries.
pub struct LazyReferenceBook {
    cell: OnceCell<ReferenceBook>,
    loader: Loader,
}

impl LazyReferenceBook {
    pub fn new<F>(loader: F) -> LazyReferenceBook
    where
        F: Fn() -> GradeResult<ReferenceBook> + Send + Sync + 'static,
    {
        LazyReferenceBook {
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    pub fn from_path(path: impl Into<std::path::PathBuf>, stack: StackConfig) -> LazyReferenceBook {
        let path = path.into();
        LazyReferenceBook::new(move || ReferenceBook::from_file(&path, stack.clone()))
    }

    pub fn get(&self) -> GradeResult<&ReferenceBook> {
        self.cell.get_or_try_init(|| (self.loader)())
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_book_parses() {
        let book = standard_book();
        assert_eq!(book.len(), 7);
        assert_eq!(book.ranges_for(Position::BTN).len(), 2);
    }
}
