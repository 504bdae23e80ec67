//! Resumable Knuth–Bendix completion.
//!
//! Completion walks ordered pairs `(i, j)` of the working rule vector by
//! index. For each pair of active rules the overlap word of their left sides
//! is rewritten once by each rule and then normalized by the whole working
//! set. Disagreeing normal forms are oriented shortlex into a new rule, which
//! deactivates every active rule whose left side it can rewrite and is then
//! appended. The double loop re-reads the vector length, so appended rules
//! are paired as well. Completion ends when the outer index runs off the end.
//!
//! Progress is paced by steps (one pair per step) so callers can interleave
//! completion with other work; a [`CompletionConfig`] bounds total steps and
//! rule count deterministically. Wall-clock limits are applied by the caller,
//! see [`crate::tiling::complete`].

use super::{Alphabet, Generator, Presentation, RewriteRule, RewriteSystem, Word};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Completion did not reach a confluent system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The wall-clock bailout elapsed first.
    #[error("completion timed out after {elapsed:?} ({steps} steps, {rules} rules)")]
    Timeout {
        elapsed: Duration,
        steps: u64,
        rules: usize,
    },

    /// The deterministic step or rule budget ran out first.
    #[error("completion budget exhausted after {steps} steps with {rules} rules")]
    BudgetExhausted { steps: u64, rules: usize },
}

fn default_max_steps() -> u64 {
    1_000_000
}

fn default_max_rules() -> usize {
    4096
}

fn default_bailout_ms() -> u64 {
    5000
}

fn default_batch_steps() -> u64 {
    256
}

/// Budget for one completion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Maximum number of examined rule pairs.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
    /// Maximum length of the working rule vector (active or not).
    #[serde(default = "default_max_rules")]
    pub max_rules: usize,
    /// Wall-clock bailout for [`crate::tiling::complete`]; 0 disables it.
    #[serde(default = "default_bailout_ms")]
    pub bailout_ms: u64,
    /// Steps per batch between wall-clock checks.
    #[serde(default = "default_batch_steps")]
    pub batch_steps: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_rules: default_max_rules(),
            bailout_ms: default_bailout_ms(),
            batch_steps: default_batch_steps(),
        }
    }
}

impl CompletionConfig {
    pub fn bailout(&self) -> Option<Duration> {
        (self.bailout_ms > 0).then(|| Duration::from_millis(self.bailout_ms))
    }
}

/// Result of a bounded [`KnuthBendix::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Pairs remain to be examined.
    Pending,
    /// The pair loop is exhausted; the rule set is confluent.
    Complete,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepOutcome {
    Skipped,
    Joinable,
    Duplicate,
    Added { subsumed: usize },
}

/// In-progress completion state.
#[derive(Debug, Clone)]
pub struct KnuthBendix {
    alphabet: Alphabet,
    rules: Vec<RewriteRule>,
    config: CompletionConfig,
    i: usize,
    j: usize,
    steps: u64,
    scratch: Vec<Generator>,
}

impl KnuthBendix {
    /// Seeds the working set with the presentation's axioms, stably sorted
    /// by left-side length.
    pub fn new(presentation: &Presentation, config: CompletionConfig) -> Self {
        let mut rules = presentation.axioms().to_vec();
        rules.sort_by_key(|r| r.lhs.len());
        Self {
            alphabet: presentation.alphabet().clone(),
            rules,
            config,
            i: 0,
            j: 0,
            steps: 0,
            scratch: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.i >= self.rules.len()
    }

    /// Number of pairs examined so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Working rules, including deactivated ones.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn active_count(&self) -> usize {
        self.rules.iter().filter(|r| r.active).count()
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Examines the next pair. Returns the progress after the step.
    pub fn step(&mut self) -> Result<Progress, CompletionError> {
        if self.is_complete() {
            return Ok(Progress::Complete);
        }
        if self.steps >= self.config.max_steps {
            return Err(self.exhausted());
        }

        let outcome = self.examine(self.i, self.j);
        self.steps += 1;
        if let StepOutcome::Added { subsumed } = outcome {
            let rule = &self.rules[self.rules.len() - 1];
            debug!(
                lhs = %self.alphabet.format(&rule.lhs),
                rhs = %self.alphabet.format(&rule.rhs),
                subsumed,
                rules = self.rules.len(),
                "added rule"
            );
            if self.rules.len() > self.config.max_rules {
                return Err(self.exhausted());
            }
        }

        self.j += 1;
        if self.j >= self.rules.len() {
            self.i += 1;
            self.j = 0;
        }

        Ok(if self.is_complete() {
            Progress::Complete
        } else {
            Progress::Pending
        })
    }

    /// Examines up to `max_steps` pairs.
    pub fn run(&mut self, max_steps: u64) -> Result<Progress, CompletionError> {
        for _ in 0..max_steps {
            if self.step()? == Progress::Complete {
                return Ok(Progress::Complete);
            }
        }
        Ok(if self.is_complete() {
            Progress::Complete
        } else {
            Progress::Pending
        })
    }

    /// Runs to the end of the budget and returns the confluent system.
    pub fn complete(mut self) -> Result<RewriteSystem, CompletionError> {
        while self.step()? == Progress::Pending {}
        self.finish()
    }

    /// Converts a finished completion into a rewrite system. Fails with
    /// [`CompletionError::BudgetExhausted`] if pairs remain.
    pub fn finish(self) -> Result<RewriteSystem, CompletionError> {
        if !self.is_complete() {
            return Err(self.exhausted());
        }
        info!(
            rules = self.active_count(),
            steps = self.steps,
            "completion finished"
        );
        let mut rules: Vec<RewriteRule> = self.rules.into_iter().filter(|r| r.active).collect();
        rules.sort_by(|a, b| a.lhs.cmp(&b.lhs));
        Ok(RewriteSystem::new(self.alphabet, rules))
    }

    fn exhausted(&self) -> CompletionError {
        CompletionError::BudgetExhausted {
            steps: self.steps,
            rules: self.rules.len(),
        }
    }

    fn examine(&mut self, i: usize, j: usize) -> StepOutcome {
        let (left, right) = (&self.rules[i], &self.rules[j]);
        if !(left.active && right.active) {
            return StepOutcome::Skipped;
        }
        let Some(overlap) = left.superpose(right) else {
            return StepOutcome::Skipped;
        };

        let by_left = left.apply(&overlap);
        let by_right = right.apply(&overlap);
        let by_left = normalize(&self.rules, by_left, &mut self.scratch);
        let by_right = normalize(&self.rules, by_right, &mut self.scratch);
        trace!(
            i,
            j,
            overlap = %self.alphabet.format(&overlap),
            left = %self.alphabet.format(&by_left),
            right = %self.alphabet.format(&by_right),
            "critical pair"
        );

        if by_left == by_right {
            return StepOutcome::Joinable;
        }

        let candidate = if by_left.cmp(&by_right) == Ordering::Greater {
            RewriteRule::new(by_left, by_right)
        } else {
            RewriteRule::new(by_right, by_left)
        };
        if self
            .rules
            .iter()
            .any(|r| r.active && candidate.is_duplicate(r))
        {
            return StepOutcome::Duplicate;
        }

        let mut subsumed = 0;
        for rule in self.rules.iter_mut().filter(|r| r.active) {
            if candidate.apply_into(&rule.lhs, &mut self.scratch) {
                rule.active = false;
                subsumed += 1;
                debug!(
                    lhs = %self.alphabet.format(&rule.lhs),
                    rhs = %self.alphabet.format(&rule.rhs),
                    "subsumed rule"
                );
            }
        }
        self.rules.push(candidate);
        StepOutcome::Added { subsumed }
    }
}

/// Applies every active rule in order, repeating full passes until a pass
/// leaves the word unchanged.
pub(crate) fn normalize(rules: &[RewriteRule], word: Word, scratch: &mut Vec<Generator>) -> Word {
    let mut current = word.into_vec();
    loop {
        let mut changed = false;
        for rule in rules.iter().filter(|r| r.active) {
            if rule.apply_into(&current, scratch) {
                std::mem::swap(&mut current, scratch);
                changed = true;
            }
        }
        if !changed {
            return Word::from(current);
        }
    }
}
