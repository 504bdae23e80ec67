//! Orchestration: completion under a wall-clock bailout, completion
//! caching, and word-tree construction.

use crate::cache::CompletionCache;
use crate::config::TilingConfig;
use crate::error::{Result, TilingError};
use crate::representation::Representation;
use crate::rewrite::{CompletionConfig, CompletionError, KnuthBendix, Presentation, Progress, RewriteSystem};
use crate::tree::WordTree;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Completes `presentation`, failing with [`CompletionError::Timeout`] once
/// `config.bailout_ms` of wall-clock time has passed.
///
/// The clock is checked between batches of `config.batch_steps` pairs, so
/// the overrun is bounded by one batch.
pub fn complete(
    presentation: &Presentation,
    config: &CompletionConfig,
) -> Result<RewriteSystem, CompletionError> {
    let start = Instant::now();
    complete_with_clock(presentation, config, || start.elapsed())
}

/// [`complete`] with an explicit elapsed-time source.
pub fn complete_with_clock(
    presentation: &Presentation,
    config: &CompletionConfig,
    mut elapsed: impl FnMut() -> Duration,
) -> Result<RewriteSystem, CompletionError> {
    let mut kb = KnuthBendix::new(presentation, *config);
    let batch = config.batch_steps.max(1);

    while kb.run(batch)? == Progress::Pending {
        let Some(bailout) = config.bailout() else {
            continue;
        };
        let elapsed = elapsed();
        if elapsed >= bailout {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                steps = kb.steps(),
                rules = kb.rules().len(),
                "completion is taking too long, bailing out"
            );
            return Err(CompletionError::Timeout {
                elapsed,
                steps: kb.steps(),
                rules: kb.rules().len(),
            });
        }
    }
    kb.finish()
}

/// Returns the cached system for `presentation`, completing and caching it
/// on a miss.
pub fn complete_cached(
    cache: &mut CompletionCache,
    presentation: &Presentation,
    config: &CompletionConfig,
) -> Result<RewriteSystem> {
    if let Some(system) = cache.get(presentation) {
        info!(fingerprint = %presentation.fingerprint(), "completion cache hit");
        return Ok(system.clone());
    }
    let system = complete(presentation, config)?;
    cache.insert(presentation, system.clone());
    Ok(system)
}

/// Completes `presentation` and builds a word tree over it.
///
/// The representation must have been built in the configured geometry and
/// cover every generator.
pub fn build(
    config: &TilingConfig,
    presentation: &Presentation,
    representation: Representation,
) -> Result<WordTree> {
    check_signature(config, &representation)?;
    representation.validate(presentation.alphabet())?;
    let system = complete(presentation, &config.completion)?;
    WordTree::new(system, representation)
}

/// [`build`] going through a completion cache.
pub fn build_cached(
    cache: &mut CompletionCache,
    config: &TilingConfig,
    presentation: &Presentation,
    representation: Representation,
) -> Result<WordTree> {
    check_signature(config, &representation)?;
    representation.validate(presentation.alphabet())?;
    let system = complete_cached(cache, presentation, &config.completion)?;
    WordTree::new(system, representation)
}

fn check_signature(config: &TilingConfig, representation: &Representation) -> Result<()> {
    if config.signature != representation.signature() {
        return Err(TilingError::SignatureMismatch {
            expected: config.signature,
            found: representation.signature(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Signature;

    #[test]
    fn completes_within_bailout() {
        let p = Presentation::triangle(5, 3, 2).unwrap();
        let system = complete(&p, &CompletionConfig::default()).unwrap();
        assert_eq!(system.rules().len(), 9);
    }

    #[test]
    fn slow_clock_times_out() {
        let p = Presentation::triangle(5, 3, 2).unwrap();
        let config = CompletionConfig {
            bailout_ms: 100,
            batch_steps: 4,
            ..CompletionConfig::default()
        };
        let err = complete_with_clock(&p, &config, || Duration::from_secs(1)).unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Timeout { elapsed, steps: 4, .. } if elapsed == Duration::from_secs(1)
        ));
    }

    #[test]
    fn zero_bailout_never_times_out() {
        let p = Presentation::triangle(4, 3, 2).unwrap();
        let config = CompletionConfig {
            bailout_ms: 0,
            batch_steps: 1,
            ..CompletionConfig::default()
        };
        let system = complete_with_clock(&p, &config, || Duration::from_secs(3600)).unwrap();
        assert_eq!(system.rules().len(), 8);
    }

    #[test]
    fn cached_completion_is_reused() {
        let p = Presentation::triangle(3, 3, 2).unwrap();
        let mut cache = CompletionCache::new();
        let first = complete_cached(&mut cache, &p, &CompletionConfig::default()).unwrap();
        assert_eq!(cache.len(), 1);

        // a budget that could not complete proves the second call is a hit
        let starved = CompletionConfig {
            max_steps: 1,
            ..CompletionConfig::default()
        };
        let second = complete_cached(&mut cache, &p, &starved).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn build_checks_signature_and_coverage() {
        let p = Presentation::triangle(3, 7, 2).unwrap();
        let rep = Representation::triangle(3, 7, 2).unwrap();

        let spherical = TilingConfig::new(Signature::Spherical);
        assert!(matches!(
            build(&spherical, &p, rep.clone()),
            Err(TilingError::SignatureMismatch {
                expected: Signature::Spherical,
                found: Signature::Hyperbolic,
            })
        ));

        let config = TilingConfig::new(Signature::Hyperbolic);
        let partial = Representation::new(3, Signature::Hyperbolic);
        assert!(matches!(
            build(&config, &p, partial),
            Err(TilingError::MissingRepresentation(_))
        ));

        let mut tree = build(&config, &p, rep).unwrap();
        let bc = tree.parse("bc").unwrap();
        let trace = tree.orbit(&[], &bc, 14, |_| {}).unwrap();
        assert!(trace.closed);
    }

    #[test]
    fn build_surfaces_completion_failure() {
        let p = Presentation::triangle(5, 3, 2).unwrap();
        let rep = Representation::triangle(5, 3, 2).unwrap();
        let mut config = TilingConfig::new(Signature::Spherical);
        config.completion.max_rules = 7;
        assert!(matches!(
            build(&config, &p, rep),
            Err(TilingError::Completion(CompletionError::BudgetExhausted { .. }))
        ));
    }

    #[test]
    fn build_cached_fills_cache() {
        let p = Presentation::triangle(4, 3, 2).unwrap();
        let config = TilingConfig::new(Signature::Spherical);
        let mut cache = CompletionCache::new();
        let mut tree =
            build_cached(&mut cache, &config, &p, Representation::triangle(4, 3, 2).unwrap()).unwrap();
        assert_eq!(cache.len(), 1);
        tree.expand(20, |_| {}).unwrap();
        assert_eq!(tree.count(), 48);
    }
}
