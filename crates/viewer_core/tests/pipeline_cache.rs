use std::collections::HashSet;

use viewer_core::{Fill, PipelineBuildError, PipelineCache, PipelineFactory, PipelineVariant, Shading};

/// Hands out numbered fake pipelines and refuses variants listed in `broken`.
#[derive(Default)]
struct CountingFactory {
    calls: Vec<PipelineVariant>,
    broken: HashSet<PipelineVariant>,
    next_id: u32,
}

impl PipelineFactory for CountingFactory {
    type Pipeline = (PipelineVariant, u32);

    fn build(&mut self, variant: PipelineVariant) -> Result<Self::Pipeline, PipelineBuildError> {
        self.calls.push(variant);
        if self.broken.contains(&variant) {
            return Err(PipelineBuildError::Invalid {
                variant,
                reason: "fake compile error".into(),
            });
        }
        self.next_id += 1;
        Ok((variant, self.next_id))
    }
}

const SMOOTH: PipelineVariant = PipelineVariant::new(Shading::Smooth, Fill::Solid);
const FLAT_WIRE: PipelineVariant = PipelineVariant::new(Shading::Flat, Fill::Wire);

#[test]
fn each_variant_builds_at_most_once() {
    let mut cache = PipelineCache::new(CountingFactory::default());
    for _ in 0..3 {
        for v in PipelineVariant::ALL {
            let (built_for, _) = *cache.get_or_build(v).expect("build");
            assert_eq!(built_for, v);
        }
    }
    assert_eq!(cache.build_count(), 4);
    assert_eq!(cache.factory().calls.len(), 4);
}

#[test]
fn cached_pipeline_is_returned_unchanged() {
    let mut cache = PipelineCache::new(CountingFactory::default());
    let first = *cache.get_or_build(SMOOTH).expect("build");
    let again = *cache.get_or_build(SMOOTH).expect("cached");
    assert_eq!(first, again);
}

#[test]
fn rebuild_replaces_entry_on_success() {
    let mut cache = PipelineCache::new(CountingFactory::default());
    let (_, old) = *cache.get_or_build(FLAT_WIRE).expect("build");
    let (_, new) = *cache.invalidate_and_rebuild(FLAT_WIRE).expect("rebuild");
    assert_ne!(old, new);
    let (_, now) = *cache.get_or_build(FLAT_WIRE).expect("cached");
    assert_eq!(now, new);
    assert_eq!(cache.build_count(), 2);
}

#[test]
fn failed_rebuild_keeps_previous_pipeline() {
    let mut cache = PipelineCache::new(CountingFactory::default());
    cache.activate(SMOOTH, false).expect("first bind");
    let (_, id) = *cache.active().expect("bound");

    cache.factory_mut().broken.insert(SMOOTH);
    assert!(cache.activate(SMOOTH, true).is_err());
    assert_eq!(cache.active_variant(), Some(SMOOTH));
    assert_eq!(cache.active().map(|p| p.1), Some(id));
}

#[test]
fn failed_switch_keeps_old_binding() {
    let mut cache = PipelineCache::new(CountingFactory::default());
    cache.activate(SMOOTH, false).expect("bind");
    cache.factory_mut().broken.insert(FLAT_WIRE);
    let err = cache.activate(FLAT_WIRE, false).unwrap_err();
    assert!(matches!(err, PipelineBuildError::Invalid { .. }));
    assert_eq!(cache.active_variant(), Some(SMOOTH));
    assert!(!cache.is_built(FLAT_WIRE));

    // Lazy retry once the factory recovers.
    cache.factory_mut().broken.clear();
    cache.activate(FLAT_WIRE, false).expect("retry");
    assert_eq!(cache.active_variant(), Some(FLAT_WIRE));
}

#[test]
fn precompile_skips_broken_variants() {
    let mut factory = CountingFactory::default();
    factory.broken.insert(PipelineVariant::new(Shading::Smooth, Fill::Wire));
    let mut cache = PipelineCache::new(factory);
    assert_eq!(cache.precompile_all(), 3);
    assert!(cache.active().is_none());
    assert_eq!(cache.build_count(), 3);
}

#[test]
fn fallbacks_keep_shading_before_the_default() {
    let flat = PipelineVariant::new(Shading::Flat, Fill::Solid);
    assert_eq!(FLAT_WIRE.fallbacks(), vec![FLAT_WIRE, flat, SMOOTH]);
    assert_eq!(flat.fallbacks(), vec![flat, SMOOTH]);
    assert_eq!(SMOOTH.fallbacks(), vec![SMOOTH]);
}

#[test]
fn startup_without_line_mode_keeps_flat_shading() {
    let smooth_wire = PipelineVariant::new(Shading::Smooth, Fill::Wire);
    let mut factory = CountingFactory::default();
    factory.broken.extend([FLAT_WIRE, smooth_wire]);
    let mut cache = PipelineCache::new(factory);
    let bound = cache.activate_first(&FLAT_WIRE.fallbacks()).expect("fallback");
    assert_eq!(bound, PipelineVariant::new(Shading::Flat, Fill::Solid));
    assert_eq!(cache.active_variant(), Some(bound));
    assert_eq!(cache.factory().calls, vec![FLAT_WIRE, bound]);
}

#[test]
fn startup_fails_when_nothing_builds() {
    let mut factory = CountingFactory::default();
    factory.broken.extend(PipelineVariant::ALL);
    let mut cache = PipelineCache::new(factory);
    let err = cache.activate_first(&FLAT_WIRE.fallbacks()).unwrap_err();
    assert!(matches!(err, PipelineBuildError::Invalid { variant, .. } if variant == SMOOTH));
    assert_eq!(cache.active_variant(), None);
}
