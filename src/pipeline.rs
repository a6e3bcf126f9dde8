//! Resolution, horizon filtering and brightness ranking
//!
//! The pipeline walks the catalog in order, asks the resolver for each entry,
//! keeps what resolved, then filters to bodies above the horizon, sorts them
//! brightest first and truncates to the requested size.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{ResolutionFailure, SkyError};
use crate::observer::ObserverContext;
use crate::resolver::{PositionResolver, RawPositionRecord};

/// Outcome of resolving every catalog entry for one observer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionReport {
    /// Successfully resolved records, in catalog order
    pub records: Vec<RawPositionRecord>,
    /// Entries that were skipped, with the reason
    pub failures: Vec<(String, ResolutionFailure)>,
}

impl ResolutionReport {
    pub fn resolved_count(&self) -> usize {
        self.records.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Ranked result of one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    /// Above-horizon records, brightest first, at most `max_objects` long
    pub objects: Vec<RawPositionRecord>,
    /// Number of catalog entries whose resolution failed
    pub unresolved: usize,
}

/// Keep above-horizon records with a usable magnitude, sort by magnitude
/// ascending (stable, so equal magnitudes keep catalog order) and keep the
/// first `max_objects`.
///
/// A record counts as above the horizon only when its flag and its altitude
/// agree.
pub fn rank_visible(records: Vec<RawPositionRecord>, max_objects: usize) -> Vec<RawPositionRecord> {
    let mut visible: Vec<RawPositionRecord> = records
        .into_iter()
        .filter(|record| {
            record.is_above_horizon && record.altitude_deg > 0.0 && record.magnitude.is_finite()
        })
        .collect();
    visible.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    visible.truncate(max_objects);
    visible
}

/// Sky query pipeline over an immutable catalog and a resolver
pub struct SkyPipeline<'a, R> {
    catalog: &'a Catalog,
    resolver: R,
}

impl<R: PositionResolver> SkyPipeline<'static, R> {
    /// Pipeline over the built-in catalog
    pub fn with_standard_catalog(resolver: R) -> Self {
        Self::new(Catalog::standard(), resolver)
    }
}

impl<'a, R: PositionResolver> SkyPipeline<'a, R> {
    pub fn new(catalog: &'a Catalog, resolver: R) -> Self {
        Self { catalog, resolver }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve every catalog entry, skipping entries that fail.
    ///
    /// A [`ResolutionFailure::Unavailable`] stops the walk: the resolver
    /// itself is down and the query fails with [`SkyError::Internal`].
    pub fn resolve_all(&self, observer: &ObserverContext) -> Result<ResolutionReport, SkyError> {
        let mut report = ResolutionReport {
            records: Vec::with_capacity(self.catalog.len()),
            failures: Vec::new(),
        };

        for entry in self.catalog {
            match self.resolver.resolve(entry, observer) {
                Ok(record) => report.records.push(record),
                Err(failure) if failure.is_isolated() => {
                    debug!(
                        entry = entry.name(),
                        resolver = self.resolver.name(),
                        %failure,
                        "skipping entry"
                    );
                    report.failures.push((entry.name().to_string(), failure));
                }
                Err(failure) => {
                    warn!(resolver = self.resolver.name(), %failure, "resolver unavailable");
                    return Err(failure.into());
                }
            }
        }

        if report.failure_count() > 0 {
            warn!(
                resolved = report.resolved_count(),
                failed = report.failure_count(),
                "some catalog entries could not be resolved"
            );
        }
        Ok(report)
    }

    /// Resolve, filter to the visible sky and rank by brightness.
    pub fn query(
        &self,
        observer: &ObserverContext,
        max_objects: usize,
    ) -> Result<RankedResult, SkyError> {
        let report = self.resolve_all(observer)?;
        let unresolved = report.failure_count();
        let objects = rank_visible(report.records, max_objects);
        debug!(
            latitude = observer.latitude,
            longitude = observer.longitude,
            instant = %observer.instant,
            returned = objects.len(),
            unresolved,
            "sky query ranked"
        );
        Ok(RankedResult {
            objects,
            unresolved,
        })
    }
}
