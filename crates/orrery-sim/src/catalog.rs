//! External small-body catalog: provider trait, RON-backed provider,
//! background loader and placement into the registry.
//!
//! Every fetch job runs on its own named thread and delivers exactly one
//! [`CatalogBatch`] over a channel. Failures are logged and delivered as
//! empty batches, so the simulation never waits on or fails because of
//! catalog data.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use orrery_config::CatalogConfig;
use orrery_orbit::{
    EARTH_RATE_PER_TICK, OrbitalElements, ecliptic_to_scene, mean_motion_per_tick, orbit_path,
};
use orrery_population::ValueRange;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::{BodyId, BodyKind, BodyMetadata, CelestialBody, Motion, OrbitStyle};
use crate::registry::Registry;
use crate::visibility::VisibilityGroup;

/// Samples in the orbit line drawn for famous asteroids.
pub const ORBIT_PATH_SAMPLES: usize = 100;

const PLACEMENT_SALT: u64 = 0xCA7A_1065;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("catalog provider unavailable: {0}")]
    Unavailable(String),
}

/// Independent fetch jobs, one batch each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogGroup {
    Famous,
    Neo,
    Sentry,
    Comet,
}

impl CatalogGroup {
    pub const ALL: [CatalogGroup; 4] = [
        CatalogGroup::Famous,
        CatalogGroup::Neo,
        CatalogGroup::Sentry,
        CatalogGroup::Comet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CatalogGroup::Famous => "famous asteroids",
            CatalogGroup::Neo => "near-Earth objects",
            CatalogGroup::Sentry => "sentry objects",
            CatalogGroup::Comet => "comets",
        }
    }

    pub fn body_kind(self) -> BodyKind {
        match self {
            CatalogGroup::Famous => BodyKind::Asteroid,
            CatalogGroup::Neo => BodyKind::Neo,
            CatalogGroup::Sentry => BodyKind::Sentry,
            CatalogGroup::Comet => BodyKind::Comet,
        }
    }

    pub fn visibility_group(self) -> VisibilityGroup {
        match self {
            CatalogGroup::Comet => VisibilityGroup::Comets,
            _ => VisibilityGroup::FetchedAsteroids,
        }
    }

    fn color(self) -> [f32; 3] {
        match self {
            CatalogGroup::Famous => [0.0, 1.0, 0.0],
            CatalogGroup::Neo => [1.0, 0.33, 0.33],
            CatalogGroup::Sentry => [1.0, 0.67, 0.0],
            CatalogGroup::Comet => [0.33, 0.67, 1.0],
        }
    }

    fn size(self, draw: f64) -> f64 {
        match self {
            CatalogGroup::Famous => 0.2 + draw * 0.1,
            CatalogGroup::Neo => 0.15 + draw * 0.1,
            CatalogGroup::Sentry => 0.18 + draw * 0.1,
            CatalogGroup::Comet => 0.25,
        }
    }

    /// Radius band and vertical spread for records placed without elements.
    fn fallback_band(self) -> (ValueRange, f64) {
        match self {
            CatalogGroup::Comet => (ValueRange::new(30.0, 70.0), 10.0),
            _ => (ValueRange::new(13.0, 24.0), 0.0),
        }
    }
}

/// One catalog entry. Records without elements are still placed, on a
/// synthetic circular orbit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub designation: String,
    #[serde(default)]
    pub elements: Option<OrbitalElements>,
}

/// Source of small-body data.
pub trait CatalogProvider: Send + Sync {
    /// Elements for one designation. `Ok(None)` means not found.
    fn small_body(&self, designation: &str) -> Result<Option<OrbitalElements>, CatalogError>;
    fn near_earth_objects(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
    fn sentry_objects(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
    fn comets(&self) -> Result<Vec<CatalogRecord>, CatalogError>;
}

/// Offline catalog stored as RON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub small_bodies: Vec<CatalogRecord>,
    pub near_earth_objects: Vec<CatalogRecord>,
    pub sentry_objects: Vec<CatalogRecord>,
    pub comets: Vec<CatalogRecord>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&contents)?;
        log::info!(
            "Loaded catalog from {} ({} small bodies)",
            path.display(),
            file.small_bodies.len()
        );
        Ok(file)
    }

    pub fn parse(contents: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(contents)?)
    }
}

impl CatalogProvider for CatalogFile {
    fn small_body(&self, designation: &str) -> Result<Option<OrbitalElements>, CatalogError> {
        Ok(self
            .small_bodies
            .iter()
            .find(|record| record.designation.eq_ignore_ascii_case(designation))
            .and_then(|record| record.elements))
    }

    fn near_earth_objects(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.near_earth_objects.clone())
    }

    fn sentry_objects(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.sentry_objects.clone())
    }

    fn comets(&self) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.comets.clone())
    }
}

/// Records delivered by one fetch job.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogBatch {
    pub group: CatalogGroup,
    pub records: Vec<CatalogRecord>,
}

/// Runs the fetch jobs in the background and hands batches to the tick
/// loop without blocking it.
pub struct CatalogLoader {
    receiver: Receiver<CatalogBatch>,
    pending: usize,
}

impl CatalogLoader {
    pub fn spawn(provider: Arc<dyn CatalogProvider>, config: &CatalogConfig) -> Self {
        let (sender, receiver) = unbounded();
        let mut pending = 0;

        for group in CatalogGroup::ALL {
            let provider = Arc::clone(&provider);
            let sender: Sender<CatalogBatch> = sender.clone();
            let config = config.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("catalog-{group:?}").to_lowercase())
                .spawn(move || {
                    let records = match run_job(provider.as_ref(), group, &config) {
                        Ok(records) => records,
                        Err(err) => {
                            log::warn!("Failed to fetch {}: {err}", group.label());
                            Vec::new()
                        }
                    };
                    let _ = sender.send(CatalogBatch { group, records });
                });
            match spawned {
                Ok(_) => pending += 1,
                Err(err) => log::warn!("Failed to start {} fetch: {err}", group.label()),
            }
        }

        Self { receiver, pending }
    }

    /// Batches that have arrived since the last poll.
    pub fn poll(&mut self) -> Vec<CatalogBatch> {
        let mut batches = Vec::new();
        while let Ok(batch) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            batches.push(batch);
        }
        batches
    }

    /// Block up to `timeout` for the next batch.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<CatalogBatch> {
        let batch = self.receiver.recv_timeout(timeout).ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(batch)
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.pending == 0
    }
}

fn run_job(
    provider: &dyn CatalogProvider,
    group: CatalogGroup,
    config: &CatalogConfig,
) -> Result<Vec<CatalogRecord>, CatalogError> {
    let mut records = match group {
        CatalogGroup::Famous => return Ok(fetch_famous(provider, config)),
        CatalogGroup::Neo => provider.near_earth_objects()?,
        CatalogGroup::Sentry => provider.sentry_objects()?,
        CatalogGroup::Comet => provider.comets()?,
    };
    let limit = match group {
        CatalogGroup::Neo => config.neo_limit,
        CatalogGroup::Sentry => config.sentry_limit,
        _ => config.comet_limit,
    };
    records.truncate(limit);
    Ok(records)
}

fn fetch_famous(provider: &dyn CatalogProvider, config: &CatalogConfig) -> Vec<CatalogRecord> {
    let spacing = Duration::from_millis(config.request_spacing_ms);
    let mut records = Vec::new();
    for (index, designation) in config.famous.iter().enumerate() {
        if index > 0 && !spacing.is_zero() {
            std::thread::sleep(spacing);
        }
        match provider.small_body(designation) {
            Ok(Some(elements)) => records.push(CatalogRecord {
                designation: designation.clone(),
                elements: Some(elements),
            }),
            Ok(None) => log::debug!("No elements for {designation}; skipping"),
            Err(err) => log::warn!("Failed to fetch {designation}: {err}"),
        }
    }
    records
}

/// RNG for sizes and fallback orbits of catalog bodies.
pub fn placement_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ PLACEMENT_SALT)
}

/// Append a batch to the registry. Returns the ids of the new bodies.
pub fn integrate_batch(
    registry: &mut Registry,
    batch: &CatalogBatch,
    config: &CatalogConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<BodyId> {
    let group = batch.group;
    let ids: Vec<BodyId> = batch
        .records
        .iter()
        .map(|record| {
            let body = place_record(record, group, config.au_to_scene, rng);
            registry.insert_body_in_group(body, Some(group.visibility_group()))
        })
        .collect();
    log::info!("Placed {} {}", ids.len(), group.label());
    ids
}

fn place_record(
    record: &CatalogRecord,
    group: CatalogGroup,
    au_to_scene: f64,
    rng: &mut ChaCha8Rng,
) -> CelestialBody {
    let kind = group.body_kind();
    let size = group.size(rng.random());

    let mut body = match record.elements {
        Some(elements) => {
            let rate = mean_motion_per_tick(elements.semi_major_axis, EARTH_RATE_PER_TICK);
            let mut body =
                CelestialBody::kepler(&record.designation, kind, size, elements, au_to_scene, rate);
            if group == CatalogGroup::Famous {
                body.orbit_path = orbit_path(&elements, ORBIT_PATH_SAMPLES)
                    .into_iter()
                    .map(|point| ecliptic_to_scene(point) * au_to_scene)
                    .collect();
                body.orbit_style = Some(OrbitStyle::for_path());
            }
            body
        }
        None => {
            let (band, vertical_spread) = group.fallback_band();
            let distance = band.lerp(rng.random());
            let angle = rng.random::<f64>() * std::f64::consts::TAU;
            let vertical_offset = (rng.random::<f64>() - 0.5) * vertical_spread;
            let rate = mean_motion_per_tick(distance / au_to_scene, EARTH_RATE_PER_TICK);
            let mut body = CelestialBody::circular(&record.designation, kind, size, distance, rate, angle);
            body.motion = Motion::Circular {
                distance,
                vertical_offset,
            };
            body
        }
    };

    body.metadata = BodyMetadata {
        color: group.color(),
        description: format!("Fetched from the {} catalog", group.label()),
        ..BodyMetadata::default()
    };
    body
}
