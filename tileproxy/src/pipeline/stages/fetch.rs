//! Fetch stage - downloads the planned source cells.
//!
//! Every cell in the coverage plan is requested concurrently on a `JoinSet`.
//! The first failure aborts the remaining requests: a tile is produced from
//! all of its cells or not at all.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, instrument};

use crate::coverage::{CoveragePlan, Quadrant};
use crate::pipeline::TileError;
use crate::provider::{ProviderError, RasterSource};

/// Raw encoded images keyed by quadrant.
pub type FetchedCells = BTreeMap<Quadrant, Vec<u8>>;

/// Fetches every cell in `plan` from `source`.
///
/// # Arguments
///
/// * `source` - Upstream raster source
/// * `layer` - Upstream layer name
/// * `plan` - Cells to fetch
/// * `cell_size` - Requested image edge in pixels
/// * `timeout` - Bound on each individual request
///
/// # Errors
///
/// [`TileError::UpstreamFetch`] naming the first quadrant that failed.
#[instrument(skip(source, plan), fields(cells = plan.cell_count()))]
pub async fn fetch_stage<S>(
    source: Arc<S>,
    layer: &str,
    plan: &CoveragePlan,
    cell_size: u32,
    timeout: Duration,
) -> Result<FetchedCells, TileError>
where
    S: RasterSource,
{
    let start = Instant::now();
    let mut fetches = JoinSet::new();

    for (quadrant, cell) in plan.iter() {
        let source = Arc::clone(&source);
        let layer = layer.to_string();
        let cell = *cell;

        fetches.spawn(async move {
            let result = match tokio::time::timeout(
                timeout,
                source.fetch_cell(&layer, &cell, cell_size),
            )
            .await
            {
                Ok(Ok(data)) => validate_payload(data),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(ProviderError::Timeout(timeout)),
            };
            (quadrant, result)
        });
    }

    let mut images = FetchedCells::new();
    while let Some(joined) = fetches.join_next().await {
        let (quadrant, result) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                fetches.abort_all();
                return Err(TileError::Internal(format!("fetch task failed: {}", e)));
            }
        };

        match result {
            Ok(data) => {
                images.insert(quadrant, data);
            }
            Err(e) => {
                fetches.abort_all();
                return Err(TileError::UpstreamFetch {
                    quadrant,
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        cells = images.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Fetch stage complete"
    );

    Ok(images)
}

/// Rejects bodies that are not a recognizable image format, such as the XML
/// service exceptions a WMS returns with a 200 status.
fn validate_payload(data: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
    if data.is_empty() {
        return Err(ProviderError::InvalidResponse("empty body".to_string()));
    }
    match image::guess_format(&data) {
        Ok(_) => Ok(data),
        Err(e) => Err(ProviderError::InvalidResponse(format!(
            "unrecognized image format: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::BoundingBox;
    use crate::coverage::plan;
    use crate::grid::{GridCell, GridSpec, ResolutionLadder};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// Source that answers per column, failing or stalling on request.
    struct ScriptedSource {
        fail_col: Option<i64>,
        stall_col: Option<i64>,
        calls: AtomicUsize,
        layers: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new() -> Self {
            Self {
                fail_col: None,
                stall_col: None,
                calls: AtomicUsize::new(0),
                layers: Mutex::new(Vec::new()),
            }
        }
    }

    impl RasterSource for ScriptedSource {
        async fn fetch_cell(
            &self,
            layer: &str,
            cell: &GridCell,
            _size: u32,
        ) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.layers.lock().unwrap().push(layer.to_string());
            if Some(cell.col) == self.stall_col {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            if Some(cell.col) == self.fail_col {
                return Err(ProviderError::HttpError("HTTP 500".to_string()));
            }
            Ok(PNG_MAGIC.to_vec())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn small_grid() -> GridSpec {
        GridSpec::new(
            BoundingBox::new(0.0, 0.0, 1000.0, 1000.0),
            ResolutionLadder::new(vec![1.0]).unwrap(),
            100,
        )
        .unwrap()
    }

    fn two_cell_plan() -> CoveragePlan {
        plan(&BoundingBox::new(180.0, 810.0, 220.0, 850.0), 1.0, &small_grid()).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_every_planned_cell() {
        let source = Arc::new(ScriptedSource::new());
        let plan = two_cell_plan();

        let images = fetch_stage(source.clone(), "aerial", &plan, 100, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(
            images.keys().copied().collect::<Vec<_>>(),
            vec![Quadrant::Nw, Quadrant::Ne]
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(source.layers.lock().unwrap().iter().all(|l| l == "aerial"));
    }

    #[tokio::test]
    async fn test_one_failure_fails_whole_stage() {
        let mut source = ScriptedSource::new();
        source.fail_col = Some(2);
        let plan = two_cell_plan();

        let result =
            fetch_stage(Arc::new(source), "aerial", &plan, 100, Duration::from_secs(5)).await;

        match result {
            Err(TileError::UpstreamFetch { quadrant, message }) => {
                assert_eq!(quadrant, Quadrant::Ne);
                assert!(message.contains("HTTP 500"));
            }
            other => panic!("expected UpstreamFetch, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_cell_times_out() {
        let mut source = ScriptedSource::new();
        source.stall_col = Some(1);
        let plan = two_cell_plan();

        let result =
            fetch_stage(Arc::new(source), "aerial", &plan, 100, Duration::from_secs(2)).await;

        match result {
            Err(TileError::UpstreamFetch { quadrant, message }) => {
                assert_eq!(quadrant, Quadrant::Nw);
                assert!(message.contains("timed out after 2000ms"));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_payload_rejects_service_exception() {
        let xml = b"<?xml version=\"1.0\"?><ServiceExceptionReport/>".to_vec();
        assert!(matches!(
            validate_payload(xml),
            Err(ProviderError::InvalidResponse(_))
        ));
        assert!(validate_payload(Vec::new()).is_err());
        assert!(validate_payload(PNG_MAGIC.to_vec()).is_ok());
    }
}
