//! Preview pipeline: load, compose, and publish only the latest request's frame

use crate::compositor::{compose, Frame, Placement};
use crate::error::Result;
use crate::loader::ImageLoader;
use crate::selection::PreviewTarget;
use crate::types::StatusMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct PreviewOutcome {
    pub token: u64,
    pub target: PreviewTarget,
    pub result: Result<Frame>,
}

/// Load both layers and compose them for a `surface_w` x `surface_h` surface.
pub async fn render(
    loader: &ImageLoader,
    target: &PreviewTarget,
    surface_w: u32,
    surface_h: u32,
) -> Result<Frame> {
    let material = async {
        match &target.material_url {
            Some(url) => loader.load(url).await.map(Some),
            None => Ok(None),
        }
    };
    let (design, material) =
        futures::future::try_join(loader.load(&target.design_url), material).await?;

    let frame = tokio::task::spawn_blocking(move || {
        compose(&design, material.as_ref(), surface_w, surface_h)
    })
    .await?;
    Ok(frame)
}

pub struct PreviewPipeline {
    loader: ImageLoader,
    surface: (u32, u32),
    latest: Arc<AtomicU64>,
    in_flight: Option<CancellationToken>,
    outcome: Arc<Mutex<Option<PreviewOutcome>>>,
}

impl PreviewPipeline {
    pub fn new(loader: ImageLoader, surface_w: u32, surface_h: u32) -> Self {
        Self {
            loader,
            surface: (surface_w, surface_h),
            latest: Arc::new(AtomicU64::new(0)),
            in_flight: None,
            outcome: Arc::new(Mutex::new(None)),
        }
    }

    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Start rendering `target`, superseding any earlier request.
    /// `notify` runs after a current (non-stale) outcome has been stored.
    pub fn request<F>(
        &mut self,
        runtime: &tokio::runtime::Handle,
        target: PreviewTarget,
        notify: F,
    ) -> u64
    where
        F: Fn() + Send + 'static,
    {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        if let Some(previous) = self.in_flight.replace(cancel.clone()) {
            previous.cancel();
        }

        info!(
            token,
            design = %target.design_url,
            material = ?target.material_url,
            "Preview requested"
        );

        let loader = self.loader.clone();
        let latest = self.latest.clone();
        let slot = self.outcome.clone();
        let (surface_w, surface_h) = self.surface;

        runtime.spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(token, "Preview request superseded before completion");
                    return;
                }
                result = render(&loader, &target, surface_w, surface_h) => result,
            };

            {
                let mut slot = slot.lock().unwrap_or_else(|e| e.into_inner());
                if latest.load(Ordering::SeqCst) != token {
                    debug!(token, "Discarding stale preview");
                    return;
                }
                *slot = Some(PreviewOutcome {
                    token,
                    target,
                    result,
                });
            }
            notify();
        });

        token
    }

    /// Hand over the stored outcome, if it still belongs to the latest request.
    pub fn take_outcome(&self) -> Option<PreviewOutcome> {
        let outcome = self
            .outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()?;
        if outcome.token == self.latest_token() {
            Some(outcome)
        } else {
            debug!(token = outcome.token, "Dropping outcome of superseded request");
            None
        }
    }
}

/// What the preview surface currently shows.
///
/// A successful outcome replaces the frame. A failed one only sets the status,
/// so the last good frame stays on screen.
#[derive(Default)]
pub struct PreviewDisplay {
    frame: Option<Frame>,
    status: Option<StatusMessage>,
    pending: bool,
}

impl PreviewDisplay {
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.frame.as_ref().map(|f| f.placement)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    /// Returns the new frame when the surface changed.
    pub fn apply(&mut self, outcome: PreviewOutcome) -> Option<&Frame> {
        self.pending = false;
        match outcome.result {
            Ok(frame) => {
                self.status = None;
                Some(&*self.frame.insert(frame))
            }
            Err(e) => {
                warn!(
                    token = outcome.token,
                    design = %outcome.target.design_url,
                    error = %e,
                    "Preview failed"
                );
                self.status = Some(StatusMessage::error(format!("Preview failed: {}", e)));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_http_client;
    use crate::compositor::fit_to_surface;
    use crate::error::Error;
    use crate::test_support::{png_bytes, serve, solid, Reply};
    use crate::types::StatusLevel;
    use std::time::Duration;

    fn pipeline() -> PreviewPipeline {
        PreviewPipeline::new(ImageLoader::new(build_http_client().unwrap()), 16, 16)
    }

    fn target(base: &str, design: &str, material: Option<&str>) -> PreviewTarget {
        PreviewTarget {
            design_url: format!("{}/{}", base, design),
            material_url: material.map(|m| format!("{}/{}", base, m)),
        }
    }

    fn image_server() -> String {
        let dark = png_bytes(&solid(16, 8, [0, 0, 0, 255]));
        let light = png_bytes(&solid(16, 8, [240, 240, 240, 255]));
        let material = png_bytes(&solid(4, 4, [200, 200, 200, 255]));
        serve(move |url| match url {
            "/dark.png" => Reply::ok(dark.clone()),
            "/slow-dark.png" => Reply::ok(dark.clone()).delayed(Duration::from_millis(400)),
            "/light.png" => Reply::ok(light.clone()),
            "/material.png" => Reply::ok(material.clone()),
            _ => Reply::status(404),
        })
    }

    async fn wait_for_outcome(p: &PreviewPipeline) -> PreviewOutcome {
        for _ in 0..200 {
            if let Some(outcome) = p.take_outcome() {
                return outcome;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no preview outcome");
    }

    #[tokio::test]
    async fn render_blends_material_into_dark_design() {
        let base = image_server();
        let loader = ImageLoader::new(build_http_client().unwrap());
        let frame = render(&loader, &target(&base, "dark.png", Some("material.png")), 16, 16)
            .await
            .unwrap();
        assert_eq!(frame.placement.origin(), (0, 4));
        assert_eq!(frame.image.get_pixel(5, 6).0, [100, 100, 100, 255]);
        assert_eq!(frame.image.get_pixel(5, 0).0, [0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn render_propagates_material_failure() {
        let base = image_server();
        let loader = ImageLoader::new(build_http_client().unwrap());
        let err = render(&loader, &target(&base, "dark.png", Some("gone.png")), 16, 16)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::HttpStatus { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn latest_request_wins_over_slower_earlier_one() {
        let base = image_server();
        let mut p = pipeline();
        let runtime = tokio::runtime::Handle::current();

        let first = p.request(&runtime, target(&base, "slow-dark.png", None), || {});
        let second = p.request(&runtime, target(&base, "light.png", None), || {});
        assert!(second > first);

        let outcome = wait_for_outcome(&p).await;
        assert_eq!(outcome.token, second);
        assert_eq!(outcome.target.design_url, format!("{}/light.png", base));
        let frame = outcome.result.unwrap();
        assert_eq!(frame.image.get_pixel(8, 8).0, [240, 240, 240, 255]);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(p.take_outcome().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failures_are_delivered_as_outcomes() {
        let base = image_server();
        let mut p = pipeline();
        let runtime = tokio::runtime::Handle::current();
        let token = p.request(&runtime, target(&base, "missing.png", None), || {});
        let outcome = wait_for_outcome(&p).await;
        assert_eq!(outcome.token, token);
        assert!(outcome.result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn notify_fires_once_for_current_request() {
        let base = image_server();
        let mut p = pipeline();
        let runtime = tokio::runtime::Handle::current();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        p.request(&runtime, target(&base, "dark.png", None), move || {
            let _ = tx.send(());
        });
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(p.take_outcome().is_some());
        assert!(rx.try_recv().is_err());
    }

    fn outcome(token: u64, result: Result<Frame>) -> PreviewOutcome {
        PreviewOutcome {
            token,
            target: PreviewTarget {
                design_url: "https://raw.example/d1.png".into(),
                material_url: None,
            },
            result,
        }
    }

    #[test]
    fn failed_render_keeps_the_last_good_frame() {
        let mut display = PreviewDisplay::default();
        display.mark_pending();
        let frame = compose(&solid(16, 8, [30, 60, 90, 255]), None, 16, 16);
        assert!(display.apply(outcome(1, Ok(frame))).is_some());
        assert!(!display.is_pending());
        assert!(display.status().is_none());

        display.mark_pending();
        let failure = Err(Error::HttpStatus {
            url: "https://raw.example/gone.png".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        });
        assert!(display.apply(outcome(2, failure)).is_none());

        assert!(!display.is_pending());
        assert_eq!(display.placement(), Some(fit_to_surface(16, 8, 16, 16)));
        let shown = display.frame().unwrap();
        assert_eq!(shown.image.get_pixel(3, 6).0, [30, 60, 90, 255]);
        assert_eq!(shown.image.get_pixel(3, 0).0, [0, 0, 0, 0]);
        let status = display.status().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.text.contains("gone.png"), "{}", status.text);
    }

    #[test]
    fn next_success_replaces_frame_and_clears_error() {
        let mut display = PreviewDisplay::default();
        let failure = Err(Error::Decode {
            url: "https://raw.example/d1.png".into(),
            reason: "bad header".into(),
        });
        assert!(display.apply(outcome(1, failure)).is_none());
        assert!(display.frame().is_none());
        assert!(display.status().is_some());

        let frame = compose(&solid(8, 16, [1, 2, 3, 255]), None, 16, 16);
        let shown = display.apply(outcome(2, Ok(frame))).unwrap();
        assert_eq!(shown.placement.origin(), (4, 0));
        assert!(display.status().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn pipeline_failure_leaves_displayed_frame_in_place() {
        let base = image_server();
        let mut p = pipeline();
        let runtime = tokio::runtime::Handle::current();
        let mut display = PreviewDisplay::default();

        p.request(&runtime, target(&base, "light.png", None), || {});
        assert!(display.apply(wait_for_outcome(&p).await).is_some());

        p.request(&runtime, target(&base, "light.png", Some("gone.png")), || {});
        assert!(display.apply(wait_for_outcome(&p).await).is_none());

        let shown = display.frame().unwrap();
        assert_eq!(shown.image.get_pixel(8, 8).0, [240, 240, 240, 255]);
        assert_eq!(display.placement().unwrap().origin(), (0, 4));
        assert_eq!(display.status().unwrap().level, StatusLevel::Error);
    }
}
