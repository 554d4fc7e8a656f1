//! ConfiguratorSession - loads a vehicle and drives a `Configurator` for it.

use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::domain::configurator::{
    Configuration, Configurator, ConfiguratorError, MultiSelectField, PriceBreakdown,
    SingleSelectField,
};
use crate::domain::foundation::{Price, StateMachine, VehicleSlug};
use crate::domain::realtime::Notice;
use crate::ports::{NoticeSink, ShareOutcome, ShareSink, VehicleReader};

/// What the configurator page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionView {
    #[default]
    Loading,
    Ready,
    NotFound,
}

impl StateMachine for SessionView {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionView::*;
        matches!(
            (self, target),
            (Loading, Ready) | (Loading, NotFound) | (Ready, Loading) | (NotFound, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionView::*;
        match self {
            Loading => vec![Ready, NotFound],
            Ready | NotFound => vec![Loading],
        }
    }
}

pub struct ConfiguratorSession {
    vehicles: Arc<dyn VehicleReader>,
    notices: Arc<dyn NoticeSink>,
    share_sink: Arc<dyn ShareSink>,
    storefront_url: Url,
    configurator: Configurator,
    view: SessionView,
}

impl ConfiguratorSession {
    pub fn new(
        vehicles: Arc<dyn VehicleReader>,
        notices: Arc<dyn NoticeSink>,
        share_sink: Arc<dyn ShareSink>,
        storefront_url: Url,
    ) -> Self {
        Self {
            vehicles,
            notices,
            share_sink,
            storefront_url,
            configurator: Configurator::standard(),
            view: SessionView::Loading,
        }
    }

    /// Uses custom option catalogs instead of the storefront's standard set.
    pub fn with_configurator(mut self, configurator: Configurator) -> Self {
        self.configurator = configurator;
        self
    }

    /// Fetches the base vehicle and initializes the configurator.
    ///
    /// Any previous configuration is dropped first, so nothing can be
    /// mutated while the fetch is outstanding or after it fails.
    /// A fetch failure shows "Failed to load vehicle"; a lookup that finds
    /// nothing moves to `NotFound` without a notice.
    pub async fn load(&mut self, slug: &VehicleSlug) -> SessionView {
        self.configurator.reset();
        if self.view != SessionView::Loading {
            self.set_view(SessionView::Loading);
        }

        match self.vehicles.get_by_slug(slug).await {
            Ok(Some(vehicle)) => {
                self.configurator.initialize(vehicle);
                self.set_view(SessionView::Ready);
            }
            Ok(None) => {
                tracing::debug!(slug = %slug, "Vehicle not found");
                self.set_view(SessionView::NotFound);
            }
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Failed to load vehicle");
                self.notices.show(Notice::new("Failed to load vehicle").destructive());
                self.set_view(SessionView::NotFound);
            }
        }
        self.view
    }

    fn set_view(&mut self, target: SessionView) {
        match self.view.transition_to(target) {
            Ok(next) => self.view = next,
            Err(e) => tracing::warn!(error = %e, "Invalid configurator view transition"),
        }
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn configurator(&self) -> &Configurator {
        &self.configurator
    }

    pub fn configuration(&self) -> Result<&Configuration, ConfiguratorError> {
        self.configurator.configuration()
    }

    pub fn select_single(
        &mut self,
        field: SingleSelectField,
        name: &str,
    ) -> Result<Price, ConfiguratorError> {
        self.configurator.select_single(field, name)
    }

    pub fn toggle_multi(
        &mut self,
        field: MultiSelectField,
        name: &str,
    ) -> Result<Price, ConfiguratorError> {
        self.configurator.toggle_multi(field, name)
    }

    pub fn current_total(&self) -> Result<Price, ConfiguratorError> {
        self.configurator.current_total()
    }

    pub fn breakdown(&self) -> Result<PriceBreakdown, ConfiguratorError> {
        self.configurator.breakdown()
    }

    /// Hands the configuration to the share sink.
    ///
    /// Best-effort: a sink failure is logged and yields `Ok(None)`.
    pub async fn share(&self) -> Result<Option<ShareOutcome>, ConfiguratorError> {
        let summary = self.configurator.share(&self.storefront_url)?;
        match self.share_sink.share(&summary).await {
            Ok(outcome) => {
                if outcome == ShareOutcome::Copied {
                    self.notices.show(Notice::new("Link copied to clipboard"));
                }
                Ok(Some(outcome))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Share did not complete");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingNoticeSink, RecordingShareSink};
    use crate::domain::foundation::VehicleId;
    use crate::domain::vehicle::{BaseVehicle, Page, VehicleQuery, VehicleSummary};
    use crate::ports::{ApiError, ShareError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Answers lookups with canned results in order; the last one repeats.
    struct CannedReader(Mutex<VecDeque<Result<Option<BaseVehicle>, ApiError>>>);

    impl CannedReader {
        fn answering(results: Vec<Result<Option<BaseVehicle>, ApiError>>) -> Self {
            Self(Mutex::new(results.into()))
        }
    }

    #[async_trait]
    impl VehicleReader for CannedReader {
        async fn get_by_slug(&self, _: &VehicleSlug) -> Result<Option<BaseVehicle>, ApiError> {
            let mut results = self.0.lock().unwrap();
            if results.len() > 1 {
                results.pop_front().unwrap()
            } else {
                results.front().cloned().unwrap_or(Ok(None))
            }
        }

        async fn list(&self, _: &VehicleQuery) -> Result<Page<VehicleSummary>, ApiError> {
            Err(ApiError::Network("not scripted".to_string()))
        }

        async fn search(&self, _: &str, _: u32, _: u32) -> Result<Page<VehicleSummary>, ApiError> {
            Err(ApiError::Network("not scripted".to_string()))
        }

        async fn featured(&self, _: u32) -> Result<Vec<VehicleSummary>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn fortuner() -> BaseVehicle {
        BaseVehicle::new(
            VehicleId::new("veh_1").unwrap(),
            VehicleSlug::new("toyota-fortuner").unwrap(),
            "Toyota",
            "Fortuner",
            Price::new(1_000_000),
        )
        .unwrap()
    }

    fn session(
        reader: CannedReader,
        share: Result<ShareOutcome, ShareError>,
    ) -> (ConfiguratorSession, Arc<RecordingNoticeSink>, Arc<RecordingShareSink>) {
        let notices = Arc::new(RecordingNoticeSink::new());
        let sink = Arc::new(RecordingShareSink::new(share));
        let session = ConfiguratorSession::new(
            Arc::new(reader),
            notices.clone(),
            sink.clone(),
            Url::parse("http://localhost:3000").unwrap(),
        );
        (session, notices, sink)
    }

    fn slug() -> VehicleSlug {
        VehicleSlug::new("toyota-fortuner").unwrap()
    }

    #[tokio::test]
    async fn load_initializes_configurator() {
        let (mut session, notices, _) =
            session(CannedReader::answering(vec![Ok(Some(fortuner()))]), Ok(ShareOutcome::Shared));

        assert_eq!(session.view(), SessionView::Loading);
        assert_eq!(session.load(&slug()).await, SessionView::Ready);
        assert_eq!(session.current_total().unwrap(), Price::new(1_000_000));
        assert_eq!(notices.count(), 0);
    }

    #[tokio::test]
    async fn missing_vehicle_is_not_found_without_notice() {
        let (mut session, notices, _) = session(
            CannedReader::answering(vec![Ok(None)]),
            Ok(ShareOutcome::Shared),
        );

        assert_eq!(session.load(&slug()).await, SessionView::NotFound);
        assert_eq!(notices.count(), 0);
        assert_eq!(session.current_total(), Err(ConfiguratorError::Uninitialized));
    }

    #[tokio::test]
    async fn fetch_failure_shows_notice_and_not_found() {
        let (mut session, notices, _) = session(
            CannedReader::answering(vec![Err(ApiError::status(500, None))]),
            Ok(ShareOutcome::Shared),
        );

        assert_eq!(session.load(&slug()).await, SessionView::NotFound);
        assert_eq!(notices.titles(), vec!["Failed to load vehicle"]);
    }

    #[tokio::test]
    async fn copied_share_shows_clipboard_notice() {
        let (mut session, notices, sink) =
            session(CannedReader::answering(vec![Ok(Some(fortuner()))]), Ok(ShareOutcome::Copied));
        session.load(&slug()).await;

        assert_eq!(session.share().await.unwrap(), Some(ShareOutcome::Copied));
        assert_eq!(notices.titles(), vec!["Link copied to clipboard"]);
        assert_eq!(sink.shared()[0].title, "My Custom Toyota Fortuner");
    }

    #[tokio::test]
    async fn cancelled_share_is_silent() {
        let (mut session, notices, _) =
            session(CannedReader::answering(vec![Ok(Some(fortuner()))]), Err(ShareError::Cancelled));
        session.load(&slug()).await;

        assert_eq!(session.share().await.unwrap(), None);
        assert_eq!(notices.count(), 0);
    }

    #[tokio::test]
    async fn failed_reload_leaves_nothing_to_mutate() {
        let (mut session, _, _) = session(
            CannedReader::answering(vec![
                Ok(Some(fortuner())),
                Err(ApiError::status(500, None)),
            ]),
            Ok(ShareOutcome::Shared),
        );
        assert_eq!(session.load(&slug()).await, SessionView::Ready);

        assert_eq!(session.load(&slug()).await, SessionView::NotFound);
        assert_eq!(
            session.select_single(SingleSelectField::Color, "Ruby Red"),
            Err(ConfiguratorError::Uninitialized)
        );
        assert_eq!(session.current_total(), Err(ConfiguratorError::Uninitialized));
        assert_eq!(session.share().await, Err(ConfiguratorError::Uninitialized));
    }

    #[tokio::test]
    async fn successful_reload_starts_from_defaults() {
        let (mut session, _, _) = session(
            CannedReader::answering(vec![Ok(Some(fortuner()))]),
            Ok(ShareOutcome::Shared),
        );
        session.load(&slug()).await;
        session
            .toggle_multi(MultiSelectField::Packages, "Technology Package")
            .unwrap();

        assert_eq!(session.load(&slug()).await, SessionView::Ready);
        assert_eq!(session.current_total().unwrap(), Price::new(1_000_000));
    }

    #[tokio::test]
    async fn share_before_load_is_uninitialized() {
        let (session, _, _) = session(
            CannedReader::answering(vec![Ok(None)]),
            Ok(ShareOutcome::Shared),
        );
        assert_eq!(session.share().await, Err(ConfiguratorError::Uninitialized));
    }
}
