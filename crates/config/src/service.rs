//! The configuration service: manifest lifecycle and selection state

use retrofit_catalog::Catalog;
use retrofit_events::{AppEvent, ConfigEvent, EventEmitter, EventSender, UiEvent};
use retrofit_manifest::SupportManifest;
use retrofit_net::{fetch_plist, NetClient};
use retrofit_types::{AppKind, ItunesFlavor, Selection};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use url::Url;

#[derive(Debug, Default)]
pub(crate) struct ServiceState {
    pub(crate) manifest: SupportManifest,
    pub(crate) selection: Selection,
    pub(crate) location_of_chosen_app: Option<PathBuf>,
    fixer_update_available: bool,
    /// Highest refresh ticket whose manifest has been installed
    installed_ticket: u64,
    /// Last ticket handed out
    next_ticket: u64,
}

/// Support-configuration service
///
/// Cheap to clone; clones share the same state. Accessors are sync reads
/// and can run from any thread; the async operations complete on the
/// runtime and post UI-relevant side effects to the event channel.
#[derive(Clone)]
pub struct ConfigService {
    state: Arc<RwLock<ServiceState>>,
    net: NetClient,
    tx: Option<EventSender>,
    running_build: Option<i64>,
}

impl EventEmitter for ConfigService {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl ConfigService {
    /// Create a new service
    ///
    /// `running_build` is the running application's integer build number;
    /// `None` disables update detection.
    #[must_use]
    pub fn new(net: NetClient, tx: Option<EventSender>, running_build: Option<i64>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ServiceState::default())),
            net,
            tx,
            running_build,
        }
    }

    pub(crate) fn state(&self) -> RwLockReadGuard<'_, ServiceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state_mut(&self) -> RwLockWriteGuard<'_, ServiceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the manifest bundled with the application
    ///
    /// Fails silently: on a missing or malformed file the manifest stays
    /// at its empty default, which is fine because a remote refresh is
    /// attempted right after startup anyway.
    pub async fn load_bundled(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let ticket = self.take_ticket();
        match SupportManifest::from_file(path).await {
            Ok(manifest) => {
                self.install_manifest(manifest, ticket);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to load bundled manifest");
            }
        }
    }

    /// Refresh the manifest from the support server
    ///
    /// Reads `SupportPathURL` from the current manifest; if absent or not
    /// a valid URL this is a no-op. On success the manifest is replaced
    /// wholesale and the `iTunes` download URL is re-resolved. On failure
    /// the previous manifest is retained and the error is only logged.
    pub async fn refresh(&self) {
        let Some(url) = self.support_path() else {
            return;
        };
        if Url::parse(&url).is_err() {
            tracing::warn!(%url, "support path is not a valid URL");
            return;
        }

        let ticket = self.take_ticket();
        self.emit(AppEvent::Config(ConfigEvent::RefreshStarted {
            url: url.clone(),
        }));

        match fetch_plist::<SupportManifest>(&self.net, &url).await {
            Ok(manifest) => {
                if self.install_manifest(manifest, ticket) {
                    tracing::info!(%url, ticket, "installed refreshed manifest");
                    self.emit(AppEvent::Config(ConfigEvent::RefreshCompleted {
                        url,
                        ticket,
                    }));
                    self.resolve_itunes_download_url().await;
                } else {
                    tracing::debug!(%url, ticket, "dropping superseded refresh");
                    self.emit(AppEvent::Config(ConfigEvent::RefreshSuperseded {
                        url,
                        ticket,
                    }));
                }
            }
            Err(error) => {
                tracing::warn!(%url, %error, "manifest refresh failed; keeping previous manifest");
                self.emit(AppEvent::Config(ConfigEvent::RefreshFailed {
                    url,
                    error: error.to_string(),
                }));
            }
        }
    }

    /// Resolve the `iTunes` 12.9 download URL from the software catalog
    ///
    /// Requires the catalog URL (present and valid), the download
    /// identifier, and the expected-name fragment; if any is missing this
    /// is a no-op. The first package in `Products[identifier].Packages`
    /// whose URL contains the fragment wins and is patched into the
    /// manifest in place. No match, and any fetch or parse failure,
    /// leaves the manifest unchanged.
    pub async fn resolve_itunes_download_url(&self) {
        let (catalog_url, identifier, expected_name) = {
            let state = self.state();
            (
                state.manifest.itunes129_catalog_url.clone(),
                state.manifest.itunes129_download_identifier.clone(),
                state.manifest.itunes129_expected_name.clone(),
            )
        };
        let (Some(catalog_url), Some(identifier), Some(expected_name)) =
            (catalog_url, identifier, expected_name)
        else {
            return;
        };
        if Url::parse(&catalog_url).is_err() {
            return;
        }

        match fetch_plist::<Catalog>(&self.net, &catalog_url).await {
            Ok(catalog) => {
                if let Some(package_url) = catalog.find_package_url(&identifier, &expected_name) {
                    let package_url = package_url.to_string();
                    self.state_mut().manifest.itunes129_url = Some(package_url.clone());
                    tracing::info!(url = %package_url, "found updated iTunes package");
                    self.emit(AppEvent::Config(ConfigEvent::PackageResolved {
                        url: package_url,
                    }));
                } else {
                    tracing::debug!(product = %identifier, "no catalog package matched the expected name");
                }
            }
            Err(error) => {
                tracing::warn!(%catalog_url, %error, "catalog fetch failed");
            }
        }
    }

    /// True when the manifest advertises a build newer than the running one
    #[must_use]
    pub fn has_newer_version(&self) -> bool {
        let latest = self.state().manifest.latest_build_number;
        matches!(
            (self.running_build, latest),
            (Some(running), Some(latest)) if running < latest
        )
    }

    /// Running application build number this service was constructed with
    #[must_use]
    pub fn running_build(&self) -> Option<i64> {
        self.running_build
    }

    /// Replace the whole manifest, unless a later refresh already did.
    ///
    /// Returns whether the manifest was installed. Re-evaluates the
    /// update badge on every installation.
    fn install_manifest(&self, manifest: SupportManifest, ticket: u64) -> bool {
        {
            let mut state = self.state_mut();
            if ticket <= state.installed_ticket {
                return false;
            }
            state.manifest = manifest;
            state.installed_ticket = ticket;
        }
        if self.has_newer_version() {
            tracing::info!("update available");
            self.emit(AppEvent::Ui(UiEvent::UpdateBadgeVisible { visible: true }));
        }
        true
    }

    fn take_ticket(&self) -> u64 {
        let mut state = self.state_mut();
        state.next_ticket += 1;
        state.next_ticket
    }

    /// Snapshot of the current manifest
    #[must_use]
    pub fn manifest(&self) -> SupportManifest {
        self.state().manifest.clone()
    }

    // --- selection state ---

    /// Current selection
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state().selection
    }

    /// The chosen app, if any
    #[must_use]
    pub fn chosen_app(&self) -> Option<AppKind> {
        self.state().selection.app
    }

    /// The chosen `iTunes` flavor; only meaningful while `iTunes` is chosen
    #[must_use]
    pub fn itunes_flavor(&self) -> Option<ItunesFlavor> {
        self.state().selection.itunes_flavor
    }

    /// Change the chosen app
    ///
    /// Always resets the app location, whatever its previous value, and
    /// notifies the UI of the new selection.
    pub fn set_chosen_app(&self, app: Option<AppKind>) {
        let selection = {
            let mut state = self.state_mut();
            state.selection.app = app;
            state.location_of_chosen_app = None;
            state.selection
        };
        self.emit(AppEvent::Ui(UiEvent::SelectionChanged {
            selection,
            display_name: selection.display_name().to_string(),
        }));
    }

    /// Change the chosen `iTunes` flavor
    pub fn set_itunes_flavor(&self, flavor: Option<ItunesFlavor>) {
        self.state_mut().selection.itunes_flavor = flavor;
    }

    /// Where the chosen app was found on disk, once the UI has located it
    #[must_use]
    pub fn location_of_chosen_app(&self) -> Option<PathBuf> {
        self.state().location_of_chosen_app.clone()
    }

    pub fn set_location_of_chosen_app(&self, location: Option<PathBuf>) {
        self.state_mut().location_of_chosen_app = location;
    }

    /// Whether a newer fixer release is available
    #[must_use]
    pub fn fixer_update_available(&self) -> bool {
        self.state().fixer_update_available
    }

    pub fn set_fixer_update_available(&self, available: bool) {
        self.state_mut().fixer_update_available = available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(running_build: Option<i64>) -> ConfigService {
        ConfigService::new(NetClient::with_defaults().unwrap(), None, running_build)
    }

    fn install(svc: &ConfigService, manifest: SupportManifest) {
        let ticket = svc.take_ticket();
        assert!(svc.install_manifest(manifest, ticket));
    }

    #[test]
    fn test_has_newer_version_table() {
        let svc = service(Some(100));
        assert!(!svc.has_newer_version());

        install(
            &svc,
            SupportManifest {
                latest_build_number: Some(101),
                ..SupportManifest::default()
            },
        );
        assert!(svc.has_newer_version());

        install(
            &svc,
            SupportManifest {
                latest_build_number: Some(100),
                ..SupportManifest::default()
            },
        );
        assert!(!svc.has_newer_version());

        install(
            &svc,
            SupportManifest {
                latest_build_number: Some(99),
                ..SupportManifest::default()
            },
        );
        assert!(!svc.has_newer_version());

        install(&svc, SupportManifest::default());
        assert!(!svc.has_newer_version());

        let unknown_build = service(None);
        install(
            &unknown_build,
            SupportManifest {
                latest_build_number: Some(101),
                ..SupportManifest::default()
            },
        );
        assert!(!unknown_build.has_newer_version());
    }

    #[test]
    fn test_changing_app_resets_location() {
        let svc = service(None);
        svc.set_chosen_app(Some(AppKind::Aperture));
        svc.set_location_of_chosen_app(Some(PathBuf::from("/Applications/Aperture.app")));
        assert!(svc.location_of_chosen_app().is_some());

        svc.set_chosen_app(Some(AppKind::Iphoto));
        assert_eq!(svc.location_of_chosen_app(), None);

        // Re-selecting the same app resets too
        svc.set_location_of_chosen_app(Some(PathBuf::from("/Applications/iPhoto.app")));
        svc.set_chosen_app(Some(AppKind::Iphoto));
        assert_eq!(svc.location_of_chosen_app(), None);
    }

    #[test]
    fn test_stale_install_is_dropped() {
        let svc = service(None);
        let first = svc.take_ticket();
        let second = svc.take_ticket();

        assert!(svc.install_manifest(
            SupportManifest {
                wiki_page: Some("second".into()),
                ..SupportManifest::default()
            },
            second,
        ));
        // The earlier refresh completes late; its manifest must not win.
        assert!(!svc.install_manifest(
            SupportManifest {
                wiki_page: Some("first".into()),
                ..SupportManifest::default()
            },
            first,
        ));
        assert_eq!(svc.manifest().wiki_page.as_deref(), Some("second"));
    }

    #[test]
    fn test_fixer_flag() {
        let svc = service(None);
        assert!(!svc.fixer_update_available());
        svc.set_fixer_update_available(true);
        assert!(svc.fixer_update_available());
    }
}
