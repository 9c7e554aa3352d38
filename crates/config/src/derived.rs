//! Derived read-only accessors consumed by the UI layer
//!
//! Manifest-backed values read as absence when the key is missing;
//! selection-derived values are pure lookups recomputed on every access.

use crate::service::ConfigService;
use crate::{ACTION_DETAIL_TOKEN, MAIN_ACTION_TOKEN, NAME_TOKEN, TIME_TOKEN};
use retrofit_types::{AppKind, ImageAsset, ItunesFlavor};
use url::Url;

impl ConfigService {
    // --- manifest-backed accessors ---

    #[must_use]
    pub fn new_version_visible_title(&self) -> Option<String> {
        self.state().manifest.new_version_visible_title.clone()
    }

    #[must_use]
    pub fn new_version_changelog(&self) -> Option<String> {
        self.state().manifest.new_version_changelog.clone()
    }

    #[must_use]
    pub fn latest_zip(&self) -> Option<String> {
        self.state().manifest.latest_zip.clone()
    }

    #[must_use]
    pub fn latest_build_number(&self) -> Option<i64> {
        self.state().manifest.latest_build_number
    }

    #[must_use]
    pub fn support_path(&self) -> Option<String> {
        self.state().manifest.support_path_url.clone()
    }

    #[must_use]
    pub fn release_page(&self) -> Option<String> {
        self.state().manifest.release_page.clone()
    }

    #[must_use]
    pub fn source_page(&self) -> Option<String> {
        self.state().manifest.source_page.clone()
    }

    #[must_use]
    pub fn new_issue_page(&self) -> Option<String> {
        self.state().manifest.new_issue_page.clone()
    }

    #[must_use]
    pub fn issues_page(&self) -> Option<String> {
        self.state().manifest.issues_page.clone()
    }

    #[must_use]
    pub fn wiki_page(&self) -> Option<String> {
        self.state().manifest.wiki_page.clone()
    }

    #[must_use]
    pub fn itunes_catalog_url(&self) -> Option<String> {
        self.state().manifest.itunes129_catalog_url.clone()
    }

    #[must_use]
    pub fn itunes_download_identifier(&self) -> Option<String> {
        self.state().manifest.itunes129_download_identifier.clone()
    }

    #[must_use]
    pub fn itunes_expected_name(&self) -> Option<String> {
        self.state().manifest.itunes129_expected_name.clone()
    }

    #[must_use]
    pub fn aperture_dive(&self) -> Option<String> {
        self.state().manifest.aperture_dive.clone()
    }

    #[must_use]
    pub fn iphoto_dive(&self) -> Option<String> {
        self.state().manifest.iphoto_dive.clone()
    }

    #[must_use]
    pub fn itunes129_dive(&self) -> Option<String> {
        self.state().manifest.itunes129_dive.clone()
    }

    #[must_use]
    pub fn itunes126_dive(&self) -> Option<String> {
        self.state().manifest.itunes126_dive.clone()
    }

    #[must_use]
    pub fn itunes107_dive(&self) -> Option<String> {
        self.state().manifest.itunes107_dive.clone()
    }

    // --- selection-derived accessors ---

    #[must_use]
    pub fn name_of_chosen_app(&self) -> &'static str {
        self.selection().display_name()
    }

    #[must_use]
    pub fn binary_name_of_chosen_app(&self) -> &'static str {
        self.selection().binary_name()
    }

    #[must_use]
    pub fn existing_bundle_id_of_chosen_app(&self) -> Option<&'static str> {
        self.selection().existing_bundle_id()
    }

    #[must_use]
    pub fn patched_bundle_id_of_chosen_app(&self) -> Option<&'static str> {
        self.selection().patched_bundle_id()
    }

    #[must_use]
    pub fn patched_version_string_of_chosen_app(&self) -> Option<&'static str> {
        self.selection().patched_version_string()
    }

    #[must_use]
    pub fn compatible_versions_of_chosen_app(&self) -> &'static [&'static str] {
        self.selection().compatible_versions()
    }

    #[must_use]
    pub fn main_action_of_chosen_app(&self) -> &'static str {
        self.selection().main_action()
    }

    #[must_use]
    pub fn detail_action_of_chosen_app(&self) -> &'static str {
        self.selection().detail_action()
    }

    #[must_use]
    pub fn time_estimate_of_chosen_app(&self) -> &'static str {
        self.selection().time_estimate()
    }

    #[must_use]
    pub fn cartoon_icon(&self) -> Option<ImageAsset> {
        self.selection().cartoon_icon()
    }

    #[must_use]
    pub fn airdrop_image(&self) -> Option<ImageAsset> {
        self.selection().airdrop_image()
    }

    #[must_use]
    pub fn app_store_image(&self) -> Option<ImageAsset> {
        self.selection().app_store_image()
    }

    // --- accessors combining selection and manifest ---

    /// Download URL for the chosen app; only `iTunes` has one
    #[must_use]
    pub fn download_url_of_chosen_app(&self) -> Option<String> {
        let state = self.state();
        match state.selection.app? {
            AppKind::Aperture | AppKind::Iphoto => None,
            AppKind::Itunes => match state.selection.effective_flavor()? {
                ItunesFlavor::DarkMode => state.manifest.itunes129_url.clone(),
                ItunesFlavor::AppStore => state.manifest.itunes126_url.clone(),
                ItunesFlavor::CoverFlow => state.manifest.itunes107_url.clone(),
            },
        }
    }

    /// "Behind the scenes" explainer for the chosen app variant
    #[must_use]
    pub fn behind_the_scenes_of_chosen_app(&self) -> Option<String> {
        let state = self.state();
        match state.selection.app? {
            AppKind::Aperture => state.manifest.aperture_dive.clone(),
            AppKind::Iphoto => state.manifest.iphoto_dive.clone(),
            AppKind::Itunes => match state.selection.effective_flavor()? {
                ItunesFlavor::DarkMode => state.manifest.itunes129_dive.clone(),
                ItunesFlavor::AppStore => state.manifest.itunes126_dive.clone(),
                ItunesFlavor::CoverFlow => state.manifest.itunes107_dive.clone(),
            },
        }
    }

    /// File name of the chosen app's download, "blob" when unknown
    #[must_use]
    pub fn download_file_name_of_chosen_app(&self) -> String {
        self.download_last_segment()
            .unwrap_or_else(|| "blob".to_string())
    }

    /// Name for the mount directory derived from the download file name
    #[must_use]
    pub fn mount_dir_name_of_chosen_app(&self) -> String {
        format!("{}Mount", self.download_stem_or_blob())
    }

    /// Name for the extraction directory derived from the download file name
    #[must_use]
    pub fn extract_dir_name_of_chosen_app(&self) -> String {
        format!("{}Extract", self.download_stem_or_blob())
    }

    /// Replace the four copy placeholders with the chosen app's derived
    /// strings. Pure: inputs without tokens come back unchanged.
    #[must_use]
    pub fn replace_tokens(&self, text: &str) -> String {
        let selection = self.selection();
        text.replace(NAME_TOKEN, selection.display_name())
            .replace(TIME_TOKEN, selection.time_estimate())
            .replace(ACTION_DETAIL_TOKEN, selection.detail_action())
            .replace(MAIN_ACTION_TOKEN, selection.main_action())
    }

    fn download_last_segment(&self) -> Option<String> {
        let url = self.download_url_of_chosen_app()?;
        let parsed = Url::parse(&url).ok()?;
        parsed
            .path_segments()?
            .next_back()
            .filter(|segment| !segment.is_empty())
            .map(String::from)
    }

    fn download_stem_or_blob(&self) -> String {
        self.download_last_segment()
            .and_then(|segment| {
                std::path::Path::new(&segment)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "blob".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrofit_manifest::SupportManifest;
    use retrofit_net::NetClient;

    fn service_with_manifest(manifest: SupportManifest) -> ConfigService {
        let svc = ConfigService::new(NetClient::with_defaults().unwrap(), None, None);
        svc.state_mut().manifest = manifest;
        svc
    }

    fn itunes_manifest() -> SupportManifest {
        SupportManifest {
            itunes129_url: Some("https://example.com/dl/iTunes1295.dmg".into()),
            itunes126_url: Some("https://example.com/dl/iTunes1265.dmg".into()),
            itunes107_url: Some("https://example.com/dl/iTunes107.dmg".into()),
            itunes129_dive: Some("https://example.com/dive/129".into()),
            aperture_dive: Some("https://example.com/dive/aperture".into()),
            ..SupportManifest::default()
        }
    }

    #[test]
    fn test_download_url_switch() {
        let svc = service_with_manifest(itunes_manifest());

        svc.set_chosen_app(Some(AppKind::Aperture));
        assert_eq!(svc.download_url_of_chosen_app(), None);

        svc.set_chosen_app(Some(AppKind::Itunes));
        assert_eq!(svc.download_url_of_chosen_app(), None);

        svc.set_itunes_flavor(Some(ItunesFlavor::DarkMode));
        assert_eq!(
            svc.download_url_of_chosen_app().as_deref(),
            Some("https://example.com/dl/iTunes1295.dmg")
        );

        svc.set_itunes_flavor(Some(ItunesFlavor::CoverFlow));
        assert_eq!(
            svc.download_url_of_chosen_app().as_deref(),
            Some("https://example.com/dl/iTunes107.dmg")
        );
    }

    #[test]
    fn test_behind_the_scenes_lookup() {
        let svc = service_with_manifest(itunes_manifest());

        svc.set_chosen_app(Some(AppKind::Aperture));
        assert_eq!(
            svc.behind_the_scenes_of_chosen_app().as_deref(),
            Some("https://example.com/dive/aperture")
        );

        svc.set_chosen_app(Some(AppKind::Itunes));
        svc.set_itunes_flavor(Some(ItunesFlavor::DarkMode));
        assert_eq!(
            svc.behind_the_scenes_of_chosen_app().as_deref(),
            Some("https://example.com/dive/129")
        );

        // 12.6 dive is not configured in this manifest
        svc.set_itunes_flavor(Some(ItunesFlavor::AppStore));
        assert_eq!(svc.behind_the_scenes_of_chosen_app(), None);
    }

    #[test]
    fn test_download_file_and_dir_names() {
        let svc = service_with_manifest(itunes_manifest());
        svc.set_chosen_app(Some(AppKind::Itunes));
        svc.set_itunes_flavor(Some(ItunesFlavor::DarkMode));

        assert_eq!(svc.download_file_name_of_chosen_app(), "iTunes1295.dmg");
        assert_eq!(svc.mount_dir_name_of_chosen_app(), "iTunes1295Mount");
        assert_eq!(svc.extract_dir_name_of_chosen_app(), "iTunes1295Extract");
    }

    #[test]
    fn test_download_names_fall_back_to_blob() {
        let svc = service_with_manifest(SupportManifest::default());
        svc.set_chosen_app(Some(AppKind::Aperture));

        assert_eq!(svc.download_file_name_of_chosen_app(), "blob");
        assert_eq!(svc.mount_dir_name_of_chosen_app(), "blobMount");
        assert_eq!(svc.extract_dir_name_of_chosen_app(), "blobExtract");
    }

    #[test]
    fn test_replace_tokens() {
        let svc = service_with_manifest(SupportManifest::default());
        svc.set_chosen_app(Some(AppKind::Itunes));
        svc.set_itunes_flavor(Some(ItunesFlavor::DarkMode));

        let copy = svc.replace_tokens(
            "Retrofit is {actionM} {name}. {actionS} {name} takes {timeEstimate}.",
        );
        assert_eq!(
            copy,
            "Retrofit is installing iTunes. downloading and installing iTunes takes 25 minutes."
        );
    }

    #[test]
    fn test_replace_tokens_without_tokens_is_identity() {
        let svc = service_with_manifest(SupportManifest::default());
        svc.set_chosen_app(Some(AppKind::Iphoto));

        let input = "No placeholders here.";
        assert_eq!(svc.replace_tokens(input), input);
    }

    #[test]
    fn test_replace_tokens_repeated_and_unordered() {
        let svc = service_with_manifest(SupportManifest::default());
        svc.set_chosen_app(Some(AppKind::Aperture));

        let copy = svc.replace_tokens("{timeEstimate} {name} {name} {actionM}");
        assert_eq!(copy, "2 minutes Aperture Aperture modifying");
    }

    #[test]
    fn test_manifest_backed_accessors_absent() {
        let svc = service_with_manifest(SupportManifest::default());
        assert_eq!(svc.new_version_visible_title(), None);
        assert_eq!(svc.latest_zip(), None);
        assert_eq!(svc.release_page(), None);
        assert_eq!(svc.latest_build_number(), None);
    }
}
