use leptos::prelude::*;

use crate::i18n::Language;

pub mod home;
pub mod not_found;

/// The page-wide display language provided by `App`, or a detached default.
fn use_language() -> RwSignal<Language> {
	use_context::<RwSignal<Language>>().unwrap_or_else(|| RwSignal::new(Language::default()))
}
