use leptos::prelude::*;
use log::info;

use crate::i18n::{Language, text};

/// EN/TR switch bound to the page-wide language signal.
#[component]
pub fn LanguageToggle(language: RwSignal<Language>) -> impl IntoView {
	let buttons = Language::ALL
		.into_iter()
		.map(|lang| {
			view! {
				<button
					class:active=move || language.get() == lang
					on:click=move |_| {
						info!("Display language set to {}", lang.code());
						language.set(lang);
					}
				>
					{lang.caption()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="language-toggle">
			<span>{move || text(language.get(), "language")}": "</span>
			{buttons}
		</div>
	}
}
