use leptos::prelude::*;

use super::use_language;
use crate::i18n::text;

#[component]
pub fn NotFound() -> impl IntoView {
	let language = use_language();

	view! {
		<div class="not-found">
			<h1>{move || text(language.get(), "not_found_title")}</h1>
			<p>{move || text(language.get(), "not_found_body")}</p>
			<a href="/">{move || text(language.get(), "workflow_title")}</a>
		</div>
	}
}
