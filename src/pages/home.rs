use leptos::prelude::*;

use super::use_language;
use crate::catalog::SkillCatalog;
use crate::components::language_toggle::LanguageToggle;
use crate::components::workflow_editor::WorkflowEditor;
use crate::i18n::text;

/// Default Home Page: the workflow editor over the built-in skill catalog.
#[component]
pub fn Home() -> impl IntoView {
	let language = use_language();
	let catalog = SkillCatalog::builtin();

	view! {
		<div class="workflow-page">
			<header class="page-header">
				<div>
					<h1>{move || text(language.get(), "workflow_title")}</h1>
					<p class="subtitle">{move || text(language.get(), "workflow_subtitle")}</p>
				</div>
				<LanguageToggle language=language />
			</header>
			<WorkflowEditor catalog=catalog language=language />
		</div>
	}
}
