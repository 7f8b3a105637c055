//! Display strings for the two supported languages.

/// A display language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
	/// English, also the fallback for missing keys.
	En,
	/// Turkish.
	#[default]
	Tr,
}

impl Language {
	/// Every language, in toggle order.
	pub const ALL: [Language; 2] = [Language::En, Language::Tr];

	/// BCP 47 tag, also used for the `<html lang>` attribute.
	pub fn code(self) -> &'static str {
		match self {
			Language::En => "en",
			Language::Tr => "tr",
		}
	}

	/// Short caption for the language toggle.
	pub fn caption(self) -> &'static str {
		match self {
			Language::En => "EN",
			Language::Tr => "TR",
		}
	}
}

type Dictionary = &'static [(&'static str, &'static str)];

const EN: Dictionary = &[
	("language", "Language"),
	("workflow_title", "Visual Workflow Editor"),
	(
		"workflow_subtitle",
		"Sketch a skill pipeline by placing skills on the canvas and wiring them together.",
	),
	("workflow_skills_title", "Available Skills"),
	("workflow_load_template", "Load Template"),
	("workflow_reset", "Reset"),
	("workflow_node_start", "Start"),
	("workflow_node_end", "End"),
	(
		"workflow_hint",
		"Drag nodes to move them. Drag from a cyan connector to a grey one to link two nodes.",
	),
	("not_found_title", "Page not found"),
	("not_found_body", "There is nothing at this address."),
];

// Missing keys fall back to English.
const TR: Dictionary = &[
	("language", "Dil"),
	("workflow_title", "Görsel İş Akışı Düzenleyicisi"),
	(
		"workflow_subtitle",
		"Becerileri tuvale yerleştirip birbirine bağlayarak bir işlem hattı taslağı çizin.",
	),
	("workflow_skills_title", "Mevcut Beceriler"),
	("workflow_load_template", "Şablon Yükle"),
	("workflow_reset", "Sıfırla"),
	("workflow_node_start", "Başlangıç"),
	("workflow_node_end", "Bitiş"),
	("not_found_title", "Sayfa bulunamadı"),
];

fn dictionary(language: Language) -> Dictionary {
	match language {
		Language::En => EN,
		Language::Tr => TR,
	}
}

fn lookup(dictionary: Dictionary, key: &str) -> Option<&'static str> {
	dictionary
		.iter()
		.find_map(|&(k, v)| (k == key).then_some(v))
}

/// Resolve `key` in `language`, then in English, then give the key back.
pub fn text(language: Language, key: &str) -> &str {
	lookup(dictionary(language), key)
		.or_else(|| lookup(EN, key))
		.unwrap_or(key)
}
