//! Skill manifests and the read-only catalog the editor palette draws from.

use std::rc::Rc;

/// Value type of a skill input or output.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
	String,
	Number,
	Boolean,
	Object,
	Array,
}

/// What a skill needs from the orchestrator to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
	/// Calls a language model.
	Llm,
	/// Calls an external tool or API.
	Tool,
	/// Pure control flow, no outside calls.
	Logic,
}

/// Runtime a skill's entrypoint is executed in.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Runtime {
	NodeJs,
	Python,
	Wasm,
}

/// A single named input or output of a skill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillIo {
	/// Parameter name as the skill sees it.
	pub name: String,
	/// Expected value type.
	pub value_type: ValueType,
	/// Human-readable description.
	pub description: String,
	/// Whether the value must be present.
	pub required: bool,
}

impl SkillIo {
	fn required(name: &str, value_type: ValueType, description: &str) -> Self {
		Self {
			name: name.into(),
			value_type,
			description: description.into(),
			required: true,
		}
	}
}

/// Manifest describing one skill. The editor only shows `name` and
/// `description`; the remaining fields ride along for display elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillManifest {
	/// Unique skill name, also the label of nodes built from it.
	pub name: String,
	/// Semantic version, e.g. `1.0.0`.
	pub version: String,
	/// One-line summary shown in the palette.
	pub description: String,
	/// Values the skill consumes.
	pub inputs: Vec<SkillIo>,
	/// Values the skill produces.
	pub outputs: Vec<SkillIo>,
	/// What the skill calls out to.
	pub capabilities: Vec<Capability>,
	/// Where the entrypoint runs.
	pub runtime: Runtime,
	/// Entrypoint file or function, relative to the skill.
	pub entrypoint: String,
}

/// Ordered, immutably shared list of skills.
///
/// Cloning is cheap: every clone points at the same entries, and nodes built
/// from an entry hold the same `Rc` rather than a copy of the manifest.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
	skills: Rc<[Rc<SkillManifest>]>,
}

impl SkillCatalog {
	/// Build a catalog from manifests, keeping their order.
	pub fn new(skills: impl IntoIterator<Item = SkillManifest>) -> Self {
		Self {
			skills: skills.into_iter().map(Rc::new).collect(),
		}
	}

	/// The four demonstration skills shipped with the editor.
	pub fn builtin() -> Self {
		use Capability::*;

		Self::new([
			SkillManifest {
				name: "intent-detection".into(),
				version: "1.0.0".into(),
				description: "Detects user intent from text.".into(),
				inputs: vec![SkillIo::required("query", ValueType::String, "User input")],
				outputs: vec![SkillIo::required("intent", ValueType::String, "Detected intent")],
				capabilities: vec![Llm],
				runtime: Runtime::Python,
				entrypoint: "main.py".into(),
			},
			SkillManifest {
				name: "product-lookup".into(),
				version: "1.1.0".into(),
				description: "Looks up product details by ID.".into(),
				inputs: vec![SkillIo::required("productId", ValueType::String, "Product ID")],
				outputs: vec![SkillIo::required("product", ValueType::Object, "Product details")],
				capabilities: vec![Tool],
				runtime: Runtime::NodeJs,
				entrypoint: "index.js".into(),
			},
			SkillManifest {
				name: "summarize-text".into(),
				version: "2.0.0".into(),
				description: "Summarizes a block of text.".into(),
				inputs: vec![SkillIo::required("text", ValueType::String, "Text to summarize")],
				outputs: vec![SkillIo::required("summary", ValueType::String, "The summary")],
				capabilities: vec![Llm],
				runtime: Runtime::Python,
				entrypoint: "main.py".into(),
			},
			SkillManifest {
				name: "send-email".into(),
				version: "1.0.0".into(),
				description: "Sends an email.".into(),
				inputs: vec![
					SkillIo::required("recipient", ValueType::String, "Email address"),
					SkillIo::required("body", ValueType::String, "Email content"),
				],
				outputs: vec![],
				capabilities: vec![Tool],
				runtime: Runtime::NodeJs,
				entrypoint: "index.js".into(),
			},
		])
	}

	/// Entries in catalog order.
	pub fn iter(&self) -> std::slice::Iter<'_, Rc<SkillManifest>> {
		self.skills.iter()
	}

	/// Entry with exactly this name.
	pub fn find(&self, name: &str) -> Option<&Rc<SkillManifest>> {
		self.skills.iter().find(|skill| skill.name == name)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.skills.len()
	}

	/// Whether the catalog has no entries.
	pub fn is_empty(&self) -> bool {
		self.skills.is_empty()
	}
}
