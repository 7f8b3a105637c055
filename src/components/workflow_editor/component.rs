use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::WorkflowEditorState;
use super::types::{EndpointLabels, Point};
use crate::catalog::SkillCatalog;
use crate::i18n::{Language, text};

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

/// Editor state together with the canvas it draws into. Exists once the
/// canvas has mounted and a 2D context was obtained.
struct Mounted {
	state: WorkflowEditorState,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl Mounted {
	fn local_point(&self, ev: &MouseEvent) -> Point {
		let rect = self.canvas.get_bounding_client_rect();
		Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}

	fn redraw(&self) {
		render::render(&self.state, &self.ctx);
	}
}

type Shared = Rc<RefCell<Option<Mounted>>>;

/// Run `f` against the mounted editor and redraw. Does nothing before mount.
fn with_mounted<R>(shared: &Shared, f: impl FnOnce(&mut Mounted) -> R) -> Option<R> {
	let mut guard = shared.borrow_mut();
	let mounted = guard.as_mut()?;
	let result = f(mounted);
	mounted.redraw();
	Some(result)
}

/// Window listeners held for the length of one gesture. Dropping the guard
/// removes every listener exactly once.
struct GestureListeners(Vec<WindowListenerHandle>);

impl Drop for GestureListeners {
	fn drop(&mut self) {
		for handle in self.0.drain(..) {
			handle.remove();
		}
	}
}

// Window listener handles are `Send`, so the slot can be released from
// `on_cleanup`.
type ListenerSlot = Arc<Mutex<Option<GestureListeners>>>;

fn release(slot: &ListenerSlot) {
	let released = slot.lock().ok().and_then(|mut guard| guard.take());
	drop(released);
}

/// Follow the pointer across the whole window until it is released, so a
/// gesture survives the cursor leaving the canvas.
fn capture_gesture(shared: &Shared, slot: &ListenerSlot) {
	let on_move = {
		let shared = shared.clone();
		window_event_listener(ev::mousemove, move |ev: MouseEvent| {
			with_mounted(&shared, |m| {
				let p = m.local_point(&ev);
				m.state.pointer_move(p);
			});
		})
	};
	let on_up = {
		let (shared, slot) = (shared.clone(), slot.clone());
		window_event_listener(ev::mouseup, move |ev: MouseEvent| {
			with_mounted(&shared, |m| {
				let p = m.local_point(&ev);
				m.state.pointer_up(p);
			});
			release(&slot);
		})
	};
	let on_blur = {
		let (shared, slot) = (shared.clone(), slot.clone());
		window_event_listener(ev::blur, move |_| {
			with_mounted(&shared, |m| m.state.cancel_gesture());
			release(&slot);
		})
	};

	// Replacing a previous guard releases its listeners.
	if let Ok(mut guard) = slot.lock() {
		*guard = Some(GestureListeners(vec![on_move, on_up, on_blur]));
	}
}

fn endpoint_labels(language: Language) -> EndpointLabels {
	EndpointLabels {
		start: text(language, "workflow_node_start").into(),
		end: text(language, "workflow_node_end").into(),
	}
}

fn canvas_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measured = |measure: fn(&web_sys::Element) -> i32| {
		parent
			.as_ref()
			.map(|p| measure(p) as f64)
			.filter(|v| *v > 0.0)
	};
	(
		width
			.or_else(|| measured(web_sys::Element::client_width))
			.unwrap_or(FALLBACK_WIDTH),
		height
			.or_else(|| measured(web_sys::Element::client_height))
			.unwrap_or(FALLBACK_HEIGHT),
	)
}

/// Palette of catalog skills, template/reset toolbar, and the canvas the
/// workflow is drawn and edited on.
///
/// Without explicit `width`/`height` the canvas fills its parent and follows
/// window resizes.
#[component]
pub fn WorkflowEditor(
	catalog: SkillCatalog,
	#[prop(into)] language: Signal<Language>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let shared: Shared = Rc::new(RefCell::new(None));
	let listeners: ListenerSlot = Arc::new(Mutex::new(None));
	let (shared_init, catalog_init) = (shared.clone(), catalog.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("Canvas 2D context unavailable, workflow editor disabled");
			return;
		};

		let (w, h) = canvas_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let state = WorkflowEditorState::new(
			catalog_init.clone(),
			endpoint_labels(language.get_untracked()),
			w,
			h,
		);
		let mounted = Mounted { state, canvas, ctx };
		mounted.redraw();
		*shared_init.borrow_mut() = Some(mounted);
		info!(
			"Workflow editor mounted ({w}x{h}) with {} skills",
			catalog_init.len()
		);
	});

	let on_resize = (width.is_none() || height.is_none()).then(|| {
		let shared = shared.clone();
		window_event_listener(ev::resize, move |_| {
			with_mounted(&shared, |m| {
				let (nw, nh) = canvas_size(&m.canvas, width, height);
				m.canvas.set_width(nw as u32);
				m.canvas.set_height(nh as u32);
				m.state.resize(nw, nh);
			});
		})
	});

	let listeners_cleanup = listeners.clone();
	on_cleanup(move || {
		if let Some(handle) = on_resize {
			handle.remove();
		}
		release(&listeners_cleanup);
	});

	let shared_lang = shared.clone();
	Effect::new(move |_| {
		let labels = endpoint_labels(language.get());
		with_mounted(&shared_lang, |m| m.state.set_labels(labels));
	});

	let (shared_md, listeners_md) = (shared.clone(), listeners.clone());
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let started = with_mounted(&shared_md, |m| {
			let p = m.local_point(&ev);
			m.state.pointer_down(p)
		})
		.unwrap_or(false);
		if started {
			ev.prevent_default();
			capture_gesture(&shared_md, &listeners_md);
		}
	};

	let shared_tpl = shared.clone();
	let on_load_template = move |_: MouseEvent| {
		with_mounted(&shared_tpl, |m| m.state.load_template());
	};

	let shared_reset = shared.clone();
	let on_reset = move |_: MouseEvent| {
		with_mounted(&shared_reset, |m| m.state.reset());
	};

	if catalog.is_empty() {
		warn!("Skill catalog is empty, nothing to place");
	}
	let palette = catalog
		.iter()
		.map(|skill| {
			let (shared, skill) = (shared.clone(), Rc::clone(skill));
			let (name, description) = (skill.name.clone(), skill.description.clone());
			let on_add = move |_: MouseEvent| {
				with_mounted(&shared, |m| m.state.add_skill_node(&skill));
			};
			view! {
				<li class="skill-palette-item" on:click=on_add>
					<p class="skill-name">{name}</p>
					<p class="skill-description">{description}</p>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="workflow-editor">
			<aside class="skill-palette">
				<h2>{move || text(language.get(), "workflow_skills_title")}</h2>
				<ul>{palette}</ul>
			</aside>
			<section class="workflow-board">
				<div class="workflow-toolbar">
					<button class="primary" on:click=on_load_template>
						{move || text(language.get(), "workflow_load_template")}
					</button>
					<button on:click=on_reset>{move || text(language.get(), "workflow_reset")}</button>
				</div>
				<div class="workflow-canvas">
					<canvas
						node_ref=canvas_ref
						on:mousedown=on_mousedown
						style="display: block; cursor: default;"
					/>
				</div>
				<p class="workflow-hint">{move || text(language.get(), "workflow_hint")}</p>
			</section>
		</div>
	}
}
