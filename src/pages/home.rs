use leptos::prelude::*;

use crate::components::project_graph::{PageFilter, ProjectGraphCanvas};
use crate::graph::{Project, ProjectGraph, VisibilityStore, build, parse_projects};

const SAMPLE_PROJECTS: &str = include_str!("../../assets/sample_projects.json");

/// Bundled demo snapshots. A broken bundle logs and yields no projects.
fn load_sample_projects() -> Vec<Project> {
	match parse_projects(SAMPLE_PROJECTS) {
		Ok(projects) => {
			log::info!("loaded {} sample projects", projects.len());
			projects
		}
		Err(err) => {
			log::error!("failed to load sample projects: {err}");
			Vec::new()
		}
	}
}

/// Project at `index` with `store` re-seeded for it, so the visibility set
/// never refers to the previously selected project.
fn select_project(projects: &[Project], index: usize, store: &mut VisibilityStore) -> Project {
	let project = projects.get(index).cloned().unwrap_or_default();
	store.sync_project(&project);
	project
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let projects = StoredValue::new(load_sample_projects());
	let selected = RwSignal::new(0usize);
	let project = Memo::new(move |_| {
		let index = selected.get();
		projects.with_value(|all| all.get(index).cloned().unwrap_or_default())
	});

	let visibility = RwSignal::new(VisibilityStore::for_project(&project.get_untracked()));

	let graph = Memo::new(move |_| visibility.with(|store| project.with(|p| build(p, store))));
	let stats = Signal::derive(move || graph.with(ProjectGraph::stats));
	let on_page_toggle = Callback::new(move |page_id: String| {
		visibility.update(|store| {
			store.toggle(&page_id);
		});
	});

	let on_select = move |ev: leptos::ev::Event| {
		let Ok(index) = event_target_value(&ev).parse::<usize>() else {
			return;
		};
		// Re-seed before the selection changes so no build pairs the new
		// project with the old visibility set.
		visibility.update(|store| {
			projects.with_value(|all| select_project(all, index, store));
		});
		selected.set(index);
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ProjectGraphCanvas graph=graph on_page_toggle=on_page_toggle fullscreen=true />
				<div class="graph-overlay">
					<h1>{move || project.with(|p| p.name.clone())}</h1>
					<p class="subtitle">
						"Scroll to zoom. Drag to pan. Double-click a page to hide it."
					</p>
					<select
						class="project-select"
						prop:value=move || selected.get().to_string()
						on:change=on_select
					>
						{projects
							.with_value(|all| {
								all.iter()
									.enumerate()
									.map(|(i, p)| {
										view! { <option value=i.to_string()>{p.name.clone()}</option> }
									})
									.collect_view()
							})}
					</select>
					<PageFilter project=project visibility=visibility stats=stats />
				</div>
			</div>
		</ErrorBoundary>
	}
}
