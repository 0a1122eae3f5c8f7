use leptos::prelude::*;

use crate::graph::{GraphStats, Project, VisibilityStore};

/// Checkbox list of pages with show-all / hide-all and summary badges.
#[component]
pub fn PageFilter(
	#[prop(into)] project: Signal<Project>,
	visibility: RwSignal<VisibilityStore>,
	#[prop(into)] stats: Signal<GraphStats>,
) -> impl IntoView {
	let show_all = move |_: leptos::ev::MouseEvent| {
		let ids: Vec<String> =
			project.with(|p| p.pages.iter().map(|page| page.id.clone()).collect());
		visibility.update(|store| store.show_all(ids));
	};
	let hide_all = move |_: leptos::ev::MouseEvent| visibility.update(VisibilityStore::hide_all);

	view! {
		<aside class="page-filter">
			<div class="page-filter-badges">
				<span class="badge">{move || format!("{} pages", stats.get().visible_pages)}</span>
				<span class="badge">{move || format!("{} stories", stats.get().total_stories)}</span>
				<span class="badge badge-done">
					{move || format!("{} done", stats.get().completed_stories)}
				</span>
			</div>
			<div class="page-filter-actions">
				<button on:click=show_all>"Show all"</button>
				<button on:click=hide_all>"Hide all"</button>
			</div>
			<ul class="page-filter-list">
				{move || {
					project
						.get()
						.pages
						.into_iter()
						.map(|page| {
							let id = page.id.clone();
							let checked_id = page.id.clone();
							let count = page.user_stories.len();
							view! {
								<li>
									<label>
										<input
											type="checkbox"
											prop:checked=move || {
												visibility.with(|store| store.is_visible(&checked_id))
											}
											on:change=move |_| {
												visibility.update(|store| {
													store.toggle(&id);
												})
											}
										/>
										{page.title}
										<span class="page-filter-count">{format!(" ({count})")}</span>
									</label>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</aside>
	}
}
