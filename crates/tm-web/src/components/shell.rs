use crate::app::worker::activate_waiting;
use crate::app::{AppContext, Route};
use crate::components::locale_menu::LocaleMenu;
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::{Link, Switch, use_route};
use yewdux::prelude::use_selector;

#[function_component(TmApp)]
pub(crate) fn tm_app() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let context = use_context::<AppContext>();
    let update_available = use_selector(|store: &AppStore| store.system.update_available);
    let active = use_route::<Route>().unwrap_or(Route::NotFound);

    let on_locale = {
        let context = context.clone();
        Callback::from(move |locale: LocaleCode| {
            if let Some(ctx) = &context {
                ctx.dispatch
                    .reduce_mut(|store| store.preferences.locale = Some(locale));
            }
        })
    };
    let on_reload = Callback::from(|_: MouseEvent| activate_waiting());
    let environment = context
        .as_ref()
        .and_then(|ctx| ctx.config.environment().map(ToString::to_string));

    html! {
        <div class="app-shell" dir={bundle.direction()}>
            <header class="topbar">
                <strong class="brand">{bundle.text("app.title", "Tasking Manager")}</strong>
                <nav>
                    {nav_item(Route::Home, &bundle.text("nav.home", "Home"), active)}
                    {nav_item(Route::Explore, &bundle.text("nav.explore", "Explore projects"), active)}
                    {nav_item(Route::Learn, &bundle.text("nav.learn", "Learn"), active)}
                    {nav_item(Route::About, &bundle.text("nav.about", "About"), active)}
                </nav>
                <LocaleMenu
                    locale={bundle.locale}
                    label={AttrValue::from(bundle.text("locale.label", "Language"))}
                    on_select={on_locale}
                />
            </header>
            if *update_available {
                <div class="update-banner" role="status">
                    <span>{bundle.text("update.available", "A new version is available.")}</span>
                    <button type="button" onclick={on_reload}>
                        {bundle.text("update.reload", "Reload")}
                    </button>
                </div>
            }
            <main>
                <Switch<Route> render={switch} />
            </main>
            <footer>
                if let Some(environment) = environment {
                    <span class="pill subtle">{environment}</span>
                }
            </footer>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    route: Route,
}

fn switch(route: Route) -> Html {
    html! { <Page {route} /> }
}

#[function_component(Page)]
fn page(props: &PageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let heading = |key: &str, default: &str| html! { <h1>{bundle.text(key, default)}</h1> };

    match props.route {
        Route::Home => html! {
            <section class="home">
                {heading("home.heading", "Map the world together")}
                <p>{bundle.text("home.body", "")}</p>
            </section>
        },
        Route::Explore => heading("explore.heading", "Explore projects"),
        Route::Learn => heading("learn.heading", "Learn to map"),
        Route::About => heading("about.heading", "About the Tasking Manager"),
        Route::NotFound => html! {
            <section class="not-found">
                {heading("not_found.heading", "Page not found")}
                <p>{bundle.text("not_found.body", "")}</p>
            </section>
        },
    }
}

fn nav_item(route: Route, label: &str, active: Route) -> Html {
    let classes = classes!("nav-item", (active == route).then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label.to_string()}</Link<Route>>
    }
}
