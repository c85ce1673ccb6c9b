//! Provider scopes wrapped around the root component.
//!
//! # Design
//! - `compose` renders through `ProviderStack::wrap`, so the rendered nesting is
//!   exactly the stack order.
//! - The persistence gate renders nothing until the store has been rehydrated.

use crate::app::context::AppContext;
use crate::app::preferences::browser_locale;
use crate::core::providers::{ProviderScope, ProviderStack};
use crate::core::store::AppStore;
use crate::i18n::TranslationBundle;
use gloo::utils::document;
use tracing::error;
use yew::prelude::*;
use yew_router::prelude::BrowserRouter;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct StoreScopeProps {
    pub(crate) context: AppContext,
    #[prop_or_default]
    pub(crate) children: Children,
}

#[derive(Properties, PartialEq)]
pub(crate) struct ScopeProps {
    #[prop_or_default]
    pub(crate) children: Children,
}

/// Wrap `root` in every scope of `stack`, outermost first.
pub(crate) fn compose(stack: &ProviderStack, context: &AppContext, root: Html) -> Html {
    stack.wrap(root, |scope, child| match scope {
        ProviderScope::Store => html! {
            <StoreScope context={context.clone()}>{child}</StoreScope>
        },
        ProviderScope::PersistGate => html! { <PersistGate>{child}</PersistGate> },
        ProviderScope::Localization => html! { <IntlScope>{child}</IntlScope> },
        ProviderScope::Navigation => html! { <BrowserRouter>{child}</BrowserRouter> },
    })
}

#[function_component(StoreScope)]
pub(crate) fn store_scope(props: &StoreScopeProps) -> Html {
    html! {
        <ContextProvider<AppContext> context={props.context.clone()}>
            {for props.children.iter()}
        </ContextProvider<AppContext>>
    }
}

#[function_component(PersistGate)]
pub(crate) fn persist_gate(props: &ScopeProps) -> Html {
    let context = use_context::<AppContext>();
    let snapshot = use_selector(|store: &AppStore| (store.system.rehydrated, store.persisted()));

    {
        let context = context.clone();
        use_effect_with_deps(
            move |_| {
                match context {
                    Some(ctx) => ctx.persistor.rehydrate(&ctx.dispatch),
                    None => error!("persistence gate mounted outside the store scope"),
                }
                || ()
            },
            (),
        );
    }
    {
        use_effect_with_deps(
            move |snapshot| {
                let (rehydrated, persisted) = &**snapshot;
                if *rehydrated {
                    if let Some(ctx) = context {
                        ctx.persistor.persist(persisted);
                    }
                }
                || ()
            },
            snapshot.clone(),
        );
    }

    if snapshot.0 {
        html! { <>{for props.children.iter()}</> }
    } else {
        Html::default()
    }
}

#[function_component(IntlScope)]
pub(crate) fn intl_scope(props: &ScopeProps) -> Html {
    let chosen = use_selector(|store: &AppStore| store.preferences.locale);
    let locale = (*chosen).unwrap_or_else(browser_locale);
    let bundle = use_memo(move |_| TranslationBundle::new(locale), locale);

    {
        let bundle = bundle.clone();
        use_effect_with_deps(
            move |_| {
                apply_document_locale(&bundle);
                || ()
            },
            locale,
        );
    }

    html! {
        <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
            {for props.children.iter()}
        </ContextProvider<TranslationBundle>>
    }
}

fn apply_document_locale(bundle: &TranslationBundle) {
    if let Some(root) = document().document_element() {
        let _ = root.set_attribute("lang", bundle.locale.code());
        let _ = root.set_attribute("dir", bundle.direction());
    }
}
