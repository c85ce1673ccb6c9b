//! Locale selector used in the header.
//!
//! # Design
//! - Presentation only; the caller owns the selection and persists it.
//! - A native `<select>` keeps the control usable before styles arrive.

use crate::i18n::LocaleCode;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LocaleMenuProps {
    pub(crate) locale: LocaleCode,
    pub(crate) label: AttrValue,
    pub(crate) on_select: Callback<LocaleCode>,
}

#[function_component(LocaleMenu)]
pub(crate) fn locale_menu(props: &LocaleMenuProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(locale) = LocaleCode::from_lang_tag(&select.value()) {
                on_select.emit(locale);
            }
        })
    };

    html! {
        <label class="locale-menu">
            <span class="sr-only">{props.label.clone()}</span>
            <select aria-label={props.label.clone()} {onchange}>
                {for LocaleCode::all().iter().map(|locale| html! {
                    <option
                        value={locale.code()}
                        selected={*locale == props.locale}
                    >
                        {locale.label()}
                    </option>
                })}
            </select>
        </label>
    }
}
