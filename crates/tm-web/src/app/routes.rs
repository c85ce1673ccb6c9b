//! Routing definitions for the web UI.
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/explore")]
    Explore,
    #[at("/learn")]
    Learn,
    #[at("/about")]
    About,
    #[not_found]
    #[at("/404")]
    NotFound,
}
