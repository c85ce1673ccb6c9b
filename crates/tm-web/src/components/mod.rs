pub(crate) mod locale_menu;
pub(crate) mod shell;
