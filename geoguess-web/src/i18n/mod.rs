mod bundle;
mod render;

pub use bundle::{I18nBundle, SUPPORTED_LANGS, current_lang, set_lang};
pub use render::{t, tr};
