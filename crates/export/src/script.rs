/// Client-side behavior shipped as `interactivity.js`.
///
/// Static text so every export carries byte-identical script.
pub const INTERACTIVITY_JS: &str = include_str!("../assets/interactivity.js");

pub const SCRIPT_FILE_NAME: &str = "interactivity.js";
