//! The item source: menus and their stored visibility settings
//!
//! Menu files hold the raw settings an editor attached to each item. Loading them
//! converts those settings into typed [`Rule`](crate::visibility::Rule)s, applying
//! the configured default rule to items that have none.

mod legacy;
mod menu_file;

pub use legacy::{VISIBILITY_SLUGS, is_known_visibility, parse_allowed_countries, parse_commerce, parse_language, parse_visibility};
pub use menu_file::{MenuFormat, load_menus, parse_menus};
