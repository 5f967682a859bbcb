//! Value objects for webspaces, portals and the portal informations derived from them.

pub mod collection;
pub mod portal;
pub mod setting;
pub mod webspace;

pub use collection::WebspaceCollection;
pub use portal::{MatchType, PortalInformation};
pub use webspace::{Environment, Localization, NavigationContext, Portal, Url, Webspace};
