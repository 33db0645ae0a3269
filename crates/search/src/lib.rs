mod search_box;
mod site_search;

pub use search_box::SearchBox;
pub use site_search::{search, SiteSearch};
pub use studio_protocol::{NavigationContext, RecordType, SearchResult};
