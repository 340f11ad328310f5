pub mod web_scrape;
pub mod web_search;

pub use web_scrape::AgentToolWebScrape;
pub use web_search::AgentToolWebSearch;
