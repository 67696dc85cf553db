pub mod cleaner;
pub mod dedup;
pub mod phone;
pub mod pipeline;
pub mod similarity;
pub mod url;
